use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com";

#[derive(Debug, Error)]
pub enum HackerNewsError {
    /// Transport failure or a non-success HTTP status.
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Malformed(String),
}

impl HackerNewsError {
    pub fn is_network(&self) -> bool {
        matches!(self, HackerNewsError::Network(_))
    }
}

/// A story item, kept as the API sent it (key order included) with a
/// `username` entry mirroring `by`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Story {
    fields: Map<String, Value>,
}

impl Story {
    /// Turns a raw item payload into a story. Returns `Ok(None)` for null
    /// items and for items without a `by` key.
    pub fn from_record(record: Value) -> Result<Option<Self>, HackerNewsError> {
        let mut fields = match record {
            Value::Null => return Ok(None),
            Value::Object(map) => map,
            other => {
                return Err(HackerNewsError::Malformed(format!(
                    "item record is not an object: {}",
                    other
                )));
            }
        };

        let Some(by) = fields.get("by").cloned() else {
            return Ok(None);
        };
        fields.insert("username".to_string(), by);
        Ok(Some(Self { fields }))
    }

    pub fn id(&self) -> Option<&Value> {
        self.fields.get("id")
    }

    pub fn by(&self) -> &Value {
        self.fields.get("by").unwrap_or(&Value::Null)
    }

    pub fn username(&self) -> &Value {
        self.fields.get("username").unwrap_or(&Value::Null)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub karma: Option<Value>,
    #[serde(default)]
    pub about: Option<Value>,
    #[serde(default)]
    pub submitted: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: Option<Value>,
    pub karma: Option<Value>,
    pub about: Option<Value>,
    pub total_items_submitted: usize,
}

impl From<UserRecord> for UserSummary {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.user_id,
            karma: user.karma,
            about: user.about,
            total_items_submitted: user.submitted.map_or(0, |items| items.len()),
        }
    }
}

/// Read-only client for the public Hacker News Firebase API.
#[derive(Debug, Clone)]
pub struct HackerNewsClient {
    client: reqwest::Client,
    base_url: String,
}

impl HackerNewsClient {
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, path: &str, check_status: bool) -> Result<Value, HackerNewsError> {
        let url = format!("{}/v0/{}", self.base_url, path);
        tracing::debug!(url = %url, "GET");

        let mut response = self.client.get(&url).send().await?;
        if check_status {
            response = response.error_for_status()?;
        }
        let body = response.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }

    /// Ranked front-page story IDs. A null payload is treated as an empty list.
    pub async fn top_story_ids(&self) -> Result<Vec<Value>, HackerNewsError> {
        match self.get_json("topstories.json", true).await? {
            Value::Array(ids) => Ok(ids),
            Value::Null => Ok(Vec::new()),
            other => Err(HackerNewsError::Malformed(format!(
                "top stories response is not a list: {}",
                other
            ))),
        }
    }

    pub async fn item(&self, id: &Value) -> Result<Value, HackerNewsError> {
        let segment = match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        self.get_json(&format!("item/{}.json", segment), true).await
    }

    /// Fetches a user profile; `Ok(None)` when the API answers with null.
    pub async fn user(&self, username: &str) -> Result<Option<UserRecord>, HackerNewsError> {
        // The user endpoint answers unknown names with a 200 null body, so the
        // status is not checked here.
        let record = self.get_json(&format!("user/{}.json", username), false).await?;
        if record.is_null() {
            return Ok(None);
        }
        if record.get("submitted").is_some_and(Value::is_null) {
            return Err(HackerNewsError::Malformed(
                "user record has a null 'submitted' list".to_string(),
            ));
        }
        Ok(Some(serde_json::from_value(record)?))
    }
}
