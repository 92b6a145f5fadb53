use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::{ToolError, ToolInfo, ToolTrait, Toolkit, error_json, to_json_string};
use crate::clients::{HackerNewsClient, HackerNewsError, Story, UserSummary};
use crate::config::ToolkitConfig;
use crate::memory::SessionState;

pub const TOOLKIT_NAME: &str = "hackers_news";
pub const DEFAULT_NUM_STORIES: i64 = 10;

/// Top stories and user lookups against the Hacker News API.
///
/// Both operations always produce a JSON string: the result on success, or an
/// `{"error", "message"}` object describing what went wrong.
pub struct HackerNewsTools {
    client: HackerNewsClient,
}

impl HackerNewsTools {
    pub fn new(client: HackerNewsClient) -> Self {
        Self { client }
    }

    /// Builds the `hackers_news` toolkit with the tools `config` enables.
    pub fn into_toolkit(self, config: &ToolkitConfig) -> Toolkit {
        let tools = Arc::new(self);
        let mut toolkit = Toolkit::new(TOOLKIT_NAME);

        if config.top_stories_enabled() {
            toolkit.register(Box::new(TopStoriesTool {
                tools: Arc::clone(&tools),
            }));
        }
        if config.user_details_enabled() {
            toolkit.register(Box::new(UserDetailsTool {
                tools: Arc::clone(&tools),
            }));
        }

        toolkit
    }

    pub async fn get_top_hackernews_stories(&self, num_stories: i64) -> String {
        tracing::debug!("Getting top {} stories from Hacker News", num_stories);

        let result = match self.fetch_top_stories(num_stories).await {
            Ok(Some(stories)) => to_json_string(&stories).map(Some).map_err(HackerNewsError::from),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };

        match result {
            Ok(Some(json)) => json,
            Ok(None) => error_json("No stories found", "No top stories available at this time."),
            Err(e) if e.is_network() => {
                tracing::error!("HTTP error getting top stories: {}", e);
                error_json(
                    "Network error",
                    format!("Failed to fetch top stories due to network error: {}", e),
                )
            }
            Err(e) => {
                tracing::error!("Unexpected error getting top stories: {}", e);
                error_json("Unexpected error", format!("An unexpected error occurred: {}", e))
            }
        }
    }

    /// `Ok(None)` when there is nothing to fetch. Any failure discards the
    /// stories collected so far.
    async fn fetch_top_stories(&self, num_stories: i64) -> Result<Option<Vec<Story>>, HackerNewsError> {
        if num_stories <= 0 {
            return Ok(None);
        }

        let ids = self.client.top_story_ids().await?;
        if ids.is_empty() {
            return Ok(None);
        }

        let limit = usize::try_from(num_stories).unwrap_or(usize::MAX);
        let mut stories = Vec::new();
        for id in ids.iter().take(limit) {
            let record = self.client.item(id).await?;
            match Story::from_record(record)? {
                Some(story) => stories.push(story),
                None => tracing::debug!(id = %id, "Skipping story without author"),
            }
        }

        Ok(Some(stories))
    }

    pub async fn get_user_details(&self, username: &str) -> String {
        tracing::debug!("Getting details for user: {}", username);

        let result = match self.client.user(username).await {
            Ok(Some(user)) => to_json_string(&UserSummary::from(user)).map(Some).map_err(HackerNewsError::from),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };

        match result {
            Ok(Some(json)) => json,
            Ok(None) => error_json(
                "User not found",
                format!("The user '{}' does not exist on Hacker News.", username),
            ),
            Err(e) if e.is_network() => {
                tracing::error!("HTTP error getting user details for {}: {}", username, e);
                error_json(
                    "Network error",
                    format!("Failed to fetch user details due to network error: {}", e),
                )
            }
            Err(e) => {
                tracing::error!("Unexpected error getting user details for {}: {}", username, e);
                error_json("Unexpected error", format!("An unexpected error occurred: {}", e))
            }
        }
    }
}

pub struct TopStoriesTool {
    tools: Arc<HackerNewsTools>,
}

#[async_trait]
impl ToolTrait for TopStoriesTool {
    fn info(&self) -> ToolInfo {
        ToolInfo {
            name: "get_top_hackernews_stories".to_string(),
            description: "Get top stories from Hacker News. Returns a JSON list of stories.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "num_stories": {
                        "type": "integer",
                        "description": "Number of stories to return. Defaults to 10."
                    }
                }
            }),
        }
    }

    async fn execute(
        &self,
        _session_state: &mut Option<SessionState>,
        arguments: Value,
    ) -> Result<String, ToolError> {
        let num_stories = match arguments.get("num_stories") {
            None | Some(Value::Null) => DEFAULT_NUM_STORIES,
            Some(value) => value.as_i64().ok_or_else(|| {
                ToolError::InvalidArguments("'num_stories' must be an integer".to_string())
            })?,
        };

        Ok(self.tools.get_top_hackernews_stories(num_stories).await)
    }
}

pub struct UserDetailsTool {
    tools: Arc<HackerNewsTools>,
}

#[async_trait]
impl ToolTrait for UserDetailsTool {
    fn info(&self) -> ToolInfo {
        ToolInfo {
            name: "get_user_details".to_string(),
            description: "Get the details of a Hacker News user by username. Returns a JSON object.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "username": {
                        "type": "string",
                        "description": "Username of the user to get details for"
                    }
                },
                "required": ["username"]
            }),
        }
    }

    async fn execute(
        &self,
        _session_state: &mut Option<SessionState>,
        arguments: Value,
    ) -> Result<String, ToolError> {
        let username = arguments
            .get("username")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'username' argument".to_string()))?;

        Ok(self.tools.get_user_details(username).await)
    }
}
