use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const THOUGHTS_KEY: &str = "thoughts";

#[derive(Debug, Error)]
pub enum SessionStateError {
    #[error("session state entry '{key}' is not a list (found {found})")]
    NotAList { key: String, found: &'static str },
}

/// Per-conversation key/value store owned by the host agent and shared by
/// every tool invocation in one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionState {
    entries: Map<String, Value>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the list stored under `key`, creating an empty one if the key
    /// is missing.
    pub fn list_mut(&mut self, key: &str) -> Result<&mut Vec<Value>, SessionStateError> {
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));

        match entry {
            Value::Array(items) => Ok(items),
            other => Err(SessionStateError::NotAList {
                key: key.to_string(),
                found: value_kind(other),
            }),
        }
    }

    /// Appends `value` to the list under `key` and returns the whole list.
    pub fn append(&mut self, key: &str, value: Value) -> Result<&[Value], SessionStateError> {
        let items = self.list_mut(key)?;
        items.push(value);
        Ok(items.as_slice())
    }
}

impl From<Map<String, Value>> for SessionState {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
