use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::io;
use thiserror::Error;

use crate::clients::HackerNewsClient;
use crate::config::ToolkitConfig;
use crate::memory::SessionState;

pub mod hackernews;
pub mod thinking;

pub use hackernews::HackerNewsTools;
pub use thinking::ThinkingTools;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[async_trait]
pub trait ToolTrait: Send + Sync {
    fn info(&self) -> ToolInfo;

    /// Runs the tool against the calling agent's session state.
    async fn execute(
        &self,
        session_state: &mut Option<SessionState>,
        arguments: Value,
    ) -> Result<String, ToolError>;
}

/// A named group of tools registered together.
pub struct Toolkit {
    pub name: String,
    pub tools: Vec<Box<dyn ToolTrait>>,
    pub instructions: Option<String>,
    pub add_instructions: bool,
}

impl Toolkit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tools: Vec::new(),
            instructions: None,
            add_instructions: false,
        }
    }

    pub fn register(&mut self, tool: Box<dyn ToolTrait>) {
        self.tools.push(tool);
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.info().name).collect()
    }
}

pub struct ToolManager {
    tools: HashMap<String, Box<dyn ToolTrait>>,
    instructions: Vec<String>,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolManager {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            instructions: Vec::new(),
        }
    }

    pub fn register(&mut self, tool: Box<dyn ToolTrait>) {
        let name = tool.info().name;
        tracing::info!(tool = %name, "Registering tool");
        self.tools.insert(name, tool);
    }

    pub fn register_toolkit(&mut self, toolkit: Toolkit) {
        tracing::debug!(toolkit = %toolkit.name, tools = toolkit.tools.len(), "Registering toolkit");
        if toolkit.add_instructions {
            if let Some(instructions) = toolkit.instructions {
                self.instructions.push(instructions);
            }
        }
        for tool in toolkit.tools {
            self.register(tool);
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn ToolTrait> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Registered tool names, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn get_definitions(&self) -> Vec<ToolInfo> {
        let mut definitions: Vec<ToolInfo> = self.tools.values().map(|tool| tool.info()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Instructions of every toolkit registered with `add_instructions`.
    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }
}

pub fn default_tools(config: &ToolkitConfig) -> ToolManager {
    let mut manager = ToolManager::new();

    let client = HackerNewsClient::new(Some(config.base_url.clone()));
    manager.register_toolkit(HackerNewsTools::new(client).into_toolkit(config));
    manager.register_toolkit(ThinkingTools::new(config.instructions.clone()).into_toolkit(config));

    manager
}

/// Writes JSON with `", "` and `": "` separators.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

pub(crate) fn to_json_string<T>(value: &T) -> Result<String, serde_json::Error>
where
    T: ?Sized + Serialize,
{
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// The `{"error": ..., "message": ...}` object returned by the JSON tools.
pub(crate) fn error_json(error: &str, message: impl Into<String>) -> String {
    // `Value`'s Display writes a string as an escaped JSON literal.
    format!(
        "{{\"error\": {}, \"message\": {}}}",
        Value::String(error.to_string()),
        Value::String(message.into())
    )
}
