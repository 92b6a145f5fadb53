use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::memory::SessionState;
use crate::prompts::build_tools_prompt;
use crate::tools::{ToolError, ToolManager};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    pub arguments: Value,
    pub output: String,
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Tool not registered: {0}")]
    UnknownTool(String),
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
}

/// Minimal host for the toolkits: owns the registered tools and the session
/// state they share, and dispatches calls one at a time.
pub struct Agent {
    tools: ToolManager,
    pub session_state: Option<SessionState>,
    calls: Vec<ToolCall>,
}

impl Agent {
    pub fn new(tools: ToolManager) -> Self {
        Self {
            tools,
            session_state: None,
            calls: Vec::new(),
        }
    }

    pub fn with_session_state(mut self, session_state: SessionState) -> Self {
        self.session_state = Some(session_state);
        self
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn calls(&self) -> &[ToolCall] {
        &self.calls
    }

    pub async fn call_tool(&mut self, name: &str, arguments: Value) -> Result<String, AgentError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| AgentError::UnknownTool(name.to_string()))?;

        tracing::debug!(tool = %name, arguments = %arguments, "Calling tool");
        let output = tool.execute(&mut self.session_state, arguments.clone()).await?;

        self.calls.push(ToolCall {
            tool: name.to_string(),
            arguments,
            output: output.clone(),
        });

        Ok(output)
    }

    pub fn system_prompt(&self) -> String {
        build_tools_prompt(&self.tools.get_definitions(), self.tools.instructions())
    }
}
