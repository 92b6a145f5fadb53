use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::{ToolError, ToolInfo, ToolTrait, Toolkit};
use crate::config::ToolkitConfig;
use crate::memory::{SessionState, SessionStateError, THOUGHTS_KEY};
use crate::prompts::{THINK_DESCRIPTION, THINKING_INSTRUCTIONS};

pub const TOOLKIT_NAME: &str = "thinking_tools";

/// Scratchpad tool: records the agent's thoughts in its session state.
pub struct ThinkingTools {
    instructions: String,
}

impl ThinkingTools {
    pub fn new(instructions: Option<String>) -> Self {
        Self {
            instructions: instructions.unwrap_or_else(|| THINKING_INSTRUCTIONS.to_string()),
        }
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn into_toolkit(self, config: &ToolkitConfig) -> Toolkit {
        let mut toolkit = Toolkit::new(TOOLKIT_NAME);
        toolkit.instructions = Some(self.instructions.clone());
        toolkit.add_instructions = config.add_instructions;

        if config.think_enabled() {
            toolkit.register(Box::new(ThinkTool {
                tools: Arc::new(self),
            }));
        }

        toolkit
    }

    /// Appends `thought` to the `thoughts` list in `session_state`, creating
    /// the state and the list on first use, and returns every thought so far.
    ///
    /// Failures come back as an `Error recording thought: ...` string.
    pub fn think(&self, session_state: &mut Option<SessionState>, thought: &str) -> String {
        tracing::debug!("Thought: {}", thought);

        match record_thought(session_state, thought) {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::error!("Error recording thought: {}", e);
                format!("Error recording thought: {}", e)
            }
        }
    }
}

fn record_thought(
    session_state: &mut Option<SessionState>,
    thought: &str,
) -> Result<String, SessionStateError> {
    let state = session_state.get_or_insert_with(SessionState::new);
    let thoughts = state.append(THOUGHTS_KEY, Value::String(thought.to_string()))?;

    let lines: Vec<String> = thoughts
        .iter()
        .map(|t| match t {
            Value::String(s) => format!("- {}", s),
            other => format!("- {}", other),
        })
        .collect();

    Ok(format!("Thoughts:\n{}", lines.join("\n")).trim().to_string())
}

pub struct ThinkTool {
    tools: Arc<ThinkingTools>,
}

#[async_trait]
impl ToolTrait for ThinkTool {
    fn info(&self) -> ToolInfo {
        ToolInfo {
            name: "think".to_string(),
            description: THINK_DESCRIPTION.to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "thought": {
                        "type": "string",
                        "description": "A thought to think about and log"
                    }
                },
                "required": ["thought"]
            }),
        }
    }

    async fn execute(
        &self,
        session_state: &mut Option<SessionState>,
        arguments: Value,
    ) -> Result<String, ToolError> {
        let thought = arguments
            .get("thought")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'thought' argument".to_string()))?;

        Ok(self.tools.think(session_state, thought))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_think_accumulates_thoughts() {
        let tools = ThinkingTools::new(None);
        let mut state = Some(SessionState::new());

        assert_eq!(tools.think(&mut state, "a"), "Thoughts:\n- a");
        assert_eq!(tools.think(&mut state, "b"), "Thoughts:\n- a\n- b");
        assert_eq!(tools.think(&mut state, "c"), "Thoughts:\n- a\n- b\n- c");

        let state = state.unwrap();
        assert_eq!(state.get(THOUGHTS_KEY), Some(&json!(["a", "b", "c"])));
    }

    #[test]
    fn test_think_initialises_missing_state() {
        let tools = ThinkingTools::new(None);
        let mut state = None;

        assert_eq!(tools.think(&mut state, "first"), "Thoughts:\n- first");
        assert_eq!(state.unwrap().get(THOUGHTS_KEY), Some(&json!(["first"])));
    }

    #[test]
    fn test_think_keeps_other_state() {
        let tools = ThinkingTools::new(None);
        let mut shared = SessionState::new();
        shared.insert("shopping_list", json!(["milk"]));
        let mut state = Some(shared);

        tools.think(&mut state, "remember the milk");

        let state = state.unwrap();
        assert_eq!(state.get("shopping_list"), Some(&json!(["milk"])));
        assert_eq!(state.get(THOUGHTS_KEY), Some(&json!(["remember the milk"])));
    }

    #[test]
    fn test_think_trims_output() {
        let tools = ThinkingTools::new(None);
        let mut state = None;

        assert_eq!(tools.think(&mut state, "  padded  "), "Thoughts:\n-   padded");
    }

    #[test]
    fn test_think_reports_bad_state_as_text() {
        let tools = ThinkingTools::new(None);
        let mut shared = SessionState::new();
        shared.insert(THOUGHTS_KEY, json!(42));
        let mut state = Some(shared);

        let output = tools.think(&mut state, "a");
        assert_eq!(
            output,
            "Error recording thought: session state entry 'thoughts' is not a list (found a number)"
        );
    }

    #[test]
    fn test_default_and_custom_instructions() {
        assert_eq!(ThinkingTools::new(None).instructions(), THINKING_INSTRUCTIONS);
        assert_eq!(
            ThinkingTools::new(Some("Think first.".to_string())).instructions(),
            "Think first."
        );
    }

    #[test]
    fn test_toolkit_respects_think_flag() {
        let disabled = ToolkitConfig {
            enable_think: false,
            ..ToolkitConfig::default()
        };
        let toolkit = ThinkingTools::new(None).into_toolkit(&disabled);
        assert_eq!(toolkit.name, TOOLKIT_NAME);
        assert!(toolkit.tools.is_empty());

        let toolkit = ThinkingTools::new(None).into_toolkit(&ToolkitConfig::default());
        assert_eq!(toolkit.tool_names(), vec!["think".to_string()]);
        assert!(!toolkit.add_instructions);
    }

    #[tokio::test]
    async fn test_think_tool_execute() {
        let toolkit = ThinkingTools::new(None).into_toolkit(&ToolkitConfig::default());
        let tool = &toolkit.tools[0];
        let mut state = None;

        let output = tool.execute(&mut state, json!({"thought": "plan"})).await.unwrap();
        assert_eq!(output, "Thoughts:\n- plan");
        assert!(state.is_some());

        let err = tool.execute(&mut state, json!({"idea": "x"})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
