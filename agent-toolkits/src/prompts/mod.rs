use crate::tools::ToolInfo;

pub const THINKING_INSTRUCTIONS: &str = "## Using the think tool
Before taking any action or responding to the user after receiving
tool results, use the think tool as a scratchpad to:

- List the specific rules that apply to the current request
- Check if all required information is collected
- Verify that the planned action complies with all policies
- Iterate over tool results for correctness

## Rules
- Use the think tool generously to jot down thoughts and ideas.";

pub const THINK_DESCRIPTION: &str = "Use the tool to think about something. It will not obtain new information or make any changes, but just log the thought. Use it when complex reasoning or brainstorming is needed. Common use cases: brainstorming fixes for a bug, planning a refactoring, weighing design tradeoffs, or organizing hypotheses while debugging. Returns the full log of thoughts so far.";

/// Builds the host prompt section listing the available tools, followed by
/// any toolkit instructions.
pub fn build_tools_prompt(tools: &[ToolInfo], instructions: &[String]) -> String {
    let tools_section = if tools.is_empty() {
        "You have no tools available.".to_string()
    } else {
        let tool_descriptions: Vec<String> = tools
            .iter()
            .map(|t| format!("- {}: {}", t.name, t.description))
            .collect();
        format!(
            "You have access to the following tools:\n{}",
            tool_descriptions.join("\n")
        )
    };

    if instructions.is_empty() {
        return tools_section;
    }

    format!("{}\n\n{}", tools_section, instructions.join("\n\n"))
}
