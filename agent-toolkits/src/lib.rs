pub mod clients;
pub mod config;
pub mod core;
pub mod memory;
pub mod prompts;
pub mod tools;

pub use clients::{HackerNewsClient, HackerNewsError, Story, UserRecord, UserSummary};
pub use config::{ConfigError, ToolkitConfig, load_config};
pub use core::{Agent, AgentError, ToolCall};
pub use memory::{SessionState, SessionStateError};
pub use prompts::build_tools_prompt;
pub use tools::{HackerNewsTools, ThinkingTools, ToolManager, ToolTrait, Toolkit, default_tools};
