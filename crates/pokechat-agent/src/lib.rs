#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod agent;
pub mod error;
pub mod protocol;
pub mod provider;
pub mod tools;
pub mod types;

pub use agent::Agent;
pub use error::{AgentError, LlmError, ToolError};
pub use provider::CompletionProvider;
pub use provider::openai::OpenAiProvider;
pub use tools::{McpToolTransport, ToolDescriptor, ToolSession, ToolTransport};
