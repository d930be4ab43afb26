use thiserror::Error;

/// Errors from the completion provider
#[derive(Debug, Error)]
pub enum LlmError {
    /// Provider was unreachable, rejected the request, or sent an undecodable body
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Provider answered without any choice
    #[error("provider returned no choices")]
    EmptyResponse,
}

/// Errors from the tool server
#[derive(Debug, Error)]
pub enum ToolError {
    /// Connection, handshake, or protocol failure
    #[error("transport error: {0}")]
    Transport(String),

    /// The server rejected the call or the tool reported an error
    #[error("tool execution failed: {0}")]
    Execution(String),
}

/// Errors that abort an agent turn
///
/// Nothing is retried; the first failure ends the turn.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Completion(#[from] LlmError),

    /// Tool-call arguments were not a JSON object
    #[error("invalid arguments for tool `{tool}`: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}
