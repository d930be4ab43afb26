use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Default OpenAI-compatible API base URL
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Default instruction sent with the first completion of every turn
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a Pokémon expert. Use tools when needed.";

/// Agent loop configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// MCP endpoint of the tool server
    #[serde(default = "default_tool_server_url")]
    pub tool_server_url: Url,
    /// System instruction for the tool-selection round
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Completion provider settings
    #[serde(default)]
    pub llm: LlmConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            tool_server_url: default_tool_server_url(),
            system_prompt: default_system_prompt(),
            llm: LlmConfig::default(),
        }
    }
}

/// OpenAI-compatible completion provider settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// API key for bearer authentication
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// File whose first line holds the API key
    ///
    /// Resolved into `api_key` when the configuration is loaded.
    #[serde(default)]
    pub api_key_file: Option<PathBuf>,
    /// Base URL; `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_file: None,
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

impl LlmConfig {
    /// Return the API key, failing when none was configured
    ///
    /// # Errors
    ///
    /// Returns an error if neither `api_key` nor `api_key_file` was set
    pub fn require_api_key(&self) -> anyhow::Result<&SecretString> {
        self.api_key
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("agent.llm.api_key or agent.llm.api_key_file must be configured"))
    }
}

#[allow(clippy::missing_panics_doc)]
fn default_tool_server_url() -> Url {
    Url::parse("http://localhost:8000/api/mcp").expect("valid default URL")
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

#[allow(clippy::missing_panics_doc)]
fn default_base_url() -> Url {
    Url::parse(DEFAULT_LLM_BASE_URL).expect("valid default URL")
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
