//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use pokechat_config::{AgentConfig, Config, LlmConfig, ToolServerConfig};
use secrecy::SecretString;
use url::Url;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config {
                tools: ToolServerConfig {
                    listen_address: SocketAddr::from(([127, 0, 0, 1], 0)),
                    ..ToolServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Point the tool server at a mock PokéAPI
    pub fn with_upstream(mut self, upstream_url: Url) -> Self {
        self.config.tools.upstream_url = upstream_url;
        self
    }

    /// Mount the MCP endpoint under `mount_path`
    pub fn with_mount_path(mut self, mount_path: &str) -> Self {
        self.config.tools.mount_path = mount_path.to_owned();
        self
    }

    /// Point the agent at a mock LLM and a running tool server
    pub fn with_agent(mut self, llm_base_url: &str, tool_server_url: Url) -> Self {
        self.config.agent = AgentConfig {
            tool_server_url,
            llm: LlmConfig {
                api_key: Some(SecretString::from("test-key")),
                base_url: llm_base_url.parse().unwrap(),
                ..LlmConfig::default()
            },
            ..AgentConfig::default()
        };
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
