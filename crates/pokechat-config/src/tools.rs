use std::net::SocketAddr;

use serde::Deserialize;
use url::Url;

/// Default PokéAPI base URL
pub const DEFAULT_UPSTREAM_URL: &str = "https://pokeapi.co/api/v2/";

/// Tool server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolServerConfig {
    /// Address the tool server binds to
    #[serde(default = "default_listen_address")]
    pub listen_address: SocketAddr,
    /// Base URL of the upstream data service; resource paths are appended to it
    #[serde(default = "default_upstream_url")]
    pub upstream_url: Url,
    /// Prefix under which the MCP endpoint is mounted (`{mount_path}/mcp`)
    #[serde(default = "default_mount_path")]
    pub mount_path: String,
}

impl Default for ToolServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            upstream_url: default_upstream_url(),
            mount_path: default_mount_path(),
        }
    }
}

impl ToolServerConfig {
    /// Path of the MCP endpoint, e.g. `/api/mcp`
    pub fn mcp_path(&self) -> String {
        format!("{}/mcp", self.mount_path.trim_end_matches('/'))
    }
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

#[allow(clippy::missing_panics_doc)]
fn default_upstream_url() -> Url {
    Url::parse(DEFAULT_UPSTREAM_URL).expect("valid default URL")
}

fn default_mount_path() -> String {
    "/api".to_string()
}
