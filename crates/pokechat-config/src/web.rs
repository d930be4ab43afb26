use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

/// Web front end configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebConfig {
    /// Address the front end binds to
    #[serde(default = "default_listen_address")]
    pub listen_address: SocketAddr,
    /// Page served at `GET /`
    #[serde(default = "default_index_file")]
    pub index_file: PathBuf,
    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            index_file: default_index_file(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn default_index_file() -> PathBuf {
    PathBuf::from("templates/base.html")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}
