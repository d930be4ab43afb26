#![allow(clippy::must_use_candidate)]

pub mod agent;
mod env;
mod loader;
pub mod telemetry;
pub mod tools;
pub mod web;

use serde::Deserialize;

pub use agent::*;
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};
pub use tools::*;
pub use web::*;

/// Top-level PokéChat configuration
///
/// One file drives both processes: the tool server reads `[tools]`, the
/// web front end reads `[web]` and `[agent]`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tool server (PokéAPI catalog over MCP)
    #[serde(default)]
    pub tools: ToolServerConfig,
    /// Web front end
    #[serde(default)]
    pub web: WebConfig,
    /// Agent loop and completion provider
    #[serde(default)]
    pub agent: AgentConfig,
    /// Logging and trace export
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
