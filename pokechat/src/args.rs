use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// PokéChat
#[derive(Debug, Parser)]
#[command(name = "pokechat", about = "Pokémon chat assistant backed by PokéAPI tools")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "pokechat.toml", env = "POKECHAT_CONFIG", global = true)]
    pub config: PathBuf,

    /// Override the listen address of the serving command
    #[arg(long, env = "POKECHAT_LISTEN", global = true)]
    pub listen: Option<SocketAddr>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the PokéAPI tool catalog over MCP
    Tools,
    /// Serve the chat page and WebSocket endpoint
    Web,
    /// Answer a single message and exit
    Ask {
        /// The question to ask
        message: String,
    },
}
