#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod catalog;
pub mod client;
pub mod error;
pub mod server;

pub use catalog::{Endpoint, LookupArgs, LookupStep};
pub use client::PokeApiClient;
pub use error::PokeApiError;
pub use server::{PokeApiServer, ToolServer, tool_router};
