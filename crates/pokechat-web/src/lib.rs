#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod relay;
mod server;

pub use relay::relay;
pub use server::{WebServer, web_router};
