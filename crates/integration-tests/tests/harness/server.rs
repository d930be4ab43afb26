//! In-process servers on random ports

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use pokechat_agent::Agent;
use pokechat_config::{ToolServerConfig, WebConfig};
use pokechat_tools::ToolServer;
use pokechat_web::WebServer;
use tokio_util::sync::CancellationToken;
use url::Url;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start the tool server
    pub async fn tools(config: &ToolServerConfig) -> anyhow::Result<Self> {
        Self::start(ToolServer::new(config).into_router()).await
    }

    /// Start the web front end around `agent`
    pub async fn web(config: &WebConfig, agent: Agent) -> anyhow::Result<Self> {
        Self::start(WebServer::new(config, Arc::new(agent)).into_router()).await
    }

    /// Serve `router` on `127.0.0.1:0`
    pub async fn start(router: Router) -> anyhow::Result<Self> {
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self {
            addr,
            shutdown,
            client: reqwest::Client::new(),
        })
    }

    /// URL of `path` on the running server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// WebSocket URL of `path` on the running server
    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{path}", self.addr)
    }

    /// MCP endpoint under the default mount path
    pub fn mcp_url(&self) -> Url {
        Url::parse(&self.url("/api/mcp")).unwrap()
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
