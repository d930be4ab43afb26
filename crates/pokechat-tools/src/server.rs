use std::net::SocketAddr;

use axum::routing::get;
use axum::{Json, Router};
use pokechat_config::ToolServerConfig;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult, PaginatedRequestParam,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use rmcp::{ErrorData, RoleServer, ServerHandler};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::catalog::{self, LookupArgs};
use crate::client::PokeApiClient;

/// MCP handler serving the PokéAPI catalog
///
/// Stateless: every call is an independent upstream lookup.
#[derive(Debug, Clone)]
pub struct PokeApiServer {
    client: PokeApiClient,
}

impl PokeApiServer {
    pub fn new(upstream_url: Url) -> Self {
        Self {
            client: PokeApiClient::new(upstream_url),
        }
    }

    /// Dispatch a tool call by name
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<serde_json::Map<String, Value>>,
    ) -> Result<Value, ErrorData> {
        let endpoint =
            catalog::find(name).ok_or_else(|| ErrorData::invalid_params(format!("unknown tool: {name}"), None))?;

        let args: LookupArgs = serde_json::from_value(Value::Object(arguments.unwrap_or_default()))
            .map_err(|e| ErrorData::invalid_params(format!("invalid arguments for {name}: {e}"), None))?;

        tracing::info!(tool = name, key = %args.name, "tool call");

        Ok(self.client.lookup(endpoint, &args.name).await?)
    }
}

impl ServerHandler for PokeApiServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Pokémon reference lookups. Every tool takes a single `name` argument: a resource name or \
                 numeric id."
                    .to_string(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(catalog::tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let data = self.invoke(&request.name, request.arguments).await?;
        Ok(CallToolResult::success(vec![Content::json(data)?]))
    }
}

/// Build the tool server router
///
/// `GET /` answers a status object and the MCP streamable HTTP endpoint is
/// nested at [`ToolServerConfig::mcp_path`].
pub fn tool_router(config: &ToolServerConfig) -> Router {
    let server = PokeApiServer::new(config.upstream_url.clone());

    let mcp_service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    Router::new()
        .route("/", get(status))
        .nest_service(&config.mcp_path(), mcp_service)
        .layer(TraceLayer::new_for_http())
}

async fn status() -> Json<Value> {
    Json(serde_json::json!({ "Server": "OK" }))
}

/// Tool server process
pub struct ToolServer {
    router: Router,
    listen_address: SocketAddr,
}

impl ToolServer {
    pub fn new(config: &ToolServerConfig) -> Self {
        Self {
            router: tool_router(config),
            listen_address: config.listen_address,
        }
    }

    /// Override the configured listen address
    #[must_use]
    pub const fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Consume the server and return the inner router
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve until `shutdown` is cancelled
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "tool server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
