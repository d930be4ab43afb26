//! MCP tool-server access
//!
//! Every operation opens its own [`ToolSession`], does one request, and
//! closes it. Nothing is cached between turns.

use std::borrow::Cow;

use async_trait::async_trait;
use rmcp::model::{CallToolRequestParam, CallToolResult, JsonObject, RawContent, Tool};
use rmcp::service::{RoleClient, RunningService, ServiceError, ServiceExt as _};
use rmcp::transport::StreamableHttpClientTransport;
use rmcp::transport::streamable_http_client::StreamableHttpClientTransportConfig;
use serde_json::Value;
use url::Url;

use crate::error::ToolError;

/// A tool as advertised by the tool server
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: Option<String>,
    /// JSON Schema of the arguments object
    pub input_schema: Value,
}

impl From<Tool> for ToolDescriptor {
    fn from(tool: Tool) -> Self {
        Self {
            name: tool.name.into_owned(),
            description: tool.description.map(Cow::into_owned),
            input_schema: Value::Object((*tool.input_schema).clone()),
        }
    }
}

/// Source of tools for the agent
#[async_trait]
pub trait ToolTransport: Send + Sync {
    /// Fetch the current tool list
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ToolError>;

    /// Invoke one tool and return its result as JSON
    async fn call_tool(&self, name: &str, arguments: JsonObject) -> Result<Value, ToolError>;
}

/// One MCP client session against the tool server
///
/// Call [`ToolSession::close`] when done. A session dropped without closing
/// (early return, cancelled future) still cancels its background service.
pub struct ToolSession {
    service: Option<RunningService<RoleClient, ()>>,
}

impl ToolSession {
    /// Connect and complete the MCP handshake
    pub async fn open(client: reqwest::Client, url: &Url) -> Result<Self, ToolError> {
        let transport = StreamableHttpClientTransport::with_client(
            client,
            StreamableHttpClientTransportConfig::with_uri(url.as_str()),
        );

        let service = ()
            .serve(transport)
            .await
            .map_err(|e| ToolError::Transport(format!("handshake with {url} failed: {e}")))?;

        tracing::debug!(%url, "tool session opened");

        Ok(Self { service: Some(service) })
    }

    fn service(&self) -> Result<&RunningService<RoleClient, ()>, ToolError> {
        self.service
            .as_ref()
            .ok_or_else(|| ToolError::Transport("tool session already closed".to_owned()))
    }

    pub async fn list_tools(&self) -> Result<Vec<Tool>, ToolError> {
        self.service()?.list_all_tools().await.map_err(service_error)
    }

    pub async fn call_tool(&self, name: &str, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        self.service()?
            .call_tool(CallToolRequestParam {
                name: Cow::Owned(name.to_owned()),
                arguments: Some(arguments),
            })
            .await
            .map_err(service_error)
    }

    /// Shut the session down and wait for the service task to finish
    pub async fn close(mut self) {
        if let Some(service) = self.service.take()
            && let Err(e) = service.cancel().await
        {
            tracing::warn!(error = %e, "tool session did not shut down cleanly");
        }
    }
}

impl Drop for ToolSession {
    fn drop(&mut self) {
        // RunningService cancels itself on drop
        if self.service.take().is_some() {
            tracing::debug!("tool session dropped without close");
        }
    }
}

fn service_error(error: ServiceError) -> ToolError {
    match error {
        ServiceError::McpError(data) => ToolError::Execution(data.message.into_owned()),
        other => ToolError::Transport(other.to_string()),
    }
}

/// Reduce a tool result to one JSON value
///
/// Structured content wins. Otherwise a single text block is parsed as JSON
/// when possible, and several blocks become an array.
pub fn tool_output(result: CallToolResult) -> Result<Value, ToolError> {
    let texts: Vec<String> = result
        .content
        .into_iter()
        .filter_map(|c| match c.raw {
            RawContent::Text(t) => Some(t.text),
            _ => None,
        })
        .collect();

    if result.is_error == Some(true) {
        return Err(ToolError::Execution(texts.join("\n")));
    }

    if let Some(structured) = result.structured_content {
        return Ok(structured);
    }

    let parse = |text: String| serde_json::from_str(&text).unwrap_or(Value::String(text));

    Ok(match texts.len() {
        0 => Value::Null,
        1 => texts.into_iter().next().map_or(Value::Null, parse),
        _ => Value::Array(texts.into_iter().map(parse).collect()),
    })
}

/// [`ToolTransport`] over MCP streamable HTTP
#[derive(Debug, Clone)]
pub struct McpToolTransport {
    client: reqwest::Client,
    url: Url,
}

impl McpToolTransport {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl ToolTransport for McpToolTransport {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ToolError> {
        let session = ToolSession::open(self.client.clone(), &self.url).await?;
        let tools = session.list_tools().await;
        session.close().await;

        Ok(tools?.into_iter().map(ToolDescriptor::from).collect())
    }

    async fn call_tool(&self, name: &str, arguments: JsonObject) -> Result<Value, ToolError> {
        let session = ToolSession::open(self.client.clone(), &self.url).await?;
        let result = session.call_tool(name, arguments).await;
        session.close().await;

        tool_output(result?)
    }
}
