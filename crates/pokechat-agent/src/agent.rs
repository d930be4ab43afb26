use std::sync::Arc;

use pokechat_config::AgentConfig;
use rmcp::model::JsonObject;
use serde_json::Value;

use crate::error::AgentError;
use crate::provider::CompletionProvider;
use crate::provider::openai::OpenAiProvider;
use crate::tools::{McpToolTransport, ToolDescriptor, ToolTransport};
use crate::types::{CompletionRequest, Message, ToolChoiceMode, ToolDefinition};

/// Two-round tool-selecting chat agent
///
/// Each call to [`Agent::respond`] is an independent turn: the tool list is
/// fetched fresh, at most one tool is invoked, and nothing is remembered
/// afterwards.
pub struct Agent {
    provider: Arc<dyn CompletionProvider>,
    tools: Arc<dyn ToolTransport>,
    model: String,
    system_prompt: String,
}

impl Agent {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        tools: Arc<dyn ToolTransport>,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            tools,
            model: model.into(),
            system_prompt: system_prompt.into(),
        }
    }

    /// Wire an agent to the configured `OpenAI` endpoint and MCP tool server
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(
            Arc::new(OpenAiProvider::new(&config.llm)),
            Arc::new(McpToolTransport::new(config.tool_server_url.clone())),
            config.llm.model.clone(),
            config.system_prompt.clone(),
        )
    }

    /// Answer one user message
    #[tracing::instrument(skip_all, fields(provider = self.provider.name(), model = %self.model))]
    pub async fn respond(&self, message: &str) -> Result<String, AgentError> {
        let tools = self.tools.list_tools().await?;
        tracing::debug!(tools = tools.len(), "discovered tools");

        let first = self
            .provider
            .complete(&CompletionRequest {
                model: self.model.clone(),
                messages: vec![Message::system(&self.system_prompt), Message::user(message)],
                tools: Some(function_specs(tools)),
                tool_choice: Some(ToolChoiceMode::Auto),
            })
            .await?;

        let Some(call) = first.tool_calls.first() else {
            tracing::info!("answered without a tool");
            return Ok(first.content.unwrap_or_default());
        };

        if first.tool_calls.len() > 1 {
            tracing::debug!(proposed = first.tool_calls.len(), "ignoring all but the first tool call");
        }

        let arguments: JsonObject =
            serde_json::from_str(&call.function.arguments).map_err(|source| AgentError::InvalidArguments {
                tool: call.function.name.clone(),
                source,
            })?;

        tracing::info!(tool = %call.function.name, "invoking tool");
        let result = self.tools.call_tool(&call.function.name, arguments).await?;

        let second = self
            .provider
            .complete(&CompletionRequest {
                model: self.model.clone(),
                messages: vec![
                    Message::user(message),
                    Message::assistant_tool_calls(first.tool_calls.clone()),
                    Message::tool(&call.id, stringify(result)),
                ],
                tools: None,
                tool_choice: None,
            })
            .await?;

        if !second.tool_calls.is_empty() {
            tracing::debug!(proposed = second.tool_calls.len(), "discarding second-round tool calls");
        }

        Ok(second.content.unwrap_or_default())
    }
}

fn function_specs(tools: Vec<ToolDescriptor>) -> Vec<ToolDefinition> {
    tools
        .into_iter()
        .map(|t| ToolDefinition::function(t.name, t.description.unwrap_or_default(), t.input_schema))
        .collect()
}

/// Strings verbatim, everything else as compact JSON
fn stringify(result: Value) -> String {
    match result {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
