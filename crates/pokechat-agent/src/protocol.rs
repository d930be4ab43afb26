//! `OpenAI` chat completion API wire format types

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::types::{
    CompletionRequest, CompletionResponse, FunctionCall, Message, Role, ToolCall, ToolChoiceMode, ToolDefinition,
};

// -- Request types --

/// `OpenAI` chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiRequest {
    pub model: String,
    pub messages: Vec<OpenAiMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<OpenAiTool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
}

/// `OpenAI` message within a request or response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OpenAiToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// `OpenAI` tool definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiTool {
    /// Always "function"
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: OpenAiFunction,
}

/// `OpenAI` function specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiFunction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// `OpenAI` tool call within a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub tool_type: String,
    pub function: OpenAiFunctionCall,
}

/// Function call details within an `OpenAI` tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiFunctionCall {
    pub name: String,
    /// JSON-encoded arguments string
    #[serde(default)]
    pub arguments: String,
}

fn function_type() -> String {
    "function".to_owned()
}

// -- Response types --

/// `OpenAI` chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<OpenAiChoice>,
}

/// Single choice in a completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiChoice {
    #[serde(default)]
    pub index: u32,
    pub message: OpenAiMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

// -- Conversions --

const fn role_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    }
}

impl From<&ToolCall> for OpenAiToolCall {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            tool_type: function_type(),
            function: OpenAiFunctionCall {
                name: call.function.name.clone(),
                arguments: call.function.arguments.clone(),
            },
        }
    }
}

impl From<OpenAiToolCall> for ToolCall {
    fn from(call: OpenAiToolCall) -> Self {
        Self {
            id: call.id,
            function: FunctionCall {
                name: call.function.name,
                arguments: call.function.arguments,
            },
        }
    }
}

impl From<&Message> for OpenAiMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: role_str(message.role).to_owned(),
            content: message.content.clone(),
            tool_calls: message
                .tool_calls
                .as_ref()
                .map(|calls| calls.iter().map(OpenAiToolCall::from).collect()),
            tool_call_id: message.tool_call_id.clone(),
        }
    }
}

impl From<&ToolDefinition> for OpenAiTool {
    fn from(tool: &ToolDefinition) -> Self {
        Self {
            tool_type: tool.tool_type.clone(),
            function: OpenAiFunction {
                name: tool.function.name.clone(),
                description: Some(tool.function.description.clone()),
                parameters: Some(tool.function.parameters.clone()),
            },
        }
    }
}

impl From<&CompletionRequest> for OpenAiRequest {
    fn from(request: &CompletionRequest) -> Self {
        Self {
            model: request.model.clone(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            tools: request
                .tools
                .as_ref()
                .map(|tools| tools.iter().map(OpenAiTool::from).collect()),
            tool_choice: request.tool_choice.map(|mode| match mode {
                ToolChoiceMode::Auto => "auto".to_owned(),
            }),
        }
    }
}

impl TryFrom<OpenAiResponse> for CompletionResponse {
    type Error = LlmError;

    /// Take the first choice's assistant message
    fn try_from(response: OpenAiResponse) -> Result<Self, Self::Error> {
        let choice = response.choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;

        Ok(Self {
            content: choice.message.content,
            tool_calls: choice
                .message
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .map(ToolCall::from)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_serializes_tool_round() {
        let call = ToolCall {
            id: "call_1".to_owned(),
            function: FunctionCall {
                name: "get_pokemon".to_owned(),
                arguments: r#"{"name":"pikachu"}"#.to_owned(),
            },
        };

        let request = CompletionRequest {
            model: "gpt-4.1-mini".to_owned(),
            messages: vec![
                Message::user("Tell me about Pikachu"),
                Message::assistant_tool_calls(vec![call]),
                Message::tool("call_1", r#"{"id":25}"#),
            ],
            tools: None,
            tool_choice: None,
        };

        let wire = serde_json::to_value(OpenAiRequest::from(&request)).unwrap();

        assert_eq!(
            wire,
            json!({
                "model": "gpt-4.1-mini",
                "messages": [
                    {"role": "user", "content": "Tell me about Pikachu"},
                    {"role": "assistant", "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "get_pokemon", "arguments": "{\"name\":\"pikachu\"}"}
                    }]},
                    {"role": "tool", "content": "{\"id\":25}", "tool_call_id": "call_1"}
                ]
            })
        );
    }

    #[test]
    fn request_serializes_tools_and_choice() {
        let request = CompletionRequest {
            model: "m".to_owned(),
            messages: vec![Message::system("sys")],
            tools: Some(vec![ToolDefinition::function(
                "get_berry",
                "Fetch a berry",
                json!({"type": "object"}),
            )]),
            tool_choice: Some(ToolChoiceMode::Auto),
        };

        let wire = serde_json::to_value(OpenAiRequest::from(&request)).unwrap();

        assert_eq!(wire["tool_choice"], "auto");
        assert_eq!(wire["tools"][0]["type"], "function");
        assert_eq!(wire["tools"][0]["function"]["name"], "get_berry");
        assert_eq!(wire["tools"][0]["function"]["parameters"], json!({"type": "object"}));
    }

    #[test]
    fn response_takes_first_choice() {
        let wire: OpenAiResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "model": "gpt-4.1-mini",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "get_move", "arguments": "{\"name\":\"surf\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        }))
        .unwrap();

        let response = CompletionResponse::try_from(wire).unwrap();
        assert_eq!(response.content, None);
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].function.name, "get_move");
    }

    #[test]
    fn response_without_choices_is_empty() {
        let wire: OpenAiResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            CompletionResponse::try_from(wire),
            Err(LlmError::EmptyResponse)
        ));
    }
}
