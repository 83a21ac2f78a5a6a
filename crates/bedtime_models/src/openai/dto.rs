//! OpenAI chat-completions data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A message in a chat-completions conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ChatMessage {
    /// Message role ("system", "user" or "assistant")
    role: String,
    /// Message content
    content: String,
}

impl ChatMessage {
    /// Creates a message with the given role and content.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Chat-completions request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Whether to stream the response
    #[builder(default = "false")]
    stream: bool,
}

impl ChatCompletionRequest {
    /// Creates a new builder for `ChatCompletionRequest`.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::default()
    }
}

/// Assistant message returned inside a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatResponseMessage {
    /// Message role
    #[serde(default)]
    role: String,
    /// Generated text (absent on refusals)
    #[serde(default)]
    content: Option<String>,
    /// Refusal explanation, if the model declined
    #[serde(default)]
    refusal: Option<String>,
}

/// One completion alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatChoice {
    /// Position in the choices array
    #[serde(default)]
    index: u32,
    /// The generated message
    message: ChatResponseMessage,
    /// Why generation stopped ("stop", "length", ...)
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ChatUsage {
    /// Prompt tokens consumed
    #[serde(default)]
    prompt_tokens: u32,
    /// Completion tokens generated
    #[serde(default)]
    completion_tokens: u32,
}

/// Chat-completions response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatCompletionResponse {
    /// Response identifier
    #[serde(default)]
    id: String,
    /// Model that served the request
    #[serde(default)]
    model: String,
    /// Completion alternatives
    choices: Vec<ChatChoice>,
    /// Token usage
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_sampling_fields() {
        let request = ChatCompletionRequest::builder()
            .model("gpt-3.5-turbo")
            .messages(vec![ChatMessage::new("user", "hi")])
            .build()
            .unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("temperature").is_none());
        assert_eq!(json["stream"], serde_json::json!(false));
    }

    #[test]
    fn response_parses_minimal_body() {
        let body = r#"{
            "id": "chatcmpl-1",
            "model": "gpt-3.5-turbo",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Once upon a time"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.choices().len(), 1);
        assert_eq!(
            response.choices()[0].message().content().as_deref(),
            Some("Once upon a time")
        );
        assert_eq!(*response.usage().as_ref().unwrap().completion_tokens(), 4);
    }
}
