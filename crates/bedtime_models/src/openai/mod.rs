//! OpenAI chat-completions provider.

mod client;
mod dto;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAIClient, OpenAIConfig, OpenAIConfigBuilder};
pub use dto::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage, ChatResponseMessage, ChatUsage,
};
