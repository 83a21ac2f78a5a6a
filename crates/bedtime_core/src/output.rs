//! Output types from generation responses.

use serde::{Deserialize, Serialize};

/// Content produced by a generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// The model declined to answer; carries the provider's explanation.
    Refusal(String),
}

impl Output {
    /// Text content, if this output is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(text) => Some(text),
            Output::Refusal(_) => None,
        }
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u32,
    /// Tokens generated in the completion
    pub completion_tokens: u32,
}

impl TokenUsage {
    /// Total tokens billed for the call.
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}
