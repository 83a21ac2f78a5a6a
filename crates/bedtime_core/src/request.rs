//! Request and response types for text generation.

use crate::{Message, Output, TokenUsage};
use bedtime_error::{BuilderError, BuilderErrorKind};
use serde::{Deserialize, Serialize};

/// Provider-neutral generation request.
///
/// # Examples
///
/// ```
/// use bedtime_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .max_tokens(Some(100))
///     .temperature(Some(0.7))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 1);
/// assert_eq!(*request.max_tokens(), Some(100));
/// assert!(request.model().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// The conversation messages to send
    messages: Vec<Message>,
    /// Maximum number of tokens to generate
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    #[builder(default)]
    temperature: Option<f32>,
    /// Model identifier to use (falls back to the driver's model)
    #[builder(default)]
    model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Concatenated text of every message, in order.
    pub fn prompt_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content().as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use bedtime_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse::builder()
///     .outputs(vec![Output::Text("Once upon a time".to_string())])
///     .build()
///     .unwrap();
///
/// assert_eq!(response.text(), Some("Once upon a time".to_string()));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerateResponse {
    /// The generated outputs from the model
    outputs: Vec<Output>,
    /// Token usage, when the provider reports it
    #[builder(default)]
    usage: Option<TokenUsage>,
}

impl GenerateResponse {
    /// Creates a new response builder.
    pub fn builder() -> GenerateResponseBuilder {
        GenerateResponseBuilder::default()
    }

    /// Joined text of all text outputs, or `None` when there is none.
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = self.outputs.iter().filter_map(Output::as_text).collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }
}

impl From<GenerateRequestBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: GenerateRequestBuilderError) -> Self {
        match err {
            GenerateRequestBuilderError::UninitializedField(field) => {
                BuilderError::new(BuilderErrorKind::MissingField(field.to_string()))
            }
            GenerateRequestBuilderError::ValidationError(msg) => {
                BuilderError::new(BuilderErrorKind::ValidationFailed(msg))
            }
        }
    }
}
