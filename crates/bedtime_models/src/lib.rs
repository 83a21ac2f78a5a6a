//! Text-generation provider integrations for Bedtime.
//!
//! Each provider implements [`bedtime_interface::BedtimeDriver`] so the story
//! pipeline can run against it unchanged.
//!
//! # Example
//!
//! ```no_run
//! use bedtime_models::OpenAIClient;
//! use bedtime_interface::BedtimeDriver;
//! use bedtime_core::{GenerateRequest, Message};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAIClient::from_env("gpt-3.5-turbo")?;
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Hello")])
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{:?}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;

pub use openai::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage, ChatResponseMessage, ChatUsage, DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAIClient, OpenAIConfig,
    OpenAIConfigBuilder,
};
