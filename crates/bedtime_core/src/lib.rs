//! Core data types for the Bedtime story generator.
//!
//! This crate provides the provider-neutral request and response types that
//! flow between the story pipeline and a generation backend.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod output;
mod request;
mod role;

pub use message::{Message, MessageBuilder, MessageBuilderError};
pub use output::{Output, TokenUsage};
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateRequestBuilderError, GenerateResponse,
    GenerateResponseBuilder, GenerateResponseBuilderError,
};
pub use role::Role;
