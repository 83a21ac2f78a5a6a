//! Test utilities for Bedtime model tests.

use bedtime_core::{GenerateRequest, Message, Role};

/// Helper to create a test GenerateRequest using the builder pattern.
pub fn create_test_request(
    prompt: &str,
    model: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
) -> GenerateRequest {
    let message = Message::builder()
        .role(Role::User)
        .content(prompt)
        .build()
        .expect("Failed to build message");

    GenerateRequest::builder()
        .messages(vec![message])
        .max_tokens(max_tokens)
        .temperature(temperature)
        .model(model)
        .build()
        .expect("Failed to build test request")
}
