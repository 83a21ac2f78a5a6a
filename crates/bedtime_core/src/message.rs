//! Message types for generation requests.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single text message sent to a generation backend.
///
/// # Examples
///
/// ```
/// use bedtime_core::{Message, MessageBuilder, Role};
///
/// let message = MessageBuilder::default()
///     .role(Role::User)
///     .content("Tell me a story")
///     .build()
///     .unwrap();
///
/// assert_eq!(message, Message::user("Tell me a story"));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct Message {
    /// The role of the message sender
    role: Role,
    /// The text content of the message
    content: String,
}

impl Message {
    /// Creates a new message builder.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
