//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Author of a message in a generation request.
///
/// # Examples
///
/// ```
/// use bedtime_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "System");
/// assert_eq!(Role::User.as_api_str(), "user");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// System messages provide context and instructions
    System,
    /// User messages are from the human
    User,
    /// Assistant messages are from the AI
    Assistant,
}

impl Role {
    /// Lowercase role name as used by chat-completion APIs.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}
