//! Text values passed between pipeline stages.
//!
//! Every artifact is an immutable string newtype. A revision produces a new
//! [`Story`] rather than editing the old one.

use bedtime_error::{StoryError, StoryErrorKind};

macro_rules! text_artifact {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
        #[display("{}", _0)]
        pub struct $name(String);

        impl $name {
            /// Borrow the underlying text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

text_artifact!(
    /// The free-text story request as the operator typed it.
    ///
    /// Created once per session and embedded verbatim in every prompt that
    /// needs it.
    UserRequest
);

text_artifact!(
    /// Bullet-point plan generated before the prose.
    Outline
);

text_artifact!(
    /// A complete story text.
    Story
);

text_artifact!(
    /// Evaluator output, kept as returned.
    JudgeFeedback
);

text_artifact!(
    /// Change request typed by the operator after reading the story.
    UserFeedback
);

// Model output needs no validation
impl From<String> for Outline {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<String> for Story {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<String> for JudgeFeedback {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl UserRequest {
    /// Validate and wrap a request.
    ///
    /// The text is kept verbatim; only an all-whitespace request is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`StoryErrorKind::EmptyRequest`] when `text` is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedtime_story::UserRequest;
    ///
    /// let request = UserRequest::new("A story about a brave snail").unwrap();
    /// assert_eq!(request.as_str(), "A story about a brave snail");
    /// assert!(UserRequest::new("   ").is_err());
    /// ```
    #[track_caller]
    pub fn new(text: impl Into<String>) -> Result<Self, StoryError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(StoryError::new(StoryErrorKind::EmptyRequest));
        }
        Ok(Self(text))
    }
}

impl UserFeedback {
    /// Interpret a console reply. A blank reply means "no changes".
    pub fn from_reply(reply: impl Into<String>) -> Option<Self> {
        let reply = reply.into();
        if reply.trim().is_empty() {
            None
        } else {
            Some(Self(reply))
        }
    }
}
