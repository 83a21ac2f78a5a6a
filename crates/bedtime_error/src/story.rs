//! Story pipeline error types.

/// Specific error conditions for story generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoryErrorKind {
    /// The operator supplied an empty story request
    #[display("Story request is empty")]
    EmptyRequest,
    /// The model returned no text for a stage
    #[display("Model returned no text for the {} stage", _0)]
    EmptyResponse(String),
    /// Story settings failed validation
    #[display("Invalid story configuration: {}", _0)]
    InvalidConfiguration(String),
}

/// Error type for story operations.
///
/// # Examples
///
/// ```
/// use bedtime_error::{StoryError, StoryErrorKind};
///
/// let err = StoryError::new(StoryErrorKind::EmptyResponse("judge".to_string()));
/// assert!(format!("{}", err).contains("judge stage"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Story Error: {} at line {} in {}", kind, line, file)]
pub struct StoryError {
    /// The specific error condition
    pub kind: StoryErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StoryError {
    /// Create a new StoryError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
