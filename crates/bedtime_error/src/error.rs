//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, IoError, ModelsError, StoryError};

/// Every error condition a Bedtime operation can surface.
///
/// # Examples
///
/// ```
/// use bedtime_error::{BedtimeError, IoError};
///
/// let io_err = IoError::new("stdin closed");
/// let err: BedtimeError = io_err.into();
/// assert!(format!("{}", err).contains("IO Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum BedtimeErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Console input/output error
    #[from(IoError)]
    Io(IoError),
    /// Model provider error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Story pipeline error
    #[from(StoryError)]
    Story(StoryError),
}

/// Bedtime error with kind discrimination.
///
/// # Examples
///
/// ```
/// use bedtime_error::{BedtimeErrorKind, BedtimeResult, ConfigError};
///
/// fn might_fail() -> BedtimeResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), BedtimeErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Bedtime Error: {}", _0)]
pub struct BedtimeError(Box<BedtimeErrorKind>);

impl BedtimeError {
    /// Create a new error from a kind.
    pub fn new(kind: BedtimeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BedtimeErrorKind {
        &self.0
    }

    /// Whether the underlying cause is a transient provider failure.
    pub fn is_retryable(&self) -> bool {
        use crate::RetryableError;
        match self.kind() {
            BedtimeErrorKind::Models(e) => e.is_retryable(),
            _ => false,
        }
    }
}

// Generic From implementation for any type that converts to BedtimeErrorKind
impl<T> From<T> for BedtimeError
where
    T: Into<BedtimeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Bedtime operations.
pub type BedtimeResult<T> = std::result::Result<T, BedtimeError>;
