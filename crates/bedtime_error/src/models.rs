//! Model provider errors and retry classification.

/// OpenAI chat-completions error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum OpenAIErrorKind {
    /// API key not found in environment
    #[display("OPENAI_API_KEY environment variable not set")]
    MissingApiKey,
    /// Failed to build the HTTP client
    #[display("Failed to create OpenAI client: {}", _0)]
    ClientCreation(String),
    /// Transport-level failure (DNS, connection reset, TLS)
    #[display("HTTP request failed: {}", _0)]
    Http(String),
    /// Request exceeded the configured deadline
    #[display("Request timed out after {} seconds", _0)]
    Timeout(u64),
    /// Non-success status returned by the API
    #[display("API error {}: {}", status, message)]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// Provider rejected the credential
    #[display("Authentication failed: {}", _0)]
    Authentication(String),
    /// Response body could not be decoded
    #[display("Failed to parse response: {}", _0)]
    Parse(String),
    /// Response decoded but carried no message content
    #[display("Response contained no choices")]
    EmptyResponse,
}

impl OpenAIErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            OpenAIErrorKind::ApiError { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            OpenAIErrorKind::Http(_) => true,
            OpenAIErrorKind::Timeout(_) => true,
            _ => false,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            OpenAIErrorKind::ApiError { status, .. } => match *status {
                429 => (5000, 3, 40),
                503 => (2000, 5, 60),
                500 | 502 | 504 => (1000, 3, 8),
                408 => (2000, 4, 30),
                _ => (2000, 5, 60),
            },
            OpenAIErrorKind::Timeout(_) => (2000, 2, 30),
            OpenAIErrorKind::Http(_) => (1000, 3, 10),
            _ => (2000, 5, 60),
        }
    }
}

/// Model provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, derive_more::From)]
pub enum ModelsErrorKind {
    /// OpenAI-specific error
    #[display("OpenAI: {}", _0)]
    OpenAI(OpenAIErrorKind),

    /// Builder error (derive_builder failures)
    #[from(ignore)]
    #[display("Builder error: {}", _0)]
    Builder(String),
}

/// Model provider error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for model operations.
pub type ModelsResult<T> = Result<T, ModelsError>;

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use bedtime_error::{ModelsError, ModelsErrorKind, OpenAIErrorKind, RetryableError};
///
/// let err = ModelsError::new(ModelsErrorKind::OpenAI(OpenAIErrorKind::ApiError {
///     status: 503,
///     message: "Service unavailable".to_string(),
/// }));
///
/// assert!(err.is_retryable());
/// let (backoff, retries, _max_delay) = err.retry_strategy_params();
/// assert_eq!(backoff, 2000);
/// assert_eq!(retries, 5);
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 503, 429 or network timeouts return true.
    /// Permanent errors like 401 or 400 return false.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (2000, 5, 60)
    }
}

impl RetryableError for ModelsError {
    fn is_retryable(&self) -> bool {
        match &self.kind {
            ModelsErrorKind::OpenAI(kind) => kind.is_retryable(),
            ModelsErrorKind::Builder(_) => false,
        }
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match &self.kind {
            ModelsErrorKind::OpenAI(kind) => kind.retry_strategy_params(),
            ModelsErrorKind::Builder(_) => (2000, 5, 60),
        }
    }
}
