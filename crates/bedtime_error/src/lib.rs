//! Error types for the Bedtime story generator.
//!
//! This crate provides the error types shared by every Bedtime crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use bedtime_error::{BedtimeResult, ConfigError};
//!
//! fn fetch_story() -> BedtimeResult<String> {
//!     Err(ConfigError::new("No model configured"))?
//! }
//!
//! match fetch_story() {
//!     Ok(story) => println!("Got: {}", story),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod io;
mod models;
mod story;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{BedtimeError, BedtimeErrorKind, BedtimeResult};
pub use io::IoError;
pub use models::{ModelsError, ModelsErrorKind, ModelsResult, OpenAIErrorKind, RetryableError};
pub use story::{StoryError, StoryErrorKind};
