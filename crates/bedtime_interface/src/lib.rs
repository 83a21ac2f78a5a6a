//! Trait definitions for the Bedtime story generator.
//!
//! This crate defines the seam between the story pipeline and whichever
//! text-generation backend powers it.

mod traits;

pub use traits::BedtimeDriver;
