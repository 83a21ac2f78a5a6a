//! Command-line interface module.
//!
//! Argument parsing, the terminal console and the session runner.

mod commands;
mod console;
mod run;

pub use commands::Cli;
pub use console::StdConsole;
pub use run::{client_config, run_session, story_config};
