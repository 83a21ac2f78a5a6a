//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Bedtime - tell a bedtime story, judged and revised by a language model
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "bedtime")]
#[command(about = "Interactive bedtime story generator with an automated quality judge", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Extra configuration file, applied over bedtime.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Model identifier (overrides model.name)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Generate an outline before writing the story
    #[arg(long)]
    pub outline: bool,

    /// Judge passes in the quality loop (overrides guardrail.max_attempts)
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Fail on the first service error instead of retrying
    #[arg(long)]
    pub no_retry: bool,
}
