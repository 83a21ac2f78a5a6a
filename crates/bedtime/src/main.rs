//! Bedtime CLI binary.
//!
//! Asks for a story request on stdin, writes a bedtime story with an
//! automated judge-and-revise pass, and offers one rewrite from the
//! operator's feedback. Logs go to stderr.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, StdConsole, run_session};

    // Load .env before reading OPENAI_API_KEY
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut console = StdConsole::new();
    run_session(&cli, &mut console).await?;

    Ok(())
}
