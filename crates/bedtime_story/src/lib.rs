//! Story pipeline for the Bedtime story generator.
//!
//! A session turns a free-text request into a children's bedtime story:
//!
//! 1. Optionally outline the story
//! 2. Write a first draft
//! 3. Judge it and revise once with the feedback
//! 4. Run the [`QualityGuardrail`] until the judge's overall score passes or
//!    the attempt budget runs out
//! 5. Offer the operator one rewrite from their own feedback
//!
//! Every stage is a single call through a [`bedtime_interface::BedtimeDriver`],
//! so the whole flow runs unchanged against a scripted driver in tests.
//!
//! # Example
//!
//! ```no_run
//! use bedtime_models::OpenAIClient;
//! use bedtime_story::{Console, Session, StoryConfig, StoryTeller};
//! # use bedtime_error::BedtimeResult;
//!
//! # struct Stdio;
//! # impl Console for Stdio {
//! #     fn ask(&mut self, _prompt: &str) -> BedtimeResult<String> { Ok(String::new()) }
//! #     fn say(&mut self, _text: &str) -> BedtimeResult<()> { Ok(()) }
//! # }
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoryConfig::load()?;
//! let client = OpenAIClient::from_env(config.model.name.clone())?;
//! let session = Session::new(StoryTeller::new(client, config));
//! let report = session.run(&mut Stdio).await?;
//! println!("{}", report.final_story());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifacts;
mod config;
mod guardrail;
pub mod prompts;
mod score;
mod session;
mod teller;

pub use artifacts::{JudgeFeedback, Outline, Story, UserFeedback, UserRequest};
pub use config::{
    GuardrailSettings, ModelSettings, RetrySettings, SessionSettings, Stage, StageParams,
    StageTemperatures, StoryConfig,
};
pub use guardrail::{GuardrailEvent, GuardrailOutcome, QualityGuardrail};
pub use score::{OverallScore, extract_score, parse_overall_score};
pub use session::{Console, Session, SessionReport};
pub use teller::StoryTeller;
