//! Bounded judge-then-revise loop.

use crate::{
    GuardrailSettings, JudgeFeedback, OverallScore, Story, StoryTeller, UserRequest,
    parse_overall_score,
};
use bedtime_error::BedtimeResult;
use bedtime_interface::BedtimeDriver;
use tracing::{info, instrument, warn};

/// Progress notifications emitted while the loop runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardrailEvent {
    /// A story was judged.
    Judged {
        /// One-based attempt number
        attempt: u32,
        /// Raw judge output
        feedback: JudgeFeedback,
        /// Score parsed from the feedback
        score: OverallScore,
    },
    /// The score fell short and a revision is being requested.
    Revising {
        /// One-based attempt number
        attempt: u32,
        /// Score that triggered the revision
        score: OverallScore,
    },
    /// The attempt budget ran out without a passing score.
    Exhausted {
        /// Last score seen (0 if nothing was judged)
        score: OverallScore,
    },
}

/// Result of a guardrail run.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct GuardrailOutcome {
    /// Final story: the accepted one, or the last revision
    story: Story,
    /// Last score observed
    last_score: OverallScore,
    /// Judge passes performed
    attempts: u32,
    /// Revisions produced
    revisions: u32,
    /// Whether a judged story met the threshold
    accepted: bool,
}

/// Judges a story and revises it until it passes or the budget runs out.
///
/// Each attempt judges the current story. A score at or above the threshold
/// accepts it. Otherwise the story is revised and one attempt is consumed.
/// The revision made on the final attempt is returned without being judged.
#[derive(Debug)]
pub struct QualityGuardrail<'a, D> {
    teller: &'a StoryTeller<D>,
    settings: GuardrailSettings,
}

impl<'a, D: BedtimeDriver> QualityGuardrail<'a, D> {
    /// Create a guardrail using the teller's configured settings.
    pub fn new(teller: &'a StoryTeller<D>) -> Self {
        Self {
            settings: teller.config().guardrail,
            teller,
        }
    }

    /// Override the budget and threshold.
    pub fn with_settings(mut self, settings: GuardrailSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Run the loop, reporting progress to `on_event`.
    ///
    /// # Errors
    ///
    /// Propagates service failures and any error returned by `on_event`.
    #[instrument(
        skip(self, story, request, on_event),
        fields(
            max_attempts = self.settings.max_attempts,
            threshold = self.settings.threshold,
        )
    )]
    pub async fn run<F>(
        &self,
        story: Story,
        request: &UserRequest,
        mut on_event: F,
    ) -> BedtimeResult<GuardrailOutcome>
    where
        F: FnMut(&GuardrailEvent) -> BedtimeResult<()>,
    {
        let mut story = story;
        let mut score = OverallScore::MISSING;
        let mut attempts = 0;
        let mut revisions = 0;

        for attempt in 1..=self.settings.max_attempts {
            attempts = attempt;
            let feedback = self.teller.judge(&story, request).await?;
            score = parse_overall_score(feedback.as_str());
            info!(attempt, score = score.value(), "Story judged");
            on_event(&GuardrailEvent::Judged {
                attempt,
                feedback: feedback.clone(),
                score,
            })?;

            if score.meets(self.settings.threshold) {
                return Ok(GuardrailOutcome {
                    story,
                    last_score: score,
                    attempts,
                    revisions,
                    accepted: true,
                });
            }

            on_event(&GuardrailEvent::Revising { attempt, score })?;
            story = self.teller.revise(&story, &feedback, request).await?;
            revisions += 1;
        }

        warn!(
            attempts,
            last_score = score.value(),
            "Maximum revision attempts reached"
        );
        on_event(&GuardrailEvent::Exhausted { score })?;

        Ok(GuardrailOutcome {
            story,
            last_score: score,
            attempts,
            revisions,
            accepted: false,
        })
    }
}
