//! Interactive session flow.

use crate::{
    GuardrailEvent, GuardrailOutcome, Outline, QualityGuardrail, Story, StoryTeller, UserFeedback,
    UserRequest, parse_overall_score,
};
use bedtime_error::BedtimeResult;
use bedtime_interface::BedtimeDriver;
use tracing::{debug, info, instrument};

/// Operator-facing text channel.
///
/// The CLI implements this over stdin/stdout; tests script it.
pub trait Console {
    /// Show `prompt` and read one line of input, without its line ending.
    fn ask(&mut self, prompt: &str) -> BedtimeResult<String>;

    /// Show `text` followed by a line break.
    fn say(&mut self, text: &str) -> BedtimeResult<()>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn ask(&mut self, prompt: &str) -> BedtimeResult<String> {
        (**self).ask(prompt)
    }

    fn say(&mut self, text: &str) -> BedtimeResult<()> {
        (**self).say(text)
    }
}

/// What a completed session produced.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct SessionReport {
    /// The request the session served
    request: UserRequest,
    /// Outline, when outlining was enabled
    outline: Option<Outline>,
    /// Guardrail loop result
    guardrail: GuardrailOutcome,
    /// Story shown last: the guardrail result or the user rewrite
    final_story: Story,
    /// Whether the operator asked for changes
    user_rewrite: bool,
}

/// Runs one request-to-story conversation.
#[derive(Debug)]
pub struct Session<D> {
    teller: StoryTeller<D>,
}

impl<D: BedtimeDriver> Session<D> {
    /// Create a session over `teller`.
    pub fn new(teller: StoryTeller<D>) -> Self {
        Self { teller }
    }

    /// Run the full flow against `console`.
    ///
    /// # Errors
    ///
    /// Fails on an empty request, a console error or a service failure.
    /// Budget exhaustion is not an error.
    #[instrument(skip_all, fields(provider = self.teller.driver().provider_name()))]
    pub async fn run<C: Console>(&self, console: &mut C) -> BedtimeResult<SessionReport> {
        let request = UserRequest::new(console.ask("What kind of story do you want to hear? ")?)?;
        let show_feedback = console
            .ask("Do you want to see the judge feedback? (y/n): ")?
            .trim()
            .eq_ignore_ascii_case("y");
        debug!(show_feedback, "Session preferences read");

        console.say("\n Writing your story...\n")?;
        let settings = self.teller.config().session;

        let outline = if settings.use_outline {
            Some(self.teller.outline(&request).await?)
        } else {
            None
        };
        let mut story = self.teller.write_story(&request, outline.as_ref()).await?;

        let feedback = self.teller.judge(&story, &request).await?;
        info!(
            score = parse_overall_score(feedback.as_str()).value(),
            "Initial story judged"
        );
        if show_feedback {
            console.say("\n📝 Judge Feedback:\n")?;
            console.say(feedback.as_str())?;
        }

        if settings.pre_loop_revision {
            story = self.teller.revise(&story, &feedback, &request).await?;
        }

        let guardrail = QualityGuardrail::new(&self.teller)
            .run(story, &request, |event| match event {
                GuardrailEvent::Judged { feedback, .. } if show_feedback => {
                    console.say("\n📝 Judge Feedback (after revision):\n")?;
                    console.say(feedback.as_str())
                }
                GuardrailEvent::Judged { .. } => Ok(()),
                GuardrailEvent::Revising { .. } => {
                    console.say("Story quality below threshold. Revising again...\n")
                }
                GuardrailEvent::Exhausted { score } => console.say(&format!(
                    "Maximum revision attempts reached. Last Overall Score: {}.",
                    score
                )),
            })
            .await?;

        console.say("\n Here is your bedtime story:\n")?;
        console.say(guardrail.story().as_str())?;

        let reply =
            console.ask("\nWould you like to change anything? (Press Enter if you're happy): ")?;

        let (final_story, user_rewrite) = match UserFeedback::from_reply(reply) {
            Some(user_feedback) => {
                console.say("\n Updating the story based on your feedback...\n")?;
                let rewritten = self
                    .teller
                    .rewrite_with_feedback(guardrail.story(), &user_feedback)
                    .await?;
                console.say("\n Here is the updated bedtime story:\n")?;
                console.say(rewritten.as_str())?;
                (rewritten, true)
            }
            None => {
                console.say("\n Good night!")?;
                (guardrail.story().clone(), false)
            }
        };

        info!(
            accepted = guardrail.accepted(),
            user_rewrite, "Session complete"
        );

        Ok(SessionReport {
            request,
            outline,
            guardrail,
            final_story,
            user_rewrite,
        })
    }
}
