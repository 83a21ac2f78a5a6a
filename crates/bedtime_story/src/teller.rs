//! Stage calls against a generation backend.

use crate::prompts::{
    judge_prompt, outline_prompt, revise_prompt, story_prompt, user_revision_prompt,
};
use crate::{
    JudgeFeedback, Outline, Stage, StageParams, Story, StoryConfig, UserFeedback, UserRequest,
};
use bedtime_core::{GenerateRequest, Message};
use bedtime_error::{BedtimeResult, BuilderError, StoryError, StoryErrorKind};
use bedtime_interface::BedtimeDriver;
use tracing::{debug, info, instrument};

/// Runs each pipeline stage as a single prompt/response exchange.
///
/// The teller keeps no conversation state; every call carries everything
/// the model needs inside its prompt.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct StoryTeller<D> {
    driver: D,
    config: StoryConfig,
}

impl<D: BedtimeDriver> StoryTeller<D> {
    /// Create a teller over `driver`.
    pub fn new(driver: D, config: StoryConfig) -> Self {
        Self { driver, config }
    }

    /// Send `prompt` as one user message and return the response text.
    ///
    /// # Errors
    ///
    /// Propagates driver failures. Returns
    /// [`StoryErrorKind::EmptyResponse`] when the model produced no text.
    #[instrument(
        skip(self, prompt),
        fields(
            stage = %params.stage,
            provider = self.driver.provider_name(),
            model = self.driver.model_name(),
            prompt_len = prompt.len(),
            temperature = params.temperature,
        )
    )]
    pub async fn invoke(&self, prompt: &str, params: StageParams) -> BedtimeResult<String> {
        let request = GenerateRequest::builder()
            .messages(vec![Message::user(prompt)])
            .max_tokens(Some(params.max_tokens))
            .temperature(Some(params.temperature))
            .build()
            .map_err(BuilderError::from)?;

        let response = self.driver.generate(&request).await?;

        let text = response.text().ok_or_else(|| {
            StoryError::new(StoryErrorKind::EmptyResponse(params.stage.to_string()))
        })?;

        debug!(
            response_len = text.len(),
            total_tokens = response.usage().as_ref().map(|u| u.total()),
            "Stage completed"
        );
        Ok(text)
    }

    async fn run_stage(&self, stage: Stage, prompt: String) -> BedtimeResult<String> {
        self.invoke(&prompt, self.config.stage_params(stage)).await
    }

    /// Generate a bullet-point plan for `request`.
    pub async fn outline(&self, request: &UserRequest) -> BedtimeResult<Outline> {
        info!("Generating outline");
        let text = self.run_stage(Stage::Outline, outline_prompt(request)).await?;
        Ok(Outline::from(text))
    }

    /// Generate the first draft, following `outline` when given.
    pub async fn write_story(
        &self,
        request: &UserRequest,
        outline: Option<&Outline>,
    ) -> BedtimeResult<Story> {
        info!(with_outline = outline.is_some(), "Writing story");
        let text = self
            .run_stage(Stage::Story, story_prompt(request, outline))
            .await?;
        Ok(Story::from(text))
    }

    /// Ask the evaluator to score `story`.
    pub async fn judge(&self, story: &Story, request: &UserRequest) -> BedtimeResult<JudgeFeedback> {
        info!("Judging story");
        let text = self
            .run_stage(Stage::Judge, judge_prompt(story, request))
            .await?;
        Ok(JudgeFeedback::from(text))
    }

    /// Rewrite `story` to address the judge's feedback.
    pub async fn revise(
        &self,
        story: &Story,
        feedback: &JudgeFeedback,
        request: &UserRequest,
    ) -> BedtimeResult<Story> {
        info!("Revising story from judge feedback");
        let text = self
            .run_stage(Stage::Revise, revise_prompt(story, feedback, request))
            .await?;
        Ok(Story::from(text))
    }

    /// Rewrite `story` according to the operator's feedback.
    pub async fn rewrite_with_feedback(
        &self,
        story: &Story,
        feedback: &UserFeedback,
    ) -> BedtimeResult<Story> {
        info!("Rewriting story from user feedback");
        let text = self
            .run_stage(Stage::UserRevision, user_revision_prompt(story, feedback))
            .await?;
        Ok(Story::from(text))
    }
}
