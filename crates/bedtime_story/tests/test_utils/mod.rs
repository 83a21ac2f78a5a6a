//! Test utilities for story pipeline tests.
//!
//! Provides a driver that answers each stage from a script and a console
//! that replays operator input.

#![allow(dead_code)]

use async_trait::async_trait;
use bedtime_core::{GenerateRequest, GenerateResponse, Output};
use bedtime_error::{
    BedtimeError, BedtimeResult, IoError, ModelsError, ModelsErrorKind, OpenAIErrorKind,
};
use bedtime_interface::BedtimeDriver;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Stage a prompt belongs to, recognized from its opening line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Outline,
    Story,
    Judge,
    Revise,
    UserRevision,
}

impl PromptKind {
    pub fn classify(prompt: &str) -> Self {
        if prompt.contains("You are a judge evaluating") {
            PromptKind::Judge
        } else if prompt.contains("preparing to write a bedtime story") {
            PromptKind::Outline
        } else if prompt.contains("revising a bedtime story based on user feedback") {
            PromptKind::UserRevision
        } else if prompt.contains("revising a bedtime story that is based on a user request") {
            PromptKind::Revise
        } else {
            PromptKind::Story
        }
    }
}

/// A recorded driver call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: PromptKind,
    pub prompt: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Driver answering from a script.
///
/// Judge calls pop scripted feedback in order (repeating the last entry once
/// the script runs out). Stories are numbered so tests can tell which
/// version reached the end: `STORY`, `REVISION 1`, `REVISION 2`, ...
#[derive(Clone)]
pub struct ScriptedDriver {
    judge_feedback: Arc<Mutex<VecDeque<String>>>,
    last_feedback: Arc<Mutex<String>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    fail_on: Option<PromptKind>,
}

impl ScriptedDriver {
    /// Create a driver whose judge returns `feedback` in order.
    pub fn new<I, S>(feedback: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            judge_feedback: Arc::new(Mutex::new(feedback.into_iter().map(Into::into).collect())),
            last_feedback: Arc::new(Mutex::new("No score given.".to_string())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
        }
    }

    /// Create a driver whose judge always returns `Overall Score: {score}`.
    pub fn with_scores(scores: &[u8]) -> Self {
        Self::new(scores.iter().map(|s| judge_text(*s)))
    }

    /// Fail with an authentication error on the first call of `kind`.
    pub fn failing_on(mut self, kind: PromptKind) -> Self {
        self.fail_on = Some(kind);
        self
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of times generate() was called.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of calls of a given kind.
    pub fn count(&self, kind: PromptKind) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.kind == kind)
            .count()
    }

    /// Sequence of call kinds, in order.
    pub fn kinds(&self) -> Vec<PromptKind> {
        self.calls.lock().unwrap().iter().map(|c| c.kind).collect()
    }

    fn next_judge_feedback(&self) -> String {
        let mut queue = self.judge_feedback.lock().unwrap();
        let mut last = self.last_feedback.lock().unwrap();
        if let Some(next) = queue.pop_front() {
            *last = next;
        }
        last.clone()
    }
}

/// Judge output carrying the given overall score.
pub fn judge_text(score: u8) -> String {
    format!(
        "1. Age appropriateness: 5 - gentle\n\
         2. Narrative structure: 3 - thin obstacle\n\
         Overall Score: {score}\n\
         - Give the cat a clearer goal"
    )
}

#[async_trait]
impl BedtimeDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> BedtimeResult<GenerateResponse> {
        let prompt = req.prompt_text();
        let kind = PromptKind::classify(&prompt);

        let revisions_so_far = self.count(PromptKind::Revise);
        let rewrites_so_far = self.count(PromptKind::UserRevision);

        self.calls.lock().unwrap().push(RecordedCall {
            kind,
            prompt,
            temperature: *req.temperature(),
            max_tokens: *req.max_tokens(),
        });

        if self.fail_on == Some(kind) {
            return Err(BedtimeError::from(ModelsError::new(ModelsErrorKind::OpenAI(
                OpenAIErrorKind::Authentication("invalid api key".to_string()),
            ))));
        }

        let text = match kind {
            PromptKind::Outline => "- Alice wants to find Bob's bell".to_string(),
            PromptKind::Story => "STORY".to_string(),
            PromptKind::Judge => self.next_judge_feedback(),
            PromptKind::Revise => format!("REVISION {}", revisions_so_far + 1),
            PromptKind::UserRevision => format!("USER REWRITE {}", rewrites_so_far + 1),
        };

        Ok(GenerateResponse::builder()
            .outputs(vec![Output::Text(text)])
            .build()
            .expect("Failed to build response"))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Console replaying scripted answers and capturing output.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub questions: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Everything written, joined with line breaks.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }
}

impl bedtime_story::Console for ScriptedConsole {
    fn ask(&mut self, prompt: &str) -> BedtimeResult<String> {
        self.questions.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| BedtimeError::from(IoError::new("console script exhausted")))
    }

    fn say(&mut self, text: &str) -> BedtimeResult<()> {
        self.output.push(text.to_string());
        Ok(())
    }
}
