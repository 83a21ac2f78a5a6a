//! End-to-end session flow with a scripted driver and console.

mod test_utils;

use bedtime_error::{BedtimeErrorKind, StoryErrorKind};
use bedtime_story::{Session, StoryConfig, StoryTeller};
use test_utils::{PromptKind, ScriptedConsole, ScriptedDriver};

const REQUEST: &str = "a story about a girl named Alice and her cat Bob";

fn session(driver: &ScriptedDriver, config: StoryConfig) -> Session<ScriptedDriver> {
    Session::new(StoryTeller::new(driver.clone(), config))
}

#[tokio::test]
async fn test_passing_judge_keeps_pre_loop_story() -> anyhow::Result<()> {
    let driver = ScriptedDriver::with_scores(&[5]);
    let mut console = ScriptedConsole::new([REQUEST, "n", ""]);

    let report = session(&driver, StoryConfig::default())
        .run(&mut console)
        .await?;

    assert_eq!(
        driver.kinds(),
        vec![
            PromptKind::Story,
            PromptKind::Judge,
            PromptKind::Revise,
            PromptKind::Judge,
        ]
    );
    assert_eq!(*report.guardrail().revisions(), 0);
    assert!(*report.guardrail().accepted());
    assert_eq!(report.final_story().as_str(), "REVISION 1");
    assert!(!*report.user_rewrite());

    let transcript = console.transcript();
    assert!(transcript.contains("\n Writing your story...\n"));
    assert!(transcript.contains("\n Here is your bedtime story:\n\nREVISION 1"));
    assert!(transcript.ends_with("\n Good night!"));
    assert!(!transcript.contains("Judge Feedback"));
    Ok(())
}

#[tokio::test]
async fn test_failing_judge_exhausts_budget() -> anyhow::Result<()> {
    let driver = ScriptedDriver::with_scores(&[2]);
    let mut console = ScriptedConsole::new([REQUEST, "n", ""]);

    let report = session(&driver, StoryConfig::default())
        .run(&mut console)
        .await?;

    // One pre-loop revision plus one per guardrail attempt
    assert_eq!(driver.count(PromptKind::Revise), 3);
    assert_eq!(*report.guardrail().revisions(), 2);
    assert!(!*report.guardrail().accepted());
    assert_eq!(report.final_story().as_str(), "REVISION 3");

    let transcript = console.transcript();
    assert_eq!(
        transcript
            .matches("Story quality below threshold. Revising again...")
            .count(),
        2
    );
    assert!(transcript.contains("Maximum revision attempts reached. Last Overall Score: 2."));
    Ok(())
}

#[tokio::test]
async fn test_malformed_feedback_triggers_revision() -> anyhow::Result<()> {
    let driver = ScriptedDriver::new([
        "A charming tale with a sweet ending.".to_string(),
        "A charming tale with a sweet ending.".to_string(),
        test_utils::judge_text(5),
    ]);
    let mut console = ScriptedConsole::new([REQUEST, "n", ""]);

    let report = session(&driver, StoryConfig::default())
        .run(&mut console)
        .await?;

    assert_eq!(*report.guardrail().revisions(), 1);
    assert!(*report.guardrail().accepted());
    assert_eq!(report.final_story().as_str(), "REVISION 2");
    assert!(
        console
            .transcript()
            .contains("Story quality below threshold. Revising again...")
    );
    Ok(())
}

#[tokio::test]
async fn test_user_feedback_triggers_one_rewrite() -> anyhow::Result<()> {
    let driver = ScriptedDriver::with_scores(&[5]);
    let mut console = ScriptedConsole::new([REQUEST, "y", "make the cat talk"]);

    let report = session(&driver, StoryConfig::default())
        .run(&mut console)
        .await?;

    assert_eq!(driver.count(PromptKind::UserRevision), 1);
    let rewrite = driver
        .calls()
        .into_iter()
        .find(|c| c.kind == PromptKind::UserRevision)
        .expect("rewrite call recorded");
    assert!(rewrite.prompt.contains("Current story:\n---\nREVISION 1\n---"));
    assert!(rewrite.prompt.contains("User feedback:\n---\nmake the cat talk\n---"));
    assert_eq!(rewrite.temperature, Some(0.7));

    assert!(*report.user_rewrite());
    assert_eq!(report.final_story().as_str(), "USER REWRITE 1");
    assert_eq!(report.guardrail().story().as_str(), "REVISION 1");

    let transcript = console.transcript();
    assert!(transcript.contains("\n📝 Judge Feedback:\n"));
    assert!(transcript.contains("\n📝 Judge Feedback (after revision):\n"));
    assert!(transcript.contains("\n Updating the story based on your feedback...\n"));
    assert!(transcript.ends_with("\n Here is the updated bedtime story:\n\nUSER REWRITE 1"));
    assert!(!transcript.contains("Good night!"));
    Ok(())
}

#[tokio::test]
async fn test_feedback_preference_is_case_insensitive() -> anyhow::Result<()> {
    let driver = ScriptedDriver::with_scores(&[4]);
    let mut console = ScriptedConsole::new([REQUEST, "  Y ", "   "]);

    session(&driver, StoryConfig::default())
        .run(&mut console)
        .await?;

    let transcript = console.transcript();
    assert!(transcript.contains("Overall Score: 4"));
    assert!(transcript.ends_with("\n Good night!"));
    assert_eq!(driver.count(PromptKind::UserRevision), 0);
    Ok(())
}

#[tokio::test]
async fn test_questions_are_asked_in_order() -> anyhow::Result<()> {
    let driver = ScriptedDriver::with_scores(&[5]);
    let mut console = ScriptedConsole::new([REQUEST, "n", ""]);

    session(&driver, StoryConfig::default())
        .run(&mut console)
        .await?;

    assert_eq!(
        console.questions,
        vec![
            "What kind of story do you want to hear? ",
            "Do you want to see the judge feedback? (y/n): ",
            "\nWould you like to change anything? (Press Enter if you're happy): ",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_outline_guides_first_draft() -> anyhow::Result<()> {
    let driver = ScriptedDriver::with_scores(&[5]);
    let mut console = ScriptedConsole::new([REQUEST, "n", ""]);
    let mut config = StoryConfig::default();
    config.session.use_outline = true;

    let report = session(&driver, config).run(&mut console).await?;

    let calls = driver.calls();
    assert_eq!(calls[0].kind, PromptKind::Outline);
    assert_eq!(calls[0].temperature, Some(0.3));
    assert_eq!(calls[1].kind, PromptKind::Story);
    assert!(
        calls[1]
            .prompt
            .contains("Follow this internal outline to guide the story:\n- Alice wants to find Bob's bell")
    );
    assert!(report.outline().is_some());
    Ok(())
}

#[tokio::test]
async fn test_pre_loop_revision_can_be_disabled() -> anyhow::Result<()> {
    let driver = ScriptedDriver::with_scores(&[5]);
    let mut console = ScriptedConsole::new([REQUEST, "n", ""]);
    let mut config = StoryConfig::default();
    config.session.pre_loop_revision = false;

    let report = session(&driver, config).run(&mut console).await?;

    assert_eq!(
        driver.kinds(),
        vec![PromptKind::Story, PromptKind::Judge, PromptKind::Judge]
    );
    assert_eq!(report.final_story().as_str(), "STORY");
    Ok(())
}

#[tokio::test]
async fn test_empty_request_is_rejected() -> anyhow::Result<()> {
    let driver = ScriptedDriver::with_scores(&[5]);
    let mut console = ScriptedConsole::new(["   "]);

    let err = session(&driver, StoryConfig::default())
        .run(&mut console)
        .await
        .expect_err("blank request must fail");

    match err.kind() {
        BedtimeErrorKind::Story(e) => assert_eq!(e.kind, StoryErrorKind::EmptyRequest),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(driver.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_service_failure_aborts_session() -> anyhow::Result<()> {
    let driver = ScriptedDriver::with_scores(&[5]).failing_on(PromptKind::Judge);
    let mut console = ScriptedConsole::new([REQUEST, "n", ""]);

    let err = session(&driver, StoryConfig::default())
        .run(&mut console)
        .await
        .expect_err("authentication failure is fatal");

    assert!(matches!(err.kind(), BedtimeErrorKind::Models(_)));
    assert!(!err.is_retryable());
    assert_eq!(driver.kinds(), vec![PromptKind::Story, PromptKind::Judge]);
    assert!(!console.transcript().contains("Here is your bedtime story"));
    Ok(())
}
