//! Session command handler.

use super::Cli;
use bedtime_error::{BedtimeResult, ModelsError, ModelsErrorKind, OpenAIErrorKind};
use bedtime_models::{OpenAIClient, OpenAIConfig};
use bedtime_story::{Console, Session, StoryConfig, StoryTeller};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Load layered configuration and apply command-line overrides.
///
/// # Errors
///
/// Returns an error if a configuration file is unreadable or the final
/// values fail validation.
pub fn story_config(cli: &Cli) -> BedtimeResult<StoryConfig> {
    let mut config = StoryConfig::load_with(cli.config.as_deref())?;
    apply_overrides(&mut config, cli);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut StoryConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.model.name = model.clone();
    }
    if cli.outline {
        config.session.use_outline = true;
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.guardrail.max_attempts = max_attempts;
    }
    if cli.no_retry {
        config.retry.enabled = false;
    }
}

/// Build the OpenAI client settings from story configuration.
///
/// # Errors
///
/// Returns an error if the settings cannot be assembled.
pub fn client_config(config: &StoryConfig, api_key: String) -> BedtimeResult<OpenAIConfig> {
    let client = OpenAIConfig::builder()
        .api_key(api_key)
        .model(config.model.name.clone())
        .base_url(config.model.base_url.clone())
        .timeout(Duration::from_secs(config.model.timeout_secs))
        .no_retry(!config.retry.enabled)
        .max_retries(Some(config.retry.max_retries))
        .retry_backoff_ms(Some(config.retry.initial_backoff_ms))
        .max_delay_secs(Some(config.retry.max_delay_secs))
        .build()
        .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))?;
    Ok(client)
}

/// Run one interactive story session.
///
/// # Errors
///
/// Fails when configuration is invalid, `OPENAI_API_KEY` is missing, or the
/// session hits a fatal service or console error.
#[instrument(skip_all)]
pub async fn run_session<C: Console>(cli: &Cli, console: &mut C) -> BedtimeResult<()> {
    let config = story_config(cli)?;
    debug!(?config, "Configuration loaded");

    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| ModelsError::new(OpenAIErrorKind::MissingApiKey.into()))?;
    let client = OpenAIClient::new(client_config(&config, api_key)?)?;

    info!(
        model = %config.model.name,
        outline = config.session.use_outline,
        max_attempts = config.guardrail.max_attempts,
        "Starting story session"
    );

    let session = Session::new(StoryTeller::new(client, config));
    let report = session.run(console).await?;

    info!(
        accepted = report.guardrail().accepted(),
        score = report.guardrail().last_score().value(),
        user_rewrite = report.user_rewrite(),
        "Story delivered"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_configuration() {
        let cli = Cli {
            model: Some("gpt-4o-mini".to_string()),
            outline: true,
            max_attempts: Some(5),
            no_retry: true,
            ..Default::default()
        };
        let mut config = StoryConfig::default();
        apply_overrides(&mut config, &cli);

        assert_eq!(config.model.name, "gpt-4o-mini");
        assert!(config.session.use_outline);
        assert_eq!(config.guardrail.max_attempts, 5);
        assert!(!config.retry.enabled);
    }

    #[test]
    fn absent_flags_keep_configuration() {
        let mut config = StoryConfig::default();
        apply_overrides(&mut config, &Cli::default());
        assert_eq!(config, StoryConfig::default());
    }

    #[test]
    fn client_settings_follow_configuration() {
        let mut config = StoryConfig::default();
        config.retry.enabled = false;
        config.model.timeout_secs = 45;

        let client = client_config(&config, "sk-test".to_string()).unwrap();
        assert_eq!(client.model(), "gpt-3.5-turbo");
        assert_eq!(client.base_url(), "https://api.openai.com/v1");
        assert_eq!(*client.timeout(), Duration::from_secs(45));
        assert!(client.no_retry());
        assert_eq!(*client.max_retries(), Some(3));
        assert_eq!(*client.retry_backoff_ms(), Some(1000));
        assert_eq!(*client.max_delay_secs(), Some(30));
    }
}
