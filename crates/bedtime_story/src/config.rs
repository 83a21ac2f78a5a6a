//! Story generator configuration.
//!
//! Values are layered, later sources overriding earlier ones:
//! 1. Bundled defaults (`bedtime.toml` shipped with the library)
//! 2. `~/.config/bedtime/bedtime.toml`
//! 3. `./bedtime.toml`
//! 4. An explicit file passed to [`StoryConfig::load_with`]
//!
//! Command-line flags are applied on top by the binary.

use bedtime_error::{BedtimeError, BedtimeResult, ConfigError, StoryError, StoryErrorKind};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../bedtime.toml");

/// Pipeline stage, used to select sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Stage {
    /// Bullet-point plan
    #[display("outline")]
    Outline,
    /// First draft
    #[display("story")]
    Story,
    /// Quality evaluation
    #[display("judge")]
    Judge,
    /// Judge-driven rewrite
    #[display("revise")]
    Revise,
    /// Operator-driven rewrite
    #[display("user_revision")]
    UserRevision,
}

/// Sampling parameters for one service call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageParams {
    /// Stage the call belongs to
    pub stage: Stage,
    /// Completion token cap
    pub max_tokens: u32,
    /// Sampling temperature in `[0, 1]`
    pub temperature: f32,
}

/// Generation service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelSettings {
    /// Model identifier
    pub name: String,
    /// API root
    pub base_url: String,
    /// Completion token cap for every stage
    pub max_tokens: u32,
    /// Per-call deadline
    pub timeout_secs: u64,
}

/// Retry policy for transient service failures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetrySettings {
    /// Retry transient failures at all
    pub enabled: bool,
    /// Attempts after the first failure
    pub max_retries: usize,
    /// First backoff delay
    pub initial_backoff_ms: u64,
    /// Backoff ceiling
    pub max_delay_secs: u64,
}

/// Sampling temperature per stage.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StageTemperatures {
    /// Outline generation
    pub outline: f32,
    /// Initial story generation
    pub story: f32,
    /// Judge evaluation
    pub judge: f32,
    /// Judge-driven revision
    pub revise: f32,
    /// Operator-driven revision
    pub user_revision: f32,
}

/// Quality guardrail budget and acceptance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct GuardrailSettings {
    /// Maximum judge passes
    pub max_attempts: u32,
    /// Minimum overall score to accept a story
    pub threshold: u8,
}

/// Session flow switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionSettings {
    /// Generate an outline before the first draft
    pub use_outline: bool,
    /// Revise once with the first judge feedback before the guardrail loop
    pub pre_loop_revision: bool,
}

/// Complete story generator configuration.
///
/// # Example
///
/// ```no_run
/// use bedtime_story::StoryConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryConfig::load()?;
/// println!("Using model {}", config.model.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StoryConfig {
    /// Generation service settings
    pub model: ModelSettings,
    /// Retry policy
    pub retry: RetrySettings,
    /// Per-stage temperatures
    pub stages: StageTemperatures,
    /// Guardrail loop settings
    pub guardrail: GuardrailSettings,
    /// Session flow settings
    pub session: SessionSettings,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            model: ModelSettings {
                name: "gpt-3.5-turbo".to_string(),
                base_url: "https://api.openai.com/v1".to_string(),
                max_tokens: 3000,
                timeout_secs: 120,
            },
            retry: RetrySettings {
                enabled: true,
                max_retries: 3,
                initial_backoff_ms: 1000,
                max_delay_secs: 30,
            },
            stages: StageTemperatures {
                outline: 0.3,
                story: 0.6,
                judge: 0.2,
                revise: 0.6,
                user_revision: 0.7,
            },
            guardrail: GuardrailSettings {
                max_attempts: 2,
                threshold: 4,
            },
            session: SessionSettings {
                use_outline: false,
                pre_loop_revision: true,
            },
        }
    }
}

impl StoryConfig {
    /// Load bundled defaults plus any user config files.
    ///
    /// Missing user files are skipped silently.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or the merged
    /// values fail [`StoryConfig::validate`].
    pub fn load() -> BedtimeResult<Self> {
        Self::load_with(None::<&Path>)
    }

    /// Load like [`StoryConfig::load`], then overlay `path` if given.
    ///
    /// An explicit file must exist.
    #[instrument(skip(path))]
    pub fn load_with(path: Option<impl AsRef<Path>>) -> BedtimeResult<Self> {
        debug!("Loading configuration with precedence: explicit > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/bedtime/bedtime.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("bedtime").required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path.as_ref()).required(true));
        }

        let config: Self = builder
            .build()
            .map_err(|e| {
                BedtimeError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                BedtimeError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load bundled defaults overlaid with a single file, ignoring user
    /// config locations.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails
    /// validation.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> BedtimeResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                BedtimeError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                BedtimeError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`StoryErrorKind::InvalidConfiguration`] for a temperature
    /// outside `[0, 1]`, a zero token budget or a threshold outside 1–5.
    pub fn validate(&self) -> Result<(), StoryError> {
        let invalid = |msg: String| StoryError::new(StoryErrorKind::InvalidConfiguration(msg));

        let temperatures = [
            (Stage::Outline, self.stages.outline),
            (Stage::Story, self.stages.story),
            (Stage::Judge, self.stages.judge),
            (Stage::Revise, self.stages.revise),
            (Stage::UserRevision, self.stages.user_revision),
        ];
        for (stage, temperature) in temperatures {
            if !(0.0..=1.0).contains(&temperature) {
                return Err(invalid(format!(
                    "{} temperature {} is outside [0, 1]",
                    stage, temperature
                )));
            }
        }

        if self.model.max_tokens == 0 {
            return Err(invalid("model.max_tokens must be positive".to_string()));
        }

        if !(1..=5).contains(&self.guardrail.threshold) {
            return Err(invalid(format!(
                "guardrail.threshold {} is outside 1-5",
                self.guardrail.threshold
            )));
        }

        Ok(())
    }

    /// Sampling parameters for `stage`.
    pub fn stage_params(&self, stage: Stage) -> StageParams {
        let temperature = match stage {
            Stage::Outline => self.stages.outline,
            Stage::Story => self.stages.story,
            Stage::Judge => self.stages.judge,
            Stage::Revise => self.stages.revise,
            Stage::UserRevision => self.stages.user_revision,
        };
        StageParams {
            stage,
            max_tokens: self.model.max_tokens,
            temperature,
        }
    }
}
