use super::dto::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use bedtime_core::{GenerateRequest, GenerateResponse, Output, TokenUsage};
use bedtime_error::{
    BedtimeResult, ModelsError, ModelsErrorKind, ModelsResult, OpenAIErrorKind, RetryableError,
};
use bedtime_interface::BedtimeDriver;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Public OpenAI API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Connection settings for [`OpenAIClient`].
///
/// The API key is an explicit value so tests and alternative front-ends never
/// depend on process environment.
///
/// # Examples
///
/// ```
/// use bedtime_models::OpenAIConfig;
/// use std::time::Duration;
///
/// let config = OpenAIConfig::builder()
///     .api_key("sk-test")
///     .timeout(Duration::from_secs(30))
///     .max_retries(Some(2))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.model(), "gpt-3.5-turbo");
/// assert!(!config.no_retry());
/// ```
#[derive(Clone, derive_getters::Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct OpenAIConfig {
    /// Bearer token for the API
    #[getter(skip)]
    api_key: String,
    /// Default model identifier
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    model: String,
    /// API root, without the `/chat/completions` suffix
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Deadline for a single HTTP call
    #[builder(default = "Duration::from_secs(120)")]
    timeout: Duration,
    /// Disable automatic retry
    #[builder(default)]
    #[getter(skip)]
    no_retry: bool,
    /// Override maximum retry attempts
    #[builder(default)]
    max_retries: Option<usize>,
    /// Override initial backoff delay
    #[builder(default)]
    retry_backoff_ms: Option<u64>,
    /// Override the backoff ceiling
    #[builder(default)]
    max_delay_secs: Option<u64>,
}

impl OpenAIConfig {
    /// Creates a new config builder.
    pub fn builder() -> OpenAIConfigBuilder {
        OpenAIConfigBuilder::default()
    }

    /// Whether automatic retry is disabled.
    pub fn no_retry(&self) -> bool {
        self.no_retry
    }
}

impl std::fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("no_retry", &self.no_retry)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .field("max_delay_secs", &self.max_delay_secs)
            .finish()
    }
}

/// OpenAI chat-completions client.
///
/// Each call is a single non-streaming request. Transient failures (transport
/// errors, timeouts, 408/429/5xx) are retried with jittered exponential
/// backoff; authentication and other client errors fail immediately.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIClient {
    /// Creates a new OpenAI client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    #[instrument(skip_all, fields(model = %config.model(), base_url = %config.base_url()))]
    pub fn new(config: OpenAIConfig) -> ModelsResult<Self> {
        debug!("Creating new OpenAI client");
        let client = Client::builder()
            .timeout(*config.timeout())
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                ModelsError::new(OpenAIErrorKind::ClientCreation(e.to_string()).into())
            })?;

        Ok(Self { client, config })
    }

    /// Creates a client for `model`, reading the key from `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not set.
    pub fn from_env(model: impl Into<String>) -> ModelsResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ModelsError::new(OpenAIErrorKind::MissingApiKey.into()))?;
        let config = OpenAIConfig::builder()
            .api_key(api_key)
            .model(model)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))?;
        Self::new(config)
    }

    /// Connection settings this client was built with.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url().trim_end_matches('/')
        )
    }

    /// Converts a Bedtime GenerateRequest to a chat-completions request.
    fn convert_request(&self, request: &GenerateRequest) -> ModelsResult<ChatCompletionRequest> {
        let messages: Vec<ChatMessage> = request
            .messages()
            .iter()
            .map(|m| ChatMessage::new(m.role().as_api_str(), m.content().clone()))
            .collect();

        let model = request
            .model()
            .clone()
            .unwrap_or_else(|| self.config.model().clone());

        ChatCompletionRequest::builder()
            .model(model)
            .messages(messages)
            .max_tokens(*request.max_tokens())
            .temperature(request.temperature().map(|t| t.clamp(0.0, 1.0)))
            .stream(false)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))
    }

    /// Converts a chat-completions response to a Bedtime GenerateResponse.
    ///
    /// Only the first choice is used.
    fn convert_response(response: &ChatCompletionResponse) -> ModelsResult<GenerateResponse> {
        let choice = response
            .choices()
            .first()
            .ok_or_else(|| ModelsError::new(OpenAIErrorKind::EmptyResponse.into()))?;

        let output = match (choice.message().content(), choice.message().refusal()) {
            (Some(text), _) => Output::Text(text.clone()),
            (None, Some(refusal)) => Output::Refusal(refusal.clone()),
            (None, None) => {
                return Err(ModelsError::new(OpenAIErrorKind::EmptyResponse.into()));
            }
        };

        let usage = response.usage().as_ref().map(|u| TokenUsage {
            prompt_tokens: *u.prompt_tokens(),
            completion_tokens: *u.completion_tokens(),
        });

        GenerateResponse::builder()
            .outputs(vec![output])
            .usage(usage)
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))
    }

    /// Maps a non-success status to an error kind.
    fn classify_status(status: StatusCode, body: String) -> OpenAIErrorKind {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                OpenAIErrorKind::Authentication(body)
            }
            _ => OpenAIErrorKind::ApiError {
                status: status.as_u16(),
                message: body,
            },
        }
    }

    /// Sends one request without retry.
    async fn send_once(&self, body: &ChatCompletionRequest) -> ModelsResult<GenerateResponse> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to OpenAI API");
                let kind = if e.is_timeout() {
                    OpenAIErrorKind::Timeout(self.config.timeout().as_secs())
                } else {
                    OpenAIErrorKind::Http(e.to_string())
                };
                ModelsError::new(kind.into())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "OpenAI API returned error");
            return Err(ModelsError::new(Self::classify_status(status, body).into()));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse OpenAI response");
            ModelsError::new(OpenAIErrorKind::Parse(e.to_string()).into())
        })?;

        debug!(
            response_id = %parsed.id(),
            choices = parsed.choices().len(),
            "Received response from OpenAI"
        );
        Self::convert_response(&parsed)
    }

    /// Delays before each retry: `initial_ms`, then doubling, capped at
    /// `max_delay_secs`. Yields exactly `max_retries` values.
    fn backoff_schedule(
        initial_ms: u64,
        max_delay_secs: u64,
        max_retries: usize,
    ) -> impl Iterator<Item = Duration> {
        tokio_retry2::strategy::ExponentialFactorBackoff::from_millis(initial_ms, 2.0)
            .max_delay(Duration::from_secs(max_delay_secs))
            .take(max_retries)
    }

    /// Generates with retry according to the configured policy.
    ///
    /// At most `1 + max_retries` requests are sent.
    async fn generate_internal(&self, req: &GenerateRequest) -> ModelsResult<GenerateResponse> {
        use tokio_retry2::{Retry, RetryError, strategy::jitter};

        let body = self.convert_request(req)?;

        if self.config.no_retry() {
            return self.send_once(&body).await;
        }

        // Try once to learn the error-specific strategy
        let first_error = match self.send_once(&body).await {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };

        if !first_error.is_retryable() {
            warn!(error = %first_error, "Permanent OpenAI error, failing immediately");
            return Err(first_error);
        }

        let (mut initial_ms, mut max_retries, mut max_delay_secs) =
            first_error.retry_strategy_params();
        if let Some(backoff) = self.config.retry_backoff_ms() {
            initial_ms = *backoff;
        }
        if let Some(retries) = self.config.max_retries() {
            max_retries = *retries;
        }
        if let Some(delay) = self.config.max_delay_secs() {
            max_delay_secs = *delay;
        }

        let mut delays =
            Self::backoff_schedule(initial_ms, max_delay_secs, max_retries).map(jitter);
        let Some(first_delay) = delays.next() else {
            return Err(first_error);
        };

        info!(
            error = %first_error,
            initial_backoff_ms = initial_ms,
            max_retries,
            max_delay_secs,
            "OpenAI request failed, will retry with configured strategy"
        );

        // Retry::spawn attempts immediately, so the first delay is slept here
        tokio::time::sleep(first_delay).await;

        let body = &body;
        Retry::spawn(delays, || async move {
            match self.send_once(body).await {
                Ok(response) => Ok(response),
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, "OpenAI request failed, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Permanent OpenAI error, failing immediately");
                    Err(RetryError::Permanent(e))
                }
            }
        })
        .await
    }
}

#[async_trait::async_trait]
impl BedtimeDriver for OpenAIClient {
    #[instrument(
        skip(self, req),
        fields(
            provider = "openai",
            model = %req.model().as_deref().unwrap_or(self.config.model()),
            max_tokens = ?req.max_tokens(),
            temperature = ?req.temperature(),
        )
    )]
    async fn generate(&self, req: &GenerateRequest) -> BedtimeResult<GenerateResponse> {
        Ok(self.generate_internal(req).await?)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}
