//! Trait definitions for generation backends.

use async_trait::async_trait;
use bedtime_core::{GenerateRequest, GenerateResponse};
use bedtime_error::BedtimeResult;

/// Core trait that every text-generation backend implements.
///
/// A driver takes a finished prompt and sampling parameters and returns the
/// provider's full response. Drivers are stateless across calls: nothing but
/// the text inside the request is carried from one call to the next.
#[async_trait]
pub trait BedtimeDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> BedtimeResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier used when a request does not name one.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<D: BedtimeDriver + ?Sized> BedtimeDriver for std::sync::Arc<D> {
    async fn generate(&self, req: &GenerateRequest) -> BedtimeResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
