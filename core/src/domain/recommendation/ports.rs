use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    recommendation::{entities::Recommendation, value_objects::RecommendationRequest},
};

/// Text completion endpoint. Implementations make exactly one attempt per
/// call and report transient failures as `RecommendationServiceUnavailable`,
/// permanent ones as `RecommendationRequestFailed`.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn complete(&self, prompt: String) -> impl Future<Output = Result<String, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait RecommendationService: Send + Sync {
    /// Always yields a complete recommendation; remote and parsing failures
    /// are absorbed by fallbacks.
    fn generate_recommendation(
        &self,
        identity: Identity,
        request: RecommendationRequest,
    ) -> impl Future<Output = Result<Recommendation, CoreError>> + Send;
}
