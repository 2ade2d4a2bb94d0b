use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Resource not found")]
    NotFound,

    #[error("Invalid input")]
    Invalid,

    #[error("Invalid health profile: {0}")]
    InvalidHealthProfile(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("No health profile stored for user")]
    ProfileUnavailable,

    #[error("Recommendation service unavailable: {0}")]
    RecommendationServiceUnavailable(String),

    #[error("Recommendation request failed: {0}")]
    RecommendationRequestFailed(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    /// Errors worth another attempt against the completion endpoint:
    /// transport failures, rate limiting and server errors.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::RecommendationServiceUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unavailable_is_retryable() {
        assert!(CoreError::RecommendationServiceUnavailable("503".to_string()).is_retryable());
        assert!(!CoreError::RecommendationRequestFailed("401".to_string()).is_retryable());
        assert!(!CoreError::ExternalServiceError("jwks".to_string()).is_retryable());
        assert!(!CoreError::InternalServerError.is_retryable());
    }
}
