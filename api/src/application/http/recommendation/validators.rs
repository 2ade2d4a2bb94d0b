use bytes::Bytes;
use dietplate_core::domain::recommendation::value_objects::RecommendationRequest;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::server::api_entities::api_error::ApiError;

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenerateRecommendationValidator {
    /// e.g. `weight_loss`, `weight_gain`, `muscle_gain`.
    #[serde(default)]
    #[validate(length(max = 10, message = "too many goals"))]
    pub goals: Vec<String>,

    /// `sedentary`, `light`, `moderate`, `active` or `very_active`.
    #[serde(default)]
    #[validate(length(max = 32, message = "activity level is too long"))]
    pub activity_level: Option<String>,

    #[serde(default)]
    #[validate(length(max = 20, message = "too many restrictions"))]
    pub restrictions: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 500, message = "health conditions are too long"))]
    pub health_conditions: Option<String>,
}

impl GenerateRecommendationValidator {
    /// The body is optional: an empty one means no overrides.
    pub fn from_body(body: &Bytes) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let payload: Self = serde_json::from_slice(body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))?;
        payload.validate()?;

        Ok(payload)
    }
}

impl From<GenerateRecommendationValidator> for RecommendationRequest {
    fn from(payload: GenerateRecommendationValidator) -> Self {
        Self {
            activity_level: payload.activity_level,
            goals: payload.goals,
            restrictions: payload.restrictions,
            health_conditions: payload.health_conditions,
        }
    }
}
