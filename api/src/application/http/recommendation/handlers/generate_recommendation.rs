use axum::extract::State;
use bytes::Bytes;
use dietplate_core::domain::recommendation::{
    entities::Recommendation, ports::RecommendationService,
    value_objects::RecommendationRequest,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        recommendation::validators::GenerateRecommendationValidator,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "",
    tag = "recommendation",
    summary = "Generate menu recommendation",
    description = "Builds a recommendation from the caller's health profile. \
                   Always answers with three menu items; when the language model \
                   is unavailable a conservative fallback is returned.",
    request_body(
        content = GenerateRecommendationValidator,
        description = "Optional overrides; an empty body uses the stored profile only"
    ),
    responses(
        (status = 200, body = Recommendation),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer" = []))
)]
pub async fn generate_recommendation(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    body: Bytes,
) -> Result<Response<Recommendation>, ApiError> {
    let payload = GenerateRecommendationValidator::from_body(&body)?;

    let recommendation = state
        .service
        .generate_recommendation(identity, RecommendationRequest::from(payload))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(recommendation))
}
