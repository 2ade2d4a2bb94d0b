use axum::extract::State;
use dietplate_core::domain::health_profile::{
    entities::User, ports::HealthProfileService, value_objects::UpdateHealthProfileInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        profile::validators::UpdateHealthProfileValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UpdateProfileResponse {
    pub data: User,
}

#[utoipa::path(
    put,
    path = "/me/profile",
    tag = "profile",
    summary = "Update own health profile",
    description = "Creates the user on first write. Zero numeric fields mean not specified.",
    request_body = UpdateHealthProfileValidator,
    responses(
        (status = 200, body = UpdateProfileResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<UpdateHealthProfileValidator>,
) -> Result<Response<UpdateProfileResponse>, ApiError> {
    let user = state
        .service
        .update_profile(
            identity,
            UpdateHealthProfileInput {
                phone: payload.phone,
                age: payload.age,
                weight: payload.weight,
                height: payload.height,
                medical_conditions: payload.medical_conditions,
                allergies: payload.allergies,
                dietary_preferences: payload.dietary_preferences,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(UpdateProfileResponse { data: user }))
}
