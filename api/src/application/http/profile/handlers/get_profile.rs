use axum::extract::State;
use dietplate_core::domain::health_profile::{entities::User, ports::HealthProfileService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetProfileResponse {
    pub data: User,
}

#[utoipa::path(
    get,
    path = "/me/profile",
    tag = "profile",
    summary = "Get own health profile",
    responses(
        (status = 200, body = GetProfileResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "No profile stored yet")
    ),
    security(("bearer" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<GetProfileResponse>, ApiError> {
    let user = state
        .service
        .get_profile(identity)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetProfileResponse { data: user }))
}
