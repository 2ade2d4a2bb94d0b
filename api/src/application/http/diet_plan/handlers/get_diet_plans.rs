use axum::extract::State;
use dietplate_core::domain::diet_plan::{entities::DietPlan, ports::DietPlanService};
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
pub struct GetDietPlansResponse {
    pub data: Vec<DietPlan>,
}

#[utoipa::path(
    get,
    path = "/users/me/diet-plans",
    tag = "diet-plan",
    summary = "List own diet plans",
    description = "Most recently updated first.",
    responses(
        (status = 200, body = GetDietPlansResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_diet_plans(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<GetDietPlansResponse>, ApiError> {
    let plans = state
        .service
        .get_diet_plans(identity)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetDietPlansResponse { data: plans }))
}
