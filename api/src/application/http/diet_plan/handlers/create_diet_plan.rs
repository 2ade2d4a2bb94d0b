use axum::extract::State;
use dietplate_core::domain::diet_plan::{
    entities::DietPlan, ports::DietPlanService, value_objects::CreateDietPlanInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        diet_plan::validators::CreateDietPlanValidator,
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
pub struct CreateDietPlanResponse {
    pub data: DietPlan,
}

#[utoipa::path(
    post,
    path = "/diet-plans",
    tag = "diet-plan",
    summary = "Create diet plan",
    request_body = CreateDietPlanValidator,
    responses(
        (status = 201, body = CreateDietPlanResponse),
        (status = 400, description = "End date before start date"),
        (status = 404, description = "No profile stored for the caller")
    ),
    security(("bearer" = []))
)]
pub async fn create_diet_plan(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateDietPlanValidator>,
) -> Result<Response<CreateDietPlanResponse>, ApiError> {
    let plan = state
        .service
        .create_diet_plan(identity, CreateDietPlanInput::from(payload))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(CreateDietPlanResponse { data: plan }))
}
