use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    create_diet_plan::{__path_create_diet_plan, create_diet_plan},
    get_diet_plans::{__path_get_diet_plans, get_diet_plans},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(create_diet_plan, get_diet_plans))]
pub struct DietPlanApiDoc;

pub fn diet_plan_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/diet-plans", state.args.server.root_path),
            post(create_diet_plan),
        )
        .route(
            &format!("{}/users/me/diet-plans", state.args.server.root_path),
            get(get_diet_plans),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
