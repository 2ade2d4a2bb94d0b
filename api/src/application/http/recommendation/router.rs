use axum::{Router, middleware, routing::post};
use utoipa::OpenApi;

use super::handlers::generate_recommendation::{
    __path_generate_recommendation, generate_recommendation,
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(generate_recommendation))]
pub struct RecommendationApiDoc;

pub fn recommendation_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/recommendations", state.args.server.root_path),
            post(generate_recommendation),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
