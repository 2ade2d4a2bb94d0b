use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    create_menu_item::{__path_create_menu_item, create_menu_item},
    get_menu_items::{__path_get_menu_items, get_menu_items},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(get_menu_items, create_menu_item))]
pub struct MenuApiDoc;

pub fn menu_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/menu-items", state.args.server.root_path),
            get(get_menu_items).post(create_menu_item),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
