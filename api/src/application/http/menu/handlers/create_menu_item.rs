use axum::extract::State;
use dietplate_core::domain::menu::{
    entities::MenuItem, ports::MenuService, value_objects::CreateMenuItemInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        menu::validators::CreateMenuItemValidator,
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
pub struct CreateMenuItemResponse {
    pub data: MenuItem,
}

#[utoipa::path(
    post,
    path = "",
    tag = "menu",
    summary = "Create menu item",
    request_body = CreateMenuItemValidator,
    responses(
        (status = 201, body = CreateMenuItemResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer" = []))
)]
pub async fn create_menu_item(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<CreateMenuItemValidator>,
) -> Result<Response<CreateMenuItemResponse>, ApiError> {
    let item = state
        .service
        .create_menu_item(identity, CreateMenuItemInput::from(payload))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(CreateMenuItemResponse { data: item }))
}
