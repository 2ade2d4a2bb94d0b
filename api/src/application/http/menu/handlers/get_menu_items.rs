use axum::extract::{Query, State};
use dietplate_core::domain::menu::{
    entities::MenuItem,
    ports::MenuService,
    value_objects::{GetMenuItemsFilter, MenuItemSort},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct GetMenuItemsQuery {
    /// Only items of this category.
    pub category: Option<String>,
    /// Comma-separated restrictions to leave out, e.g. `peanuts,gluten`.
    pub exclude: Option<String>,
    pub max_calories: Option<u32>,
    /// `name`, `calories`, `price` or `created_at`; prefix with `-` for descending.
    pub sort: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetMenuItemsResponse {
    pub data: Vec<MenuItem>,
}

fn parse_sort(raw: &str) -> Result<MenuItemSort, ApiError> {
    let raw = raw.trim();
    let (field, descending) = match raw.strip_prefix('-') {
        Some(field) => (field, true),
        None => (raw, false),
    };

    match (field, descending) {
        ("name", false) => Ok(MenuItemSort::NameAsc),
        ("name", true) => Ok(MenuItemSort::NameDesc),
        ("calories", false) => Ok(MenuItemSort::CaloriesAsc),
        ("calories", true) => Ok(MenuItemSort::CaloriesDesc),
        ("price", false) => Ok(MenuItemSort::PriceAsc),
        ("price", true) => Ok(MenuItemSort::PriceDesc),
        ("created_at", true) => Ok(MenuItemSort::CreatedAtDesc),
        _ => Err(ApiError::BadRequest(format!("Unsupported sort '{raw}'"))),
    }
}

impl TryFrom<GetMenuItemsQuery> for GetMenuItemsFilter {
    type Error = ApiError;

    fn try_from(query: GetMenuItemsQuery) -> Result<Self, Self::Error> {
        let sort = match query.sort.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_sort(raw)?,
            _ => MenuItemSort::default(),
        };

        let exclude_restrictions = query
            .exclude
            .unwrap_or_default()
            .split(',')
            .map(|r| r.trim().to_lowercase())
            .filter(|r| !r.is_empty())
            .collect();

        Ok(Self {
            category: query.category.filter(|c| !c.trim().is_empty()),
            exclude_restrictions,
            max_calories: query.max_calories,
            sort,
            offset: Some(query.offset.unwrap_or(0)),
            limit: Some(query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)),
        })
    }
}

#[utoipa::path(
    get,
    path = "",
    tag = "menu",
    summary = "List menu items",
    description = "Lists the catalog, optionally filtered by category, calories and restrictions.",
    params(GetMenuItemsQuery),
    responses(
        (status = 200, body = GetMenuItemsResponse),
        (status = 400, description = "Unsupported sort")
    )
)]
pub async fn get_menu_items(
    Query(query): Query<GetMenuItemsQuery>,
    State(state): State<AppState>,
) -> Result<Response<GetMenuItemsResponse>, ApiError> {
    let filter = GetMenuItemsFilter::try_from(query)?;
    let items = state
        .service
        .get_menu_items(filter)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetMenuItemsResponse { data: items }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let filter = GetMenuItemsFilter::try_from(GetMenuItemsQuery::default()).unwrap();

        assert_eq!(filter.sort, MenuItemSort::NameAsc);
        assert_eq!(filter.offset, Some(0));
        assert_eq!(filter.limit, Some(20));
        assert!(filter.exclude_restrictions.is_empty());
    }

    #[test]
    fn test_query_exclude_and_sort() {
        let filter = GetMenuItemsFilter::try_from(GetMenuItemsQuery {
            exclude: Some("Peanuts, gluten,,".to_string()),
            sort: Some("-calories".to_string()),
            limit: Some(500),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(filter.exclude_restrictions, vec!["peanuts", "gluten"]);
        assert_eq!(filter.sort, MenuItemSort::CaloriesDesc);
        assert_eq!(filter.limit, Some(100));
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        let result = GetMenuItemsFilter::try_from(GetMenuItemsQuery {
            sort: Some("-spiciness".to_string()),
            ..Default::default()
        });

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
