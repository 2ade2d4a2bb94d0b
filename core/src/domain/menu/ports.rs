use std::future::Future;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    menu::{
        entities::MenuItem,
        value_objects::{CreateMenuItemInput, GetMenuItemsFilter},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait MenuItemRepository: Send + Sync {
    fn list(
        &self,
        filter: GetMenuItemsFilter,
    ) -> impl Future<Output = Result<Vec<MenuItem>, CoreError>> + Send;

    /// Items of one category ordered by name.
    fn list_by_category(
        &self,
        category: String,
    ) -> impl Future<Output = Result<Vec<MenuItem>, CoreError>> + Send;

    fn create(&self, item: MenuItem) -> impl Future<Output = Result<MenuItem, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait MenuService: Send + Sync {
    fn get_menu_items(
        &self,
        filter: GetMenuItemsFilter,
    ) -> impl Future<Output = Result<Vec<MenuItem>, CoreError>> + Send;

    fn create_menu_item(
        &self,
        identity: Identity,
        input: CreateMenuItemInput,
    ) -> impl Future<Output = Result<MenuItem, CoreError>> + Send;
}
