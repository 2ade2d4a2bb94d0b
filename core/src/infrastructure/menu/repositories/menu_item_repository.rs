use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, Order,
    QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};
use serde_json::json;
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        menu::{
            entities::MenuItem,
            ports::MenuItemRepository,
            value_objects::{GetMenuItemsFilter, MenuItemSort},
        },
    },
    entity::menu_items::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresMenuItemRepository {
    pub db: DatabaseConnection,
}

impl PostgresMenuItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(sort: &MenuItemSort) -> (Column, Order) {
    match sort {
        MenuItemSort::NameAsc => (Column::Name, Order::Asc),
        MenuItemSort::NameDesc => (Column::Name, Order::Desc),
        MenuItemSort::CaloriesAsc => (Column::Calories, Order::Asc),
        MenuItemSort::CaloriesDesc => (Column::Calories, Order::Desc),
        MenuItemSort::PriceAsc => (Column::Price, Order::Asc),
        MenuItemSort::PriceDesc => (Column::Price, Order::Desc),
        MenuItemSort::CreatedAtDesc => (Column::CreatedAt, Order::Desc),
    }
}

impl MenuItemRepository for PostgresMenuItemRepository {
    async fn list(&self, filter: GetMenuItemsFilter) -> Result<Vec<MenuItem>, CoreError> {
        let mut query = Entity::find();

        if let Some(category) = filter.category {
            query = query.filter(Column::Category.eq(category.trim().to_lowercase()));
        }
        if let Some(max_calories) = filter.max_calories {
            query = query.filter(Column::Calories.lte(max_calories as i32));
        }
        // restrictions are stored lowercase
        for restriction in &filter.exclude_restrictions {
            let restriction = restriction.trim().to_lowercase();
            if restriction.is_empty() {
                continue;
            }
            query = query.filter(Expr::cust_with_values(
                "NOT (restrictions @> ?::jsonb)",
                [json!([restriction])],
            ));
        }

        let (column, order) = sort_column(&filter.sort);
        let items = query
            .order_by(column, order)
            .order_by_asc(Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list menu items: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(items.iter().map(MenuItem::from).collect())
    }

    async fn list_by_category(&self, category: String) -> Result<Vec<MenuItem>, CoreError> {
        let items = Entity::find()
            .filter(Column::Category.eq(category))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list menu items by category: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(items.iter().map(MenuItem::from).collect())
    }

    async fn create(&self, item: MenuItem) -> Result<MenuItem, CoreError> {
        let active_model = ActiveModel {
            id: Set(item.id),
            name: Set(item.name.clone()),
            description: Set(item.description.clone()),
            calories: Set(item.nutrition_info.calories as i32),
            protein: Set(item.nutrition_info.protein),
            carbs: Set(item.nutrition_info.carbs),
            fat: Set(item.nutrition_info.fat),
            price: Set(item.price),
            category: Set(item.category.clone()),
            restrictions: Set(json!(item.restrictions)),
            created_at: Set(item.created_at.fixed_offset()),
            updated_at: Set(item.updated_at.fixed_offset()),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            error!("Failed to create menu item: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(MenuItem::from(model))
    }
}
