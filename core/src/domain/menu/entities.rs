use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionInfo {
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Catalog entry offered by the caterer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub nutrition_info: NutritionInfo,
    pub price: f64,
    /// Meal category, e.g. `breakfast`, `lunch`, `dinner`, `main_course`.
    pub category: String,
    /// Dietary restrictions this dish violates (allergens, `vegan`, ...).
    pub restrictions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct MenuItemConfig {
    pub name: String,
    pub description: String,
    pub nutrition_info: NutritionInfo,
    pub price: f64,
    pub category: String,
    pub restrictions: Vec<String>,
}

impl MenuItem {
    pub fn new(config: MenuItemConfig) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            name: config.name,
            description: config.description,
            nutrition_info: config.nutrition_info,
            price: config.price,
            category: config.category.trim().to_lowercase(),
            restrictions: config
                .restrictions
                .iter()
                .map(|r| r.trim().to_lowercase())
                .filter(|r| !r.is_empty())
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    /// An item is compatible when none of its restrictions were excluded.
    pub fn is_compatible_with(&self, excluded: &[String]) -> bool {
        !self
            .restrictions
            .iter()
            .any(|r| excluded.iter().any(|e| e.trim().eq_ignore_ascii_case(r.trim())))
    }
}
