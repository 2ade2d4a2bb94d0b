use dietplate_core::domain::menu::{entities::NutritionInfo, value_objects::CreateMenuItemInput};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct NutritionInfoValidator {
    pub calories: u32,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "protein must not be negative"))]
    pub protein: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "carbs must not be negative"))]
    pub carbs: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "fat must not be negative"))]
    pub fat: f64,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMenuItemValidator {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(nested)]
    pub nutrition_info: NutritionInfoValidator,

    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,

    /// `breakfast`, `lunch`, `dinner` or any other catalog category.
    #[validate(length(min = 1, max = 50, message = "category is required"))]
    pub category: String,

    /// Dietary restrictions the dish violates, e.g. `peanuts`, `gluten`.
    #[serde(default)]
    pub restrictions: Vec<String>,
}

impl From<CreateMenuItemValidator> for CreateMenuItemInput {
    fn from(payload: CreateMenuItemValidator) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            nutrition_info: NutritionInfo {
                calories: payload.nutrition_info.calories,
                protein: payload.nutrition_info.protein,
                carbs: payload.nutrition_info.carbs,
                fat: payload.nutrition_info.fat,
            },
            price: payload.price,
            category: payload.category,
            restrictions: payload.restrictions,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_nested_nutrition_is_validated() {
        let payload: CreateMenuItemValidator = serde_json::from_value(json!({
            "name": "Tofu Bowl",
            "nutrition_info": { "calories": 480, "protein": -2.0 },
            "price": 42000.0,
            "category": "lunch"
        }))
        .unwrap();

        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_into_input() {
        let payload: CreateMenuItemValidator = serde_json::from_value(json!({
            "name": "Tofu Bowl",
            "nutrition_info": { "calories": 480, "protein": 22.0 },
            "price": 42000.0,
            "category": "lunch",
            "restrictions": ["soy"]
        }))
        .unwrap();
        assert!(payload.validate().is_ok());

        let input = CreateMenuItemInput::from(payload);
        assert_eq!(input.nutrition_info.calories, 480);
        assert_eq!(input.restrictions, vec!["soy"]);
    }
}
