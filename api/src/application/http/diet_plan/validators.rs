use chrono::NaiveDate;
use dietplate_core::domain::diet_plan::value_objects::CreateDietPlanInput;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDietPlanValidator {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    #[validate(length(max = 366, message = "meal plan is too long"))]
    pub meal_plan: Vec<serde_json::Value>,

    #[serde(default)]
    #[validate(range(max = 10000, message = "calories target is out of range"))]
    pub calories_target: Option<u32>,

    #[serde(default)]
    #[validate(range(max = 1000, message = "protein target is out of range"))]
    pub protein_target: Option<u32>,

    #[serde(default)]
    #[validate(range(max = 2000, message = "carbs target is out of range"))]
    pub carbs_target: Option<u32>,

    #[serde(default)]
    #[validate(range(max = 1000, message = "fat target is out of range"))]
    pub fat_target: Option<u32>,

    #[serde(default)]
    #[validate(length(max = 2000, message = "special instructions are too long"))]
    pub special_instructions: Option<String>,

    #[serde(default)]
    pub goals: Vec<String>,

    #[serde(default)]
    pub restrictions: Vec<String>,
}

impl From<CreateDietPlanValidator> for CreateDietPlanInput {
    fn from(payload: CreateDietPlanValidator) -> Self {
        Self {
            start_date: payload.start_date,
            end_date: payload.end_date,
            meal_plan: payload.meal_plan,
            calories_target: payload.calories_target,
            protein_target: payload.protein_target,
            carbs_target: payload.carbs_target,
            fat_target: payload.fat_target,
            special_instructions: payload.special_instructions,
            goals: payload.goals,
            restrictions: payload.restrictions,
        }
    }
}
