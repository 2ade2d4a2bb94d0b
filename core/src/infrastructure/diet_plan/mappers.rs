use sea_orm::ActiveValue::Set;
use serde_json::json;
use tracing::error;

use crate::{
    domain::{common::entities::app_errors::CoreError, diet_plan::entities::DietPlan},
    entity::diet_plans,
    infrastructure::user::mappers::string_list,
};

fn target(value: Option<i32>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}

impl From<&diet_plans::Model> for DietPlan {
    fn from(model: &diet_plans::Model) -> Self {
        let meal_plan = match &model.meal_plan {
            serde_json::Value::Array(meals) => meals.clone(),
            _ => Vec::new(),
        };

        Self {
            id: model.id,
            user_id: model.user_id,
            start_date: model.start_date,
            end_date: model.end_date,
            meal_plan,
            calories_target: target(model.calories_target),
            protein_target: target(model.protein_target),
            carbs_target: target(model.carbs_target),
            fat_target: target(model.fat_target),
            special_instructions: model.special_instructions.clone(),
            goals: string_list(&model.goals),
            restrictions: string_list(&model.restrictions),
            // a stored document that no longer parses is dropped, not fatal
            recommendation: model
                .recommendation
                .clone()
                .and_then(|value| serde_json::from_value(value).ok()),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<diet_plans::Model> for DietPlan {
    fn from(model: diet_plans::Model) -> Self {
        Self::from(&model)
    }
}

pub fn to_active_model(plan: &DietPlan) -> Result<diet_plans::ActiveModel, CoreError> {
    let recommendation = plan
        .recommendation
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| {
            error!("Failed to serialize recommendation: {}", e);
            CoreError::InternalServerError
        })?;

    Ok(diet_plans::ActiveModel {
        id: Set(plan.id),
        user_id: Set(plan.user_id),
        start_date: Set(plan.start_date),
        end_date: Set(plan.end_date),
        meal_plan: Set(json!(plan.meal_plan)),
        calories_target: Set(plan.calories_target.map(|v| v as i32)),
        protein_target: Set(plan.protein_target.map(|v| v as i32)),
        carbs_target: Set(plan.carbs_target.map(|v| v as i32)),
        fat_target: Set(plan.fat_target.map(|v| v as i32)),
        special_instructions: Set(plan.special_instructions.clone()),
        goals: Set(json!(plan.goals)),
        restrictions: Set(json!(plan.restrictions)),
        recommendation: Set(recommendation),
        created_at: Set(plan.created_at.fixed_offset()),
        updated_at: Set(plan.updated_at.fixed_offset()),
    })
}
