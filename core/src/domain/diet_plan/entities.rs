use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::generate_timestamp,
    diet_plan::value_objects::CreateDietPlanInput,
    recommendation::entities::Recommendation,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DietPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Free-form list of planned meals.
    #[schema(value_type = Vec<Object>)]
    pub meal_plan: Vec<serde_json::Value>,
    pub calories_target: Option<u32>,
    pub protein_target: Option<u32>,
    pub carbs_target: Option<u32>,
    pub fat_target: Option<u32>,
    pub special_instructions: Option<String>,
    pub goals: Vec<String>,
    pub restrictions: Vec<String>,
    /// Latest generated recommendation, overwritten on every run.
    pub recommendation: Option<Recommendation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DietPlan {
    pub fn new(user_id: Uuid, input: CreateDietPlanInput) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            user_id,
            start_date: input.start_date,
            end_date: input.end_date,
            meal_plan: input.meal_plan,
            calories_target: input.calories_target,
            protein_target: input.protein_target,
            carbs_target: input.carbs_target,
            fat_target: input.fat_target,
            special_instructions: input.special_instructions,
            goals: input.goals,
            restrictions: input.restrictions,
            recommendation: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A plan that only exists to hold a recommendation.
    pub fn from_recommendation(
        user_id: Uuid,
        recommendation: Recommendation,
        goals: Vec<String>,
        restrictions: Vec<String>,
    ) -> Self {
        let mut plan = Self::new(user_id, CreateDietPlanInput::default());
        plan.apply_recommendation(recommendation, goals, restrictions);
        plan
    }

    /// Last write wins: targets follow the recommendation's goals, and the
    /// request's goals and restrictions replace the stored ones when given.
    pub fn apply_recommendation(
        &mut self,
        recommendation: Recommendation,
        goals: Vec<String>,
        restrictions: Vec<String>,
    ) {
        let targets = recommendation.nutrition_goals;
        self.calories_target = Some(targets.calories);
        self.protein_target = Some(targets.protein);
        self.carbs_target = Some(targets.carbs);
        self.fat_target = Some(targets.fat);
        if !goals.is_empty() {
            self.goals = goals;
        }
        if !restrictions.is_empty() {
            self.restrictions = restrictions;
        }
        self.recommendation = Some(recommendation);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recommendation::defaults::fallback_recommendation;

    #[test]
    fn test_apply_recommendation_overwrites_targets() {
        let mut plan = DietPlan::new(
            Uuid::new_v4(),
            CreateDietPlanInput {
                calories_target: Some(2500),
                goals: vec!["maintenance".to_string()],
                restrictions: vec!["gluten".to_string()],
                ..Default::default()
            },
        );

        plan.apply_recommendation(
            fallback_recommendation(),
            vec!["weight_loss".to_string()],
            vec![],
        );

        assert_eq!(plan.calories_target, Some(1800));
        assert_eq!(plan.fat_target, Some(60));
        assert_eq!(plan.goals, vec!["weight_loss".to_string()]);
        assert_eq!(plan.restrictions, vec!["gluten".to_string()]);
        assert!(plan.recommendation.is_some());
        assert!(plan.updated_at >= plan.created_at);
    }
}
