use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        diet_plan::{entities::DietPlan, ports::DietPlanRepository},
        recommendation::entities::Recommendation,
    },
    entity::diet_plans::{Column, Entity},
    infrastructure::diet_plan::mappers::to_active_model,
};

#[derive(Debug, Clone)]
pub struct PostgresDietPlanRepository {
    pub db: DatabaseConnection,
}

impl PostgresDietPlanRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn latest_for_user(&self, user_id: Uuid) -> Result<Option<DietPlan>, CoreError> {
        let plan = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::UpdatedAt)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get latest diet plan: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(plan.map(DietPlan::from))
    }
}

impl DietPlanRepository for PostgresDietPlanRepository {
    async fn create(&self, plan: DietPlan) -> Result<DietPlan, CoreError> {
        let model = to_active_model(&plan)?
            .insert(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to create diet plan: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(DietPlan::from(model))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<DietPlan>, CoreError> {
        let plans = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list diet plans: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(plans.iter().map(DietPlan::from).collect())
    }

    async fn upsert_recommendation(
        &self,
        user_id: Uuid,
        recommendation: Recommendation,
        goals: Vec<String>,
        restrictions: Vec<String>,
    ) -> Result<DietPlan, CoreError> {
        let Some(mut plan) = self.latest_for_user(user_id).await? else {
            let plan = DietPlan::from_recommendation(user_id, recommendation, goals, restrictions);
            return self.create(plan).await;
        };

        plan.apply_recommendation(recommendation, goals, restrictions);
        let model = to_active_model(&plan)?
            .update(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to update diet plan recommendation: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(DietPlan::from(model))
    }
}
