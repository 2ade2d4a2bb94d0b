use uuid::Uuid;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    diet_plan::{entities::DietPlan, value_objects::CreateDietPlanInput},
    recommendation::entities::Recommendation,
};

#[cfg_attr(test, mockall::automock)]
pub trait DietPlanRepository: Send + Sync {
    fn create(&self, plan: DietPlan) -> impl Future<Output = Result<DietPlan, CoreError>> + Send;

    /// Plans of one user, most recently updated first.
    fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<DietPlan>, CoreError>> + Send;

    /// Writes the recommendation into the user's most recently updated plan,
    /// creating a plan when the user has none.
    fn upsert_recommendation(
        &self,
        user_id: Uuid,
        recommendation: Recommendation,
        goals: Vec<String>,
        restrictions: Vec<String>,
    ) -> impl Future<Output = Result<DietPlan, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait DietPlanService: Send + Sync {
    fn create_diet_plan(
        &self,
        identity: Identity,
        input: CreateDietPlanInput,
    ) -> impl Future<Output = Result<DietPlan, CoreError>> + Send;

    fn get_diet_plans(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<Vec<DietPlan>, CoreError>> + Send;
}
