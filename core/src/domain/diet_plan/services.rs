use tracing::{info, instrument};

use crate::domain::{
    authentication::{ports::TokenVerifier, value_objects::Identity},
    common::{entities::app_errors::CoreError, services::Service},
    diet_plan::{
        entities::DietPlan,
        ports::{DietPlanRepository, DietPlanService},
        value_objects::CreateDietPlanInput,
    },
    health::ports::HealthCheckRepository,
    health_profile::ports::UserRepository,
    menu::ports::MenuItemRepository,
    recommendation::ports::LLMClient,
};

impl<U, MI, DP, HC, LLM, TV> DietPlanService for Service<U, MI, DP, HC, LLM, TV>
where
    U: UserRepository,
    MI: MenuItemRepository,
    DP: DietPlanRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    TV: TokenVerifier,
{
    #[instrument(skip_all, fields(subject = %identity.subject))]
    async fn create_diet_plan(
        &self,
        identity: Identity,
        input: CreateDietPlanInput,
    ) -> Result<DietPlan, CoreError> {
        if let (Some(start), Some(end)) = (input.start_date, input.end_date)
            && end < start
        {
            return Err(CoreError::Invalid);
        }

        let user = self
            .user_repository
            .get_by_subject(identity.subject)
            .await?
            .ok_or(CoreError::NotFound)?;

        let plan = self
            .diet_plan_repository
            .create(DietPlan::new(user.id, input))
            .await?;
        info!(user_id = %user.id, diet_plan_id = %plan.id, "diet plan created");

        Ok(plan)
    }

    #[instrument(skip_all, fields(subject = %identity.subject))]
    async fn get_diet_plans(&self, identity: Identity) -> Result<Vec<DietPlan>, CoreError> {
        let Some(user) = self
            .user_repository
            .get_by_subject(identity.subject)
            .await?
        else {
            return Ok(Vec::new());
        };

        self.diet_plan_repository.list_by_user(user.id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{
        common::test_support::{FakeLLMClient, TestHarness},
        health_profile::entities::HealthProfile,
    };

    #[tokio::test]
    async fn test_create_and_list_diet_plans() {
        let harness = TestHarness::new(FakeLLMClient::failing());
        let identity = harness.with_user(HealthProfile::default());

        let plan = harness
            .service
            .create_diet_plan(
                identity.clone(),
                CreateDietPlanInput {
                    start_date: NaiveDate::from_ymd_opt(2026, 1, 5),
                    end_date: NaiveDate::from_ymd_opt(2026, 2, 5),
                    calories_target: Some(1900),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let plans = harness.service.get_diet_plans(identity).await.unwrap();
        assert_eq!(plans, vec![plan]);
    }

    #[tokio::test]
    async fn test_create_diet_plan_rejects_inverted_dates() {
        let harness = TestHarness::new(FakeLLMClient::failing());
        let identity = harness.with_user(HealthProfile::default());

        let result = harness
            .service
            .create_diet_plan(
                identity,
                CreateDietPlanInput {
                    start_date: NaiveDate::from_ymd_opt(2026, 3, 1),
                    end_date: NaiveDate::from_ymd_opt(2026, 2, 1),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(result, Err(CoreError::Invalid));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let harness = TestHarness::new(FakeLLMClient::failing());
        let identity = Identity::new("auth0|ghost");

        assert!(
            harness
                .service
                .get_diet_plans(identity.clone())
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            harness
                .service
                .create_diet_plan(identity, CreateDietPlanInput::default())
                .await,
            Err(CoreError::NotFound)
        );
    }
}
