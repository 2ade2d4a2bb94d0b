use crate::domain::{
    authentication::ports::TokenVerifier,
    common::{entities::app_errors::CoreError, services::Service},
    diet_plan::ports::DietPlanRepository,
    health::{
        entities::DatabaseHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
    health_profile::ports::UserRepository,
    menu::ports::MenuItemRepository,
    recommendation::ports::LLMClient,
};

impl<U, MI, DP, HC, LLM, TV> HealthCheckService for Service<U, MI, DP, HC, LLM, TV>
where
    U: UserRepository,
    MI: MenuItemRepository,
    DP: DietPlanRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    TV: TokenVerifier,
{
    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        self.health_check_repository.readness().await
    }

    async fn health(&self) -> Result<u64, CoreError> {
        self.health_check_repository.health().await
    }
}
