use crate::{
    domain::common::{DietplateConfig, services::Service},
    infrastructure::{
        auth::JwksTokenVerifier,
        db::postgres::{Postgres, PostgresConfig},
        diet_plan::repositories::PostgresDietPlanRepository,
        health::repositories::PostgresHealthCheckRepository,
        llm::GroqLLMClient,
        menu::repositories::PostgresMenuItemRepository,
        user::repositories::PostgresUserRepository,
    },
};

pub type DietplateService = Service<
    PostgresUserRepository,
    PostgresMenuItemRepository,
    PostgresDietPlanRepository,
    PostgresHealthCheckRepository,
    GroqLLMClient,
    JwksTokenVerifier,
>;

pub async fn create_service(config: DietplateConfig) -> Result<DietplateService, anyhow::Error> {
    let postgres = Postgres::new(PostgresConfig::from(&config.database)).await?;

    let user_repository = PostgresUserRepository::new(postgres.get_db());
    let menu_item_repository = PostgresMenuItemRepository::new(postgres.get_db());
    let diet_plan_repository = PostgresDietPlanRepository::new(postgres.get_db());
    let health_check_repository = PostgresHealthCheckRepository::new(postgres.get_db());

    let llm_client = GroqLLMClient::new(config.llm)?;
    let token_verifier = JwksTokenVerifier::new(&config.auth);

    Ok(Service::new(
        user_repository,
        menu_item_repository,
        diet_plan_repository,
        health_check_repository,
        llm_client,
        token_verifier,
        config.recommendation,
    ))
}
