use std::sync::Arc;

use crate::domain::{
    authentication::ports::TokenVerifier, common::RecommendationConfig,
    diet_plan::ports::DietPlanRepository, health::ports::HealthCheckRepository,
    health_profile::ports::UserRepository, menu::ports::MenuItemRepository,
    recommendation::ports::LLMClient,
};

/// Application service: every domain service trait is implemented on this
/// struct, with each outbound port injected as a type parameter.
pub struct Service<U, MI, DP, HC, LLM, TV>
where
    U: UserRepository,
    MI: MenuItemRepository,
    DP: DietPlanRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    TV: TokenVerifier,
{
    pub(crate) user_repository: Arc<U>,
    pub(crate) menu_item_repository: Arc<MI>,
    pub(crate) diet_plan_repository: Arc<DP>,
    pub(crate) health_check_repository: Arc<HC>,
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) token_verifier: Arc<TV>,
    pub(crate) recommendation_config: RecommendationConfig,
}

impl<U, MI, DP, HC, LLM, TV> Service<U, MI, DP, HC, LLM, TV>
where
    U: UserRepository,
    MI: MenuItemRepository,
    DP: DietPlanRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    TV: TokenVerifier,
{
    pub fn new(
        user_repository: U,
        menu_item_repository: MI,
        diet_plan_repository: DP,
        health_check_repository: HC,
        llm_client: LLM,
        token_verifier: TV,
        recommendation_config: RecommendationConfig,
    ) -> Self {
        Self {
            user_repository: Arc::new(user_repository),
            menu_item_repository: Arc::new(menu_item_repository),
            diet_plan_repository: Arc::new(diet_plan_repository),
            health_check_repository: Arc::new(health_check_repository),
            llm_client: Arc::new(llm_client),
            token_verifier: Arc::new(token_verifier),
            recommendation_config,
        }
    }
}

impl<U, MI, DP, HC, LLM, TV> Clone for Service<U, MI, DP, HC, LLM, TV>
where
    U: UserRepository,
    MI: MenuItemRepository,
    DP: DietPlanRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    TV: TokenVerifier,
{
    fn clone(&self) -> Self {
        Self {
            user_repository: Arc::clone(&self.user_repository),
            menu_item_repository: Arc::clone(&self.menu_item_repository),
            diet_plan_repository: Arc::clone(&self.diet_plan_repository),
            health_check_repository: Arc::clone(&self.health_check_repository),
            llm_client: Arc::clone(&self.llm_client),
            token_verifier: Arc::clone(&self.token_verifier),
            recommendation_config: self.recommendation_config.clone(),
        }
    }
}
