use tracing::{debug, instrument};

use crate::domain::{
    authentication::{
        ports::{AuthService, TokenVerifier},
        value_objects::Identity,
    },
    common::{entities::app_errors::CoreError, services::Service},
    diet_plan::ports::DietPlanRepository,
    health::ports::HealthCheckRepository,
    health_profile::ports::UserRepository,
    menu::ports::MenuItemRepository,
    recommendation::ports::LLMClient,
};

impl<U, MI, DP, HC, LLM, TV> AuthService for Service<U, MI, DP, HC, LLM, TV>
where
    U: UserRepository,
    MI: MenuItemRepository,
    DP: DietPlanRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    TV: TokenVerifier,
{
    #[instrument(skip_all)]
    async fn authenticate(&self, token: String) -> Result<Identity, CoreError> {
        if token.trim().is_empty() {
            return Err(CoreError::Unauthorized);
        }

        let identity = self.token_verifier.verify(token).await?;
        debug!(subject = %identity.subject, "bearer token accepted");

        Ok(identity)
    }
}
