use tracing::{info, instrument};

use crate::domain::{
    authentication::{ports::TokenVerifier, value_objects::Identity},
    common::{entities::app_errors::CoreError, services::Service},
    diet_plan::ports::DietPlanRepository,
    health::ports::HealthCheckRepository,
    health_profile::{
        entities::{HealthProfile, User},
        ports::{HealthProfileService, UserRepository},
        value_objects::UpdateHealthProfileInput,
    },
    menu::ports::MenuItemRepository,
    recommendation::ports::LLMClient,
};

impl<U, MI, DP, HC, LLM, TV> HealthProfileService for Service<U, MI, DP, HC, LLM, TV>
where
    U: UserRepository,
    MI: MenuItemRepository,
    DP: DietPlanRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    TV: TokenVerifier,
{
    #[instrument(skip_all, fields(subject = %identity.subject))]
    async fn get_profile(&self, identity: Identity) -> Result<User, CoreError> {
        self.user_repository
            .get_by_subject(identity.subject)
            .await?
            .ok_or(CoreError::NotFound)
    }

    #[instrument(skip_all, fields(subject = %identity.subject))]
    async fn update_profile(
        &self,
        identity: Identity,
        input: UpdateHealthProfileInput,
    ) -> Result<User, CoreError> {
        let health_profile = HealthProfile::new(
            input.age,
            input.weight,
            input.height,
            input.medical_conditions,
            input.allergies,
            input.dietary_preferences,
        )?;

        let mut user = match self
            .user_repository
            .get_by_subject(identity.subject.clone())
            .await?
        {
            Some(user) => user,
            None => User::new(
                identity.subject.clone(),
                identity.name.clone().unwrap_or_default(),
                identity.email.clone().unwrap_or_default(),
                String::new(),
            ),
        };

        user.update_profile(input.phone, health_profile);
        let user = self.user_repository.upsert(user).await?;

        info!(user_id = %user.id, "health profile updated");

        Ok(user)
    }
}
