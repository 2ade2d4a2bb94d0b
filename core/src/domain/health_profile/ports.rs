use std::future::Future;

use crate::domain::{
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    health_profile::{entities::User, value_objects::UpdateHealthProfileInput},
};

/// Profile source: users are keyed by their identity provider subject.
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    fn get_by_subject(
        &self,
        subject: String,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    /// Inserts the user or replaces the stored row with the same subject.
    fn upsert(&self, user: User) -> impl Future<Output = Result<User, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait HealthProfileService: Send + Sync {
    fn get_profile(
        &self,
        identity: Identity,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn update_profile(
        &self,
        identity: Identity,
        input: UpdateHealthProfileInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;
}
