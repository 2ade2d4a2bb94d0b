use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    sea_query::OnConflict,
};
use serde_json::json;
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        health_profile::{entities::User, ports::UserRepository},
    },
    entity::users::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pub db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl UserRepository for PostgresUserRepository {
    async fn get_by_subject(&self, subject: String) -> Result<Option<User>, CoreError> {
        let user = Entity::find()
            .filter(Column::Subject.eq(subject))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get user by subject: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(user.map(User::from))
    }

    async fn upsert(&self, user: User) -> Result<User, CoreError> {
        let profile = &user.health_profile;
        let active_model = ActiveModel {
            id: Set(user.id),
            subject: Set(user.subject.clone()),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
            age: Set(profile.age as i32),
            weight: Set(profile.weight),
            height: Set(profile.height),
            medical_conditions: Set(json!(profile.medical_conditions)),
            allergies: Set(json!(profile.allergies)),
            dietary_preferences: Set(json!(profile.dietary_preferences)),
            created_at: Set(user.created_at.fixed_offset()),
            updated_at: Set(user.updated_at.fixed_offset()),
        };

        let on_conflict = OnConflict::column(Column::Subject)
            .update_columns([
                Column::Name,
                Column::Email,
                Column::Phone,
                Column::Age,
                Column::Weight,
                Column::Height,
                Column::MedicalConditions,
                Column::Allergies,
                Column::DietaryPreferences,
                Column::UpdatedAt,
            ])
            .to_owned();

        let stored = Entity::insert(active_model)
            .on_conflict(on_conflict)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to upsert user: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(User::from(stored))
    }
}
