use crate::{
    domain::health_profile::entities::{HealthProfile, User},
    entity::users,
};

pub(crate) fn string_list(value: &serde_json::Value) -> Vec<String> {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

impl From<&users::Model> for User {
    fn from(model: &users::Model) -> Self {
        Self {
            id: model.id,
            subject: model.subject.clone(),
            name: model.name.clone(),
            email: model.email.clone(),
            phone: model.phone.clone(),
            health_profile: HealthProfile {
                age: u32::try_from(model.age).unwrap_or_default(),
                weight: model.weight,
                height: model.height,
                medical_conditions: string_list(&model.medical_conditions),
                allergies: string_list(&model.allergies),
                dietary_preferences: string_list(&model.dietary_preferences),
            },
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self::from(&model)
    }
}
