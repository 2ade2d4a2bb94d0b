use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::{entities::app_errors::CoreError, generate_timestamp};

pub const MAX_AGE: u32 = 150;
pub const MAX_WEIGHT_KG: f64 = 500.0;
pub const MAX_HEIGHT_CM: f64 = 300.0;

/// Physiological data and preferences used to personalise recommendations.
///
/// Zero means "not specified" for the numeric fields; the list fields are kept
/// in insertion order without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthProfile {
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub medical_conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub dietary_preferences: Vec<String>,
}

impl HealthProfile {
    pub fn new(
        age: u32,
        weight: f64,
        height: f64,
        medical_conditions: Vec<String>,
        allergies: Vec<String>,
        dietary_preferences: Vec<String>,
    ) -> Result<Self, CoreError> {
        let profile = Self {
            age,
            weight,
            height,
            medical_conditions: normalize_set(medical_conditions),
            allergies: normalize_set(allergies),
            dietary_preferences: normalize_set(dietary_preferences),
        };
        profile.validate()?;

        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.age > MAX_AGE {
            return Err(CoreError::InvalidHealthProfile(format!(
                "age must be between 0 and {MAX_AGE}"
            )));
        }
        if !(0.0..=MAX_WEIGHT_KG).contains(&self.weight) {
            return Err(CoreError::InvalidHealthProfile(format!(
                "weight must be between 0 and {MAX_WEIGHT_KG} kg"
            )));
        }
        if !(0.0..=MAX_HEIGHT_CM).contains(&self.height) {
            return Err(CoreError::InvalidHealthProfile(format!(
                "height must be between 0 and {MAX_HEIGHT_CM} cm"
            )));
        }

        Ok(())
    }

    /// True when age, weight and height are all usable for energy estimates.
    pub fn has_body_metrics(&self) -> bool {
        self.age > 0
            && self.age <= MAX_AGE
            && self.weight > 0.0
            && self.weight <= MAX_WEIGHT_KG
            && self.height > 0.0
            && self.height <= MAX_HEIGHT_CM
    }
}

/// Trims entries, drops blanks and repeats (case-insensitive), keeps order.
pub fn normalize_set(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if out.iter().any(|v| v.eq_ignore_ascii_case(value)) {
            continue;
        }
        out.push(value.to_string());
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub subject: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub health_profile: HealthProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(subject: String, name: String, email: String, phone: String) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            subject,
            name,
            email,
            phone,
            health_profile: HealthProfile::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_profile(&mut self, phone: Option<String>, health_profile: HealthProfile) {
        if let Some(phone) = phone {
            self.phone = phone;
        }
        self.health_profile = health_profile;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_set_drops_blanks_and_repeats() {
        let values = vec![
            " peanuts ".to_string(),
            "".to_string(),
            "Peanuts".to_string(),
            "shellfish".to_string(),
        ];
        assert_eq!(normalize_set(values), vec!["peanuts", "shellfish"]);
    }

    #[test]
    fn test_profile_rejects_out_of_range_values() {
        assert!(HealthProfile::new(151, 70.0, 170.0, vec![], vec![], vec![]).is_err());
        assert!(HealthProfile::new(30, 500.5, 170.0, vec![], vec![], vec![]).is_err());
        assert!(HealthProfile::new(30, 70.0, -1.0, vec![], vec![], vec![]).is_err());
        assert!(HealthProfile::new(30, 70.0, 170.0, vec![], vec![], vec![]).is_ok());
    }

    #[test]
    fn test_has_body_metrics() {
        assert!(!HealthProfile::default().has_body_metrics());
        let profile = HealthProfile::new(30, 65.0, 170.0, vec![], vec![], vec![]).unwrap();
        assert!(profile.has_body_metrics());
    }
}
