use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateHealthProfileValidator {
    #[serde(default)]
    #[validate(length(max = 32, message = "phone is too long"))]
    pub phone: Option<String>,

    /// Years; 0 means not specified.
    #[serde(default)]
    #[validate(range(max = 150, message = "age must be between 0 and 150"))]
    pub age: u32,

    /// Kilograms; 0 means not specified.
    #[serde(default)]
    #[validate(range(min = 0.0, max = 500.0, message = "weight must be between 0 and 500"))]
    pub weight: f64,

    /// Centimetres; 0 means not specified.
    #[serde(default)]
    #[validate(range(min = 0.0, max = 300.0, message = "height must be between 0 and 300"))]
    pub height: f64,

    #[serde(default)]
    #[validate(length(max = 50, message = "too many medical conditions"))]
    pub medical_conditions: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 50, message = "too many allergies"))]
    pub allergies: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 50, message = "too many dietary preferences"))]
    pub dietary_preferences: Vec<String>,
}
