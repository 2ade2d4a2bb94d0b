#[derive(Debug, Clone, Default)]
pub struct UpdateHealthProfileInput {
    pub phone: Option<String>,
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub medical_conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub dietary_preferences: Vec<String>,
}
