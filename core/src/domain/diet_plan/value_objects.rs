use chrono::NaiveDate;

#[derive(Debug, Clone, Default)]
pub struct CreateDietPlanInput {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub meal_plan: Vec<serde_json::Value>,
    pub calories_target: Option<u32>,
    pub protein_target: Option<u32>,
    pub carbs_target: Option<u32>,
    pub fat_target: Option<u32>,
    pub special_instructions: Option<String>,
    pub goals: Vec<String>,
    pub restrictions: Vec<String>,
}
