pub mod create_diet_plan;
pub mod get_diet_plans;
