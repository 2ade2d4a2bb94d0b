pub mod authentication;
pub mod common;
pub mod diet_plan;
pub mod health;
pub mod health_profile;
pub mod menu;
pub mod recommendation;
