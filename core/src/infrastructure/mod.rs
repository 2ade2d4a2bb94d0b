pub mod auth;
pub mod db;
pub mod diet_plan;
pub mod health;
pub mod llm;
pub mod menu;
pub mod user;
