pub mod diet_plan;
pub mod health;
pub mod menu;
pub mod profile;
pub mod recommendation;
pub mod server;
