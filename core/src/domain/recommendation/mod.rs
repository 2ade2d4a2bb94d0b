pub mod calculator;
pub mod defaults;
pub mod entities;
pub mod parser;
pub mod ports;
pub mod prompt;
pub mod services;
pub mod value_objects;

pub use entities::{Extracted, MealSlot, NutritionGoals, Recommendation, RecommendedMenuItem};
pub use ports::{LLMClient, RecommendationService};
pub use value_objects::{ActivityLevel, RecommendationRequest};
