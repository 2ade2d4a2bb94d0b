pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{HealthProfile, User};
pub use ports::{HealthProfileService, UserRepository};
