pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{MenuItem, NutritionInfo};
pub use ports::{MenuItemRepository, MenuService};
