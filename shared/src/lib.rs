pub mod models;
pub mod seed;

pub use models::*;
pub use seed::default_property;
