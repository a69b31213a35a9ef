pub mod entity;
pub mod transport;
pub mod validation;

pub use entity::Promotion;
pub use validation::{validate_and_build, ValidationError};
