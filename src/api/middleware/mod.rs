pub mod cors;
pub mod validation;

pub use cors::create_cors_layer;
pub use validation::{validate_and_respond, FieldError};
