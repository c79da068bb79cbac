pub mod animes;
pub mod health;

#[cfg(test)]
mod tests;

pub use animes::{
    create_handler, delete_handler, find_by_name_handler, list_handler, update_handler,
};
pub use health::{health_handler, readiness_handler};
