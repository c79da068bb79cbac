pub mod builder;
pub mod dto;
pub mod errors;
pub mod hardening;
pub mod ports;
pub mod use_cases;
