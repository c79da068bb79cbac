//! # Anime Catalog - Hardened CRUD Service
//!
//! A small REST service for a single "anime" resource, built on Clean
//! Architecture principles. Paging input is clamped before it reaches
//! storage, and every page leaving storage is re-checked and sanitized.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Core types (entities, value objects, domain errors)
//! - **Application**: Hardening stages, the query service and ports (interfaces)
//! - **Infrastructure**: Postgres, in-memory and deadline-bounded repositories
//! - **API**: HTTP handlers and middleware
//!
//! ## Example Usage
//!
//! ```no_run
//! use anime_catalog::application::hardening::sanitize;
//!
//! assert_eq!(sanitize(Some("<h1>alfredo</h1>")).as_deref(), Some("alfredo"));
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::{dto, hardening, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
