//! # API Shared
//!
//! Shared wire definitions for the clinic APIs.
//!
//! Contains:
//! - Request and response shapes for every entity kind (`dto` module)
//! - Error bodies returned by the REST layer
//! - Shared services like `HealthService`
//!
//! Used by `clinic-core` (validation and response mapping) and `api-rest`.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::{HealthRes, HealthService};
