//! SQLite repositories, one module per table family.
//!
//! Every function takes a borrowed [`rusqlite::Connection`] and performs no locking of its
//! own; callers go through [`crate::db::Store::with_conn`]. Lookups return `Option` and
//! deletes return `bool`, leaving the not-found decision to the service layer.

pub mod diagnoses;
pub mod doctors;
pub mod health_systems;
pub mod patients;
pub mod specialties;
pub mod visits;

pub(crate) mod shared;
