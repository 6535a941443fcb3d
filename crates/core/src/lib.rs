//! # Clinic Core
//!
//! Business logic for the clinic records service.
//!
//! This crate owns the SQLite store and everything that runs against it:
//! - Reference resolution and business rules for writes
//! - CRUD services for diagnoses, specialties, health systems, doctors, patients and visits
//! - Income and insurance reports computed over recorded visits
//!
//! **No API concerns**: HTTP routing and wire error bodies belong in `api-rest`; request and
//! response shapes live in `api-shared`.

pub mod aggregation;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod lookup;
pub mod mapping;
pub mod models;
pub mod repositories;
pub mod rules;
pub mod services;
pub mod validation;

pub use clinic_types::{Fee, FeeError, NonEmptyText, TextError};
pub use config::{database_location_from_env_value, CoreConfig, DatabaseLocation};
pub use db::Store;
pub use error::{ClinicError, ClinicResult, EntityKind};
pub use services::{
    ClinicServices, DiagnosisService, DoctorService, HealthSystemService, PatientService,
    SpecialtyService, VisitService,
};
