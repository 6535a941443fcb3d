//! Constants used throughout the clinic core crate.
//!
//! Defaults, on-disk formats and the validation messages returned to callers live here so
//! that the REST layer, the CLI and the tests agree on them.

/// Default SQLite database file when no explicit path is configured.
pub const DEFAULT_DATABASE_PATH: &str = "clinic.db";

/// Path value that selects a private in-memory database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Decimal places of the uninsured-patient percentage.
pub const PERCENTAGE_SCALE: u32 = 2;

pub const MSG_NAME_EMPTY: &str = "Name cannot be empty";
pub const MSG_FEE_MISSING: &str = "Must provide fee value";
pub const MSG_FEE_NOT_POSITIVE: &str = "Fee value must be positive";
pub const MSG_DATE_NOT_PAST: &str = "The date has to be in the past";
pub const MSG_IS_GP_MISSING: &str =
    "Must provide information whether the doctor is general practitioner";
pub const MSG_HAS_INSURANCE_MISSING: &str =
    "Must provide information whether the patient has health insurance";
pub const MSG_PATIENT_MISSING: &str = "Must provide patient";
pub const MSG_DOCTOR_MISSING: &str = "Must provide doctor";
pub const MSG_HEALTH_SYSTEM_MISSING: &str = "Must provide Health System";
pub const MSG_DIAGNOSES_NULL: &str = "Diagnoses cannot be null";
pub const MSG_DIAGNOSES_EMPTY: &str = "Diagnoses cannot be empty";
pub const MSG_VISIT_DATE_MISSING: &str = "Must provide the date of the visit";
pub const MSG_VISIT_DATE_FUTURE: &str = "The date has to be in the past or today";
