//! Route handlers, one module per resource.

pub mod diagnoses;
pub mod doctors;
pub mod health;
pub mod health_systems;
pub mod patients;
pub mod specialties;
pub mod visits;

use chrono::NaiveDate;

/// Reference date for "not in the future" checks.
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
