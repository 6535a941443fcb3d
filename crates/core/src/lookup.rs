//! Reference resolution.
//!
//! Turns ids into stored entities, failing with [`ClinicError::NotFound`] on the first miss.
//! Everything here only reads, so a write path can resolve all of its references before it
//! mutates anything.

use crate::constants::MSG_DIAGNOSES_EMPTY;
use crate::models::{Diagnosis, Doctor, HealthSystem, Patient, Specialty, Visit};
use crate::repositories::{diagnoses, doctors, health_systems, patients, specialties, visits};
use crate::{ClinicError, ClinicResult, EntityKind};
use rusqlite::Connection;
use std::collections::BTreeSet;

fn found<T>(kind: EntityKind, value: Option<T>) -> ClinicResult<T> {
    value.ok_or(ClinicError::NotFound(kind))
}

pub fn require_diagnosis(conn: &Connection, id: i64) -> ClinicResult<Diagnosis> {
    found(EntityKind::Diagnosis, diagnoses::get_diagnosis(conn, id)?)
}

pub fn require_specialty(conn: &Connection, id: i64) -> ClinicResult<Specialty> {
    found(EntityKind::Specialty, specialties::get_specialty(conn, id)?)
}

pub fn require_health_system(conn: &Connection, id: i64) -> ClinicResult<HealthSystem> {
    found(
        EntityKind::HealthSystem,
        health_systems::get_health_system(conn, id)?,
    )
}

pub fn require_doctor(conn: &Connection, id: i64) -> ClinicResult<Doctor> {
    found(EntityKind::Doctor, doctors::get_doctor(conn, id)?)
}

pub fn require_patient(conn: &Connection, id: i64) -> ClinicResult<Patient> {
    found(EntityKind::Patient, patients::get_patient(conn, id)?)
}

pub fn require_visit(conn: &Connection, id: i64) -> ClinicResult<Visit> {
    found(EntityKind::Visit, visits::get_visit(conn, id)?)
}

/// Resolves every specialty id. An empty set resolves to no specialties.
pub fn resolve_specialties(conn: &Connection, ids: &BTreeSet<i64>) -> ClinicResult<Vec<Specialty>> {
    ids.iter().map(|&id| require_specialty(conn, id)).collect()
}

/// Resolves every diagnosis id.
///
/// # Errors
///
/// [`ClinicError::Validation`] for an empty set, otherwise `NotFound(Diagnosis)` for the
/// first id (in ascending order) that does not exist.
pub fn resolve_diagnoses(conn: &Connection, ids: &BTreeSet<i64>) -> ClinicResult<Vec<Diagnosis>> {
    if ids.is_empty() {
        return Err(ClinicError::invalid(MSG_DIAGNOSES_EMPTY));
    }
    ids.iter().map(|&id| require_diagnosis(conn, id)).collect()
}
