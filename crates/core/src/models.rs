//! Clinic entities and write drafts.
//!
//! Entities are what the store hands back: every one carries its server-assigned id.
//! Drafts are validated inputs for a create or a full-replacement update. Field types
//! carry the invariants (`NonEmptyText`, `Fee`), so a draft that exists is already
//! structurally valid; only the references inside it still need resolving.

use crate::constants::MSG_DIAGNOSES_EMPTY;
use crate::{ClinicError, ClinicResult, Fee, NonEmptyText};
use chrono::NaiveDate;
use std::collections::BTreeSet;

// ============================================================================
// ENTITIES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    pub id: i64,
    pub name: NonEmptyText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specialty {
    pub id: i64,
    pub name: NonEmptyText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthSystem {
    pub id: i64,
    pub no_insurance_fee: Fee,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    pub id: i64,
    pub name: NonEmptyText,
    pub birthdate: Option<NaiveDate>,
    pub is_gp: bool,
    /// Ordered by specialty id.
    pub specialties: Vec<Specialty>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: i64,
    pub name: NonEmptyText,
    pub has_insurance: bool,
    pub gp_id: Option<i64>,
}

/// A recorded visit.
///
/// The health system is carried in full because every income figure is derived from its
/// fee; patient and doctor are referenced by id. The patient's insurance flag is captured
/// at read time so insurance-filtered aggregates need no second lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub id: i64,
    pub patient_id: i64,
    pub patient_has_insurance: bool,
    pub doctor_id: i64,
    pub health_system: HealthSystem,
    /// Never empty. Ordered by diagnosis id.
    pub diagnoses: Vec<Diagnosis>,
    pub visit_date: NaiveDate,
}

impl Visit {
    /// The amount this visit contributes to every income total.
    pub fn fee(&self) -> Fee {
        self.health_system.no_insurance_fee
    }

    pub fn cites(&self, diagnosis_id: i64) -> bool {
        self.diagnoses.iter().any(|d| d.id == diagnosis_id)
    }
}

// ============================================================================
// DRAFTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorDraft {
    pub name: NonEmptyText,
    pub birthdate: Option<NaiveDate>,
    pub is_gp: bool,
    /// May be empty: a doctor with no specialties is valid.
    pub specialty_ids: BTreeSet<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDraft {
    pub name: NonEmptyText,
    pub has_insurance: bool,
    pub gp_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitDraft {
    patient_id: i64,
    doctor_id: i64,
    health_system_id: i64,
    diagnosis_ids: BTreeSet<i64>,
    visit_date: NaiveDate,
}

impl VisitDraft {
    /// Builds a visit draft.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::Validation`] if `diagnosis_ids` is empty.
    pub fn new(
        patient_id: i64,
        doctor_id: i64,
        health_system_id: i64,
        diagnosis_ids: BTreeSet<i64>,
        visit_date: NaiveDate,
    ) -> ClinicResult<Self> {
        if diagnosis_ids.is_empty() {
            return Err(ClinicError::invalid(MSG_DIAGNOSES_EMPTY));
        }
        Ok(Self {
            patient_id,
            doctor_id,
            health_system_id,
            diagnosis_ids,
            visit_date,
        })
    }

    pub fn patient_id(&self) -> i64 {
        self.patient_id
    }

    pub fn doctor_id(&self) -> i64 {
        self.doctor_id
    }

    pub fn health_system_id(&self) -> i64 {
        self.health_system_id
    }

    pub fn diagnosis_ids(&self) -> &BTreeSet<i64> {
        &self.diagnosis_ids
    }

    pub fn visit_date(&self) -> NaiveDate {
        self.visit_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_draft_requires_diagnoses() {
        let date = NaiveDate::from_ymd_opt(2022, 3, 1).unwrap();
        let err = VisitDraft::new(1, 2, 3, BTreeSet::new(), date).expect_err("should fail");
        match err {
            ClinicError::Validation(messages) => {
                assert_eq!(messages, vec![MSG_DIAGNOSES_EMPTY.to_string()])
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let draft = VisitDraft::new(1, 2, 3, BTreeSet::from([9]), date).unwrap();
        assert_eq!(draft.diagnosis_ids().len(), 1);
        assert_eq!(draft.visit_date(), date);
    }
}
