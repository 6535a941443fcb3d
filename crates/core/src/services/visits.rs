//! Visits and the income reports derived from them.
//!
//! A visit write resolves its references in a fixed order (diagnoses, patient, doctor,
//! health system) and fails on the first miss before anything is written. Reports select
//! the relevant visits and reduce them in [`crate::aggregation`].

use crate::aggregation::{count_doctors_above, total_income};
use crate::db::Store;
use crate::lookup::{
    require_diagnosis, require_doctor, require_health_system, require_patient, require_visit,
    resolve_diagnoses,
};
use crate::models::{Visit, VisitDraft};
use crate::repositories::visits::{self, VisitFilter, VisitRefs};
use crate::rules::ensure_non_negative_threshold;
use crate::{ClinicError, ClinicResult, EntityKind};
use rusqlite::Connection;
use rust_decimal::Decimal;

#[derive(Clone, Debug)]
pub struct VisitService {
    store: Store,
}

fn resolve_refs(conn: &Connection, draft: &VisitDraft) -> ClinicResult<VisitRefs> {
    let diagnoses = resolve_diagnoses(conn, draft.diagnosis_ids())?;
    let patient = require_patient(conn, draft.patient_id())?;
    let doctor = require_doctor(conn, draft.doctor_id())?;
    let health_system = require_health_system(conn, draft.health_system_id())?;
    Ok(VisitRefs {
        patient,
        doctor_id: doctor.id,
        health_system,
        diagnoses,
    })
}

impl VisitService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn create(&self, draft: VisitDraft) -> ClinicResult<Visit> {
        let visit = self.store.with_conn(|conn| {
            let refs = resolve_refs(conn, &draft)?;
            visits::insert_visit(conn, &draft, refs)
        })?;
        tracing::info!(
            id = visit.id,
            patient_id = visit.patient_id,
            doctor_id = visit.doctor_id,
            "recorded visit"
        );
        Ok(visit)
    }

    pub fn get(&self, id: i64) -> ClinicResult<Visit> {
        self.store.with_conn(|conn| require_visit(conn, id))
    }

    pub fn list(&self) -> ClinicResult<Vec<Visit>> {
        self.store
            .with_conn(|conn| visits::select_visits(conn, VisitFilter::All))
    }

    pub fn update(&self, id: i64, draft: VisitDraft) -> ClinicResult<Visit> {
        let visit = self.store.with_conn(|conn| {
            require_visit(conn, id)?;
            let refs = resolve_refs(conn, &draft)?;
            visits::update_visit(conn, id, &draft, refs)?
                .ok_or(ClinicError::NotFound(EntityKind::Visit))
        })?;
        tracing::info!(id, "updated visit");
        Ok(visit)
    }

    pub fn delete(&self, id: i64) -> ClinicResult<()> {
        self.store.with_conn(|conn| {
            if visits::delete_visit(conn, id)? {
                Ok(())
            } else {
                Err(ClinicError::NotFound(EntityKind::Visit))
            }
        })?;
        tracing::info!(id, "deleted visit");
        Ok(())
    }

    fn income(&self, filter: VisitFilter) -> ClinicResult<Decimal> {
        let selected = self
            .store
            .with_conn(|conn| visits::select_visits(conn, filter))?;
        total_income(&selected)
    }

    /// Income over every recorded visit.
    pub fn total_income(&self) -> ClinicResult<Decimal> {
        self.income(VisitFilter::All)
    }

    pub fn total_income_by_doctor(&self, doctor_id: i64) -> ClinicResult<Decimal> {
        let selected = self.store.with_conn(|conn| {
            require_doctor(conn, doctor_id)?;
            visits::select_visits(conn, VisitFilter::Doctor(doctor_id))
        })?;
        total_income(&selected)
    }

    pub fn count_visits_by_patient(&self, patient_id: i64) -> ClinicResult<u64> {
        self.store.with_conn(|conn| {
            require_patient(conn, patient_id)?;
            visits::count_visits_by_patient(conn, patient_id)
        })
    }

    pub fn count_visits_by_diagnosis(&self, diagnosis_id: i64) -> ClinicResult<u64> {
        self.store.with_conn(|conn| {
            require_diagnosis(conn, diagnosis_id)?;
            visits::count_visits_by_diagnosis(conn, diagnosis_id)
        })
    }

    /// Number of doctors whose income is strictly greater than `min_income`.
    ///
    /// # Errors
    ///
    /// [`ClinicError::NegativeIncome`] for a negative threshold; the store is not read.
    pub fn count_doctors_above_income(&self, min_income: Decimal) -> ClinicResult<u64> {
        ensure_non_negative_threshold(min_income)?;
        let selected = self
            .store
            .with_conn(|conn| visits::select_visits(conn, VisitFilter::All))?;
        count_doctors_above(&selected, min_income)
    }

    /// Income over visits citing the diagnosis. Each visit contributes its whole fee.
    pub fn total_income_by_diagnosis(&self, diagnosis_id: i64) -> ClinicResult<Decimal> {
        let selected = self.store.with_conn(|conn| {
            require_diagnosis(conn, diagnosis_id)?;
            visits::select_visits(conn, VisitFilter::Diagnosis(diagnosis_id))
        })?;
        total_income(&selected)
    }

    pub fn total_income_from_uninsured_patients(&self) -> ClinicResult<Decimal> {
        self.income(VisitFilter::PatientInsurance(false))
    }

    pub fn doctor_income_from_insured_patients(&self, doctor_id: i64) -> ClinicResult<Decimal> {
        let selected = self.store.with_conn(|conn| {
            require_doctor(conn, doctor_id)?;
            visits::select_visits(
                conn,
                VisitFilter::DoctorAndPatientInsurance {
                    doctor_id,
                    has_insurance: true,
                },
            )
        })?;
        total_income(&selected)
    }
}
