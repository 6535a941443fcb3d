//! Patients, their GP assignment and the insurance reports.

use crate::aggregation::uninsured_percentage;
use crate::db::Store;
use crate::lookup::{require_doctor, require_patient};
use crate::models::{Patient, PatientDraft};
use crate::repositories::patients;
use crate::rules::{ensure_gp, ensure_patients_exist};
use crate::{ClinicError, ClinicResult, EntityKind};
use rusqlite::Connection;
use rust_decimal::Decimal;

#[derive(Clone, Debug)]
pub struct PatientService {
    store: Store,
}

/// The named GP, if any, must exist and be a general practitioner.
fn check_gp(conn: &Connection, draft: &PatientDraft) -> ClinicResult<()> {
    match draft.gp_id {
        Some(gp_id) => ensure_gp(&require_doctor(conn, gp_id)?),
        None => Ok(()),
    }
}

impl PatientService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn create(&self, draft: PatientDraft) -> ClinicResult<Patient> {
        let patient = self.store.with_conn(|conn| {
            check_gp(conn, &draft)?;
            patients::insert_patient(conn, &draft)
        })?;
        tracing::info!(id = patient.id, gp_id = ?patient.gp_id, "created patient");
        Ok(patient)
    }

    pub fn get(&self, id: i64) -> ClinicResult<Patient> {
        self.store.with_conn(|conn| require_patient(conn, id))
    }

    pub fn list(&self) -> ClinicResult<Vec<Patient>> {
        self.store.with_conn(patients::list_patients)
    }

    /// Replaces every attribute. Omitting the GP clears it.
    pub fn update(&self, id: i64, draft: PatientDraft) -> ClinicResult<Patient> {
        let patient = self.store.with_conn(|conn| {
            require_patient(conn, id)?;
            check_gp(conn, &draft)?;
            patients::update_patient(conn, id, &draft)?
                .ok_or(ClinicError::NotFound(EntityKind::Patient))
        })?;
        tracing::info!(id, "updated patient");
        Ok(patient)
    }

    /// Fails with [`ClinicError::HasRelations`] while a visit references the patient.
    pub fn delete(&self, id: i64) -> ClinicResult<()> {
        self.store.with_conn(|conn| {
            if patients::delete_patient(conn, id)? {
                Ok(())
            } else {
                Err(ClinicError::NotFound(EntityKind::Patient))
            }
        })?;
        tracing::info!(id, "deleted patient");
        Ok(())
    }

    pub fn list_insured(&self) -> ClinicResult<Vec<Patient>> {
        self.store
            .with_conn(|conn| patients::list_patients_by_insurance(conn, true))
    }

    /// Share of patients without insurance, as a percentage with two decimal places.
    ///
    /// # Errors
    ///
    /// [`ClinicError::NoPatients`] when no patient is stored.
    pub fn uninsured_percentage(&self) -> ClinicResult<Decimal> {
        let (total, uninsured) = self.store.with_conn(|conn| {
            Ok((
                patients::count_patients(conn)?,
                patients::count_patients_by_insurance(conn, false)?,
            ))
        })?;
        ensure_patients_exist(total)?;
        uninsured_percentage(total, uninsured).ok_or(ClinicError::NoPatients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DoctorDraft;
    use crate::services::DoctorService;
    use crate::NonEmptyText;
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;

    fn patient(name: &str, has_insurance: bool, gp_id: Option<i64>) -> PatientDraft {
        PatientDraft {
            name: NonEmptyText::new(name).unwrap(),
            has_insurance,
            gp_id,
        }
    }

    fn doctor(service: &DoctorService, is_gp: bool) -> i64 {
        service
            .create(DoctorDraft {
                name: NonEmptyText::new("Dr. Watson").unwrap(),
                birthdate: None,
                is_gp,
                specialty_ids: BTreeSet::new(),
            })
            .unwrap()
            .id
    }

    #[test]
    fn test_patient_without_gp_is_stored_without_gp() {
        let service = PatientService::new(Store::open_in_memory().unwrap());
        let created = service.create(patient("Ann", true, None)).unwrap();
        assert_eq!(service.get(created.id).unwrap().gp_id, None);
    }

    #[test]
    fn test_gp_must_be_general_practitioner() {
        let store = Store::open_in_memory().unwrap();
        let doctors = DoctorService::new(store.clone());
        let service = PatientService::new(store);
        let gp = doctor(&doctors, true);
        let specialist = doctor(&doctors, false);

        let created = service.create(patient("Ann", true, Some(gp))).unwrap();
        assert_eq!(created.gp_id, Some(gp));

        let err = service
            .update(created.id, patient("Ann B.", false, Some(specialist)))
            .expect_err("should fail");
        assert!(matches!(err, ClinicError::DoctorNotGp { doctor_id } if doctor_id == specialist));
        assert_eq!(service.get(created.id).unwrap(), created);

        let err = service
            .create(patient("Bob", true, Some(specialist)))
            .expect_err("should fail");
        assert!(matches!(err, ClinicError::DoctorNotGp { .. }));
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_gp_is_not_found() {
        let service = PatientService::new(Store::open_in_memory().unwrap());
        assert!(matches!(
            service.create(patient("Ann", true, Some(9))),
            Err(ClinicError::NotFound(EntityKind::Doctor))
        ));
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_update_checks_target_before_gp() {
        let service = PatientService::new(Store::open_in_memory().unwrap());
        assert!(matches!(
            service.update(5, patient("Ann", true, Some(9))),
            Err(ClinicError::NotFound(EntityKind::Patient))
        ));
    }

    #[test]
    fn test_gp_in_use_blocks_doctor_delete() {
        let store = Store::open_in_memory().unwrap();
        let doctors = DoctorService::new(store.clone());
        let service = PatientService::new(store);
        let gp = doctor(&doctors, true);
        service.create(patient("Ann", true, Some(gp))).unwrap();

        assert!(matches!(doctors.delete(gp), Err(ClinicError::HasRelations)));
        assert!(doctors.get(gp).is_ok());
    }

    #[test]
    fn test_insurance_reports() {
        let service = PatientService::new(Store::open_in_memory().unwrap());
        assert!(matches!(
            service.uninsured_percentage(),
            Err(ClinicError::NoPatients)
        ));

        let ann = service.create(patient("Ann", true, None)).unwrap();
        service.create(patient("Bob", false, None)).unwrap();
        service.create(patient("Cid", false, None)).unwrap();

        assert_eq!(service.list_insured().unwrap(), vec![ann]);
        assert_eq!(service.uninsured_percentage().unwrap(), dec!(66.67));
    }
}
