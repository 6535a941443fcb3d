//! Doctors and their specialties.

use crate::db::Store;
use crate::lookup::{require_doctor, resolve_specialties};
use crate::models::{Doctor, DoctorDraft};
use crate::repositories::doctors;
use crate::{ClinicError, ClinicResult, EntityKind};

#[derive(Clone, Debug)]
pub struct DoctorService {
    store: Store,
}

impl DoctorService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Creates a doctor. Every specialty id must exist.
    pub fn create(&self, draft: DoctorDraft) -> ClinicResult<Doctor> {
        let doctor = self.store.with_conn(|conn| {
            let specialties = resolve_specialties(conn, &draft.specialty_ids)?;
            doctors::insert_doctor(conn, &draft, specialties)
        })?;
        tracing::info!(id = doctor.id, is_gp = doctor.is_gp, "created doctor");
        Ok(doctor)
    }

    pub fn get(&self, id: i64) -> ClinicResult<Doctor> {
        self.store.with_conn(|conn| require_doctor(conn, id))
    }

    pub fn list(&self) -> ClinicResult<Vec<Doctor>> {
        self.store.with_conn(doctors::list_doctors)
    }

    /// Replaces the doctor's attributes and specialty set.
    ///
    /// Clearing `is_gp` does not touch patients that already name this doctor as GP.
    pub fn update(&self, id: i64, draft: DoctorDraft) -> ClinicResult<Doctor> {
        let doctor = self.store.with_conn(|conn| {
            require_doctor(conn, id)?;
            let specialties = resolve_specialties(conn, &draft.specialty_ids)?;
            doctors::update_doctor(conn, id, &draft, specialties)?
                .ok_or(ClinicError::NotFound(EntityKind::Doctor))
        })?;
        tracing::info!(id, "updated doctor");
        Ok(doctor)
    }

    /// Fails with [`ClinicError::HasRelations`] while a patient or visit references the doctor.
    pub fn delete(&self, id: i64) -> ClinicResult<()> {
        self.store.with_conn(|conn| {
            if doctors::delete_doctor(conn, id)? {
                Ok(())
            } else {
                Err(ClinicError::NotFound(EntityKind::Doctor))
            }
        })?;
        tracing::info!(id, "deleted doctor");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SpecialtyService;
    use crate::NonEmptyText;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn draft(specialty_ids: BTreeSet<i64>) -> DoctorDraft {
        DoctorDraft {
            name: NonEmptyText::new("Dr. Strange").unwrap(),
            birthdate: NaiveDate::from_ymd_opt(1970, 1, 1),
            is_gp: false,
            specialty_ids,
        }
    }

    #[test]
    fn test_create_with_unknown_specialty_persists_nothing() {
        let store = Store::open_in_memory().unwrap();
        let service = DoctorService::new(store);

        let err = service
            .create(draft(BTreeSet::from([3])))
            .expect_err("should fail");
        assert!(matches!(err, ClinicError::NotFound(EntityKind::Specialty)));
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_specialties() {
        let store = Store::open_in_memory().unwrap();
        let specialties = SpecialtyService::new(store.clone());
        let service = DoctorService::new(store);

        let neuro = specialties
            .create(NonEmptyText::new("Neurology").unwrap())
            .unwrap();
        let surgery = specialties
            .create(NonEmptyText::new("Surgery").unwrap())
            .unwrap();

        let doctor = service.create(draft(BTreeSet::from([neuro.id]))).unwrap();
        assert_eq!(doctor.specialties, vec![neuro.clone()]);

        let updated = service
            .update(doctor.id, draft(BTreeSet::from([neuro.id, surgery.id])))
            .unwrap();
        assert_eq!(updated.specialties, vec![neuro.clone(), surgery.clone()]);
        assert_eq!(service.get(doctor.id).unwrap(), updated);

        // a linked specialty cannot be removed from the catalogue
        assert!(matches!(
            specialties.delete(surgery.id),
            Err(ClinicError::HasRelations)
        ));
    }

    #[test]
    fn test_update_with_unknown_specialty_leaves_doctor_unchanged() {
        let store = Store::open_in_memory().unwrap();
        let service = DoctorService::new(store);
        let doctor = service.create(draft(BTreeSet::new())).unwrap();

        let mut changed = draft(BTreeSet::from([77]));
        changed.is_gp = true;
        assert!(matches!(
            service.update(doctor.id, changed),
            Err(ClinicError::NotFound(EntityKind::Specialty))
        ));
        assert_eq!(service.get(doctor.id).unwrap(), doctor);

        assert!(matches!(
            service.update(doctor.id + 1, draft(BTreeSet::new())),
            Err(ClinicError::NotFound(EntityKind::Doctor))
        ));
    }

    #[test]
    fn test_delete_doctor_drops_specialty_links() {
        let store = Store::open_in_memory().unwrap();
        let specialties = SpecialtyService::new(store.clone());
        let service = DoctorService::new(store);

        let neuro = specialties
            .create(NonEmptyText::new("Neurology").unwrap())
            .unwrap();
        let doctor = service.create(draft(BTreeSet::from([neuro.id]))).unwrap();

        service.delete(doctor.id).unwrap();
        specialties.delete(neuro.id).unwrap();
        assert!(matches!(
            service.delete(doctor.id),
            Err(ClinicError::NotFound(EntityKind::Doctor))
        ));
    }
}
