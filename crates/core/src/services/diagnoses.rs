//! Diagnosis catalogue.

use crate::db::Store;
use crate::lookup::require_diagnosis;
use crate::models::Diagnosis;
use crate::repositories::diagnoses;
use crate::{ClinicError, ClinicResult, EntityKind, NonEmptyText};

#[derive(Clone, Debug)]
pub struct DiagnosisService {
    store: Store,
}

impl DiagnosisService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn create(&self, name: NonEmptyText) -> ClinicResult<Diagnosis> {
        let diagnosis = self
            .store
            .with_conn(|conn| diagnoses::insert_diagnosis(conn, &name))?;
        tracing::info!(id = diagnosis.id, "created diagnosis");
        Ok(diagnosis)
    }

    pub fn get(&self, id: i64) -> ClinicResult<Diagnosis> {
        self.store.with_conn(|conn| require_diagnosis(conn, id))
    }

    pub fn list(&self) -> ClinicResult<Vec<Diagnosis>> {
        self.store.with_conn(diagnoses::list_diagnoses)
    }

    pub fn update(&self, id: i64, name: NonEmptyText) -> ClinicResult<Diagnosis> {
        let diagnosis = self.store.with_conn(|conn| {
            diagnoses::update_diagnosis(conn, id, &name)?
                .ok_or(ClinicError::NotFound(EntityKind::Diagnosis))
        })?;
        tracing::info!(id, "updated diagnosis");
        Ok(diagnosis)
    }

    /// Fails with [`ClinicError::HasRelations`] while any visit cites the diagnosis.
    pub fn delete(&self, id: i64) -> ClinicResult<()> {
        self.store.with_conn(|conn| {
            if diagnoses::delete_diagnosis(conn, id)? {
                Ok(())
            } else {
                Err(ClinicError::NotFound(EntityKind::Diagnosis))
            }
        })?;
        tracing::info!(id, "deleted diagnosis");
        Ok(())
    }
}
