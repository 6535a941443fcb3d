//! Specialty catalogue.

use crate::db::Store;
use crate::lookup::require_specialty;
use crate::models::Specialty;
use crate::repositories::specialties;
use crate::{ClinicError, ClinicResult, EntityKind, NonEmptyText};

#[derive(Clone, Debug)]
pub struct SpecialtyService {
    store: Store,
}

impl SpecialtyService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn create(&self, name: NonEmptyText) -> ClinicResult<Specialty> {
        let specialty = self
            .store
            .with_conn(|conn| specialties::insert_specialty(conn, &name))?;
        tracing::info!(id = specialty.id, "created specialty");
        Ok(specialty)
    }

    pub fn get(&self, id: i64) -> ClinicResult<Specialty> {
        self.store.with_conn(|conn| require_specialty(conn, id))
    }

    pub fn list(&self) -> ClinicResult<Vec<Specialty>> {
        self.store.with_conn(specialties::list_specialties)
    }

    pub fn update(&self, id: i64, name: NonEmptyText) -> ClinicResult<Specialty> {
        let specialty = self.store.with_conn(|conn| {
            specialties::update_specialty(conn, id, &name)?
                .ok_or(ClinicError::NotFound(EntityKind::Specialty))
        })?;
        tracing::info!(id, "updated specialty");
        Ok(specialty)
    }

    /// Fails with [`ClinicError::HasRelations`] while the specialty is linked to a doctor.
    pub fn delete(&self, id: i64) -> ClinicResult<()> {
        self.store.with_conn(|conn| {
            if specialties::delete_specialty(conn, id)? {
                Ok(())
            } else {
                Err(ClinicError::NotFound(EntityKind::Specialty))
            }
        })?;
        tracing::info!(id, "deleted specialty");
        Ok(())
    }
}
