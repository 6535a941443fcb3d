//! Health systems and their no-insurance fees.

use crate::db::Store;
use crate::lookup::require_health_system;
use crate::models::HealthSystem;
use crate::repositories::health_systems;
use crate::{ClinicError, ClinicResult, EntityKind, Fee};

#[derive(Clone, Debug)]
pub struct HealthSystemService {
    store: Store,
}

impl HealthSystemService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn create(&self, fee: Fee) -> ClinicResult<HealthSystem> {
        let system = self
            .store
            .with_conn(|conn| health_systems::insert_health_system(conn, fee))?;
        tracing::info!(id = system.id, fee = %fee, "created health system");
        Ok(system)
    }

    pub fn get(&self, id: i64) -> ClinicResult<HealthSystem> {
        self.store.with_conn(|conn| require_health_system(conn, id))
    }

    pub fn list(&self) -> ClinicResult<Vec<HealthSystem>> {
        self.store.with_conn(health_systems::list_health_systems)
    }

    /// Changing a fee changes every income figure derived from visits under this system.
    pub fn update(&self, id: i64, fee: Fee) -> ClinicResult<HealthSystem> {
        let system = self.store.with_conn(|conn| {
            health_systems::update_health_system(conn, id, fee)?
                .ok_or(ClinicError::NotFound(EntityKind::HealthSystem))
        })?;
        tracing::info!(id, fee = %fee, "updated health system");
        Ok(system)
    }

    pub fn delete(&self, id: i64) -> ClinicResult<()> {
        self.store.with_conn(|conn| {
            if health_systems::delete_health_system(conn, id)? {
                Ok(())
            } else {
                Err(ClinicError::NotFound(EntityKind::HealthSystem))
            }
        })?;
        tracing::info!(id, "deleted health system");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_health_system_fee_round_trips_exactly() {
        let service = HealthSystemService::new(Store::open_in_memory().unwrap());
        let created = service.create(Fee::new(dec!(19.99)).unwrap()).unwrap();
        assert_eq!(service.get(created.id).unwrap().no_insurance_fee.amount(), dec!(19.99));

        let updated = service
            .update(created.id, Fee::new(dec!(0.01)).unwrap())
            .unwrap();
        assert_eq!(service.list().unwrap(), vec![updated]);
    }

    #[test]
    fn test_missing_health_system_is_not_found() {
        let service = HealthSystemService::new(Store::open_in_memory().unwrap());
        assert!(matches!(
            service.get(1),
            Err(ClinicError::NotFound(EntityKind::HealthSystem))
        ));
        assert!(matches!(
            service.update(1, Fee::new(dec!(5)).unwrap()),
            Err(ClinicError::NotFound(EntityKind::HealthSystem))
        ));
    }
}
