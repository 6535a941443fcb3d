//! Clinic services.
//!
//! Each service owns a clone of the shared [`Store`] and exposes the operations of one
//! entity kind. A call locks the connection for its whole duration, so every lookup, rule
//! check and write it performs sees one consistent database state.

mod diagnoses;
mod doctors;
mod health_systems;
mod patients;
mod specialties;
mod visits;

pub use diagnoses::DiagnosisService;
pub use doctors::DoctorService;
pub use health_systems::HealthSystemService;
pub use patients::PatientService;
pub use specialties::SpecialtyService;
pub use visits::VisitService;

use crate::db::Store;

/// Every service, built over one store.
#[derive(Clone, Debug)]
pub struct ClinicServices {
    pub diagnoses: DiagnosisService,
    pub specialties: SpecialtyService,
    pub health_systems: HealthSystemService,
    pub doctors: DoctorService,
    pub patients: PatientService,
    pub visits: VisitService,
}

impl ClinicServices {
    pub fn new(store: Store) -> Self {
        Self {
            diagnoses: DiagnosisService::new(store.clone()),
            specialties: SpecialtyService::new(store.clone()),
            health_systems: HealthSystemService::new(store.clone()),
            doctors: DoctorService::new(store.clone()),
            patients: PatientService::new(store.clone()),
            visits: VisitService::new(store),
        }
    }
}
