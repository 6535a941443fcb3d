//! Entity → wire response conversions.

use crate::models::{Diagnosis, Doctor, HealthSystem, Patient, Specialty, Visit};
use api_shared::{
    DiagnosisResponse, DoctorResponse, HealthSystemResponse, PatientResponse, SpecialtyResponse,
    VisitResponse,
};

impl From<Diagnosis> for DiagnosisResponse {
    fn from(d: Diagnosis) -> Self {
        Self {
            id: d.id,
            name: d.name.into_inner(),
        }
    }
}

impl From<Specialty> for SpecialtyResponse {
    fn from(s: Specialty) -> Self {
        Self {
            id: s.id,
            name: s.name.into_inner(),
        }
    }
}

impl From<HealthSystem> for HealthSystemResponse {
    fn from(hs: HealthSystem) -> Self {
        Self {
            id: hs.id,
            no_insurance_fee: hs.no_insurance_fee.amount(),
        }
    }
}

impl From<Doctor> for DoctorResponse {
    fn from(d: Doctor) -> Self {
        Self {
            id: d.id,
            name: d.name.into_inner(),
            birthdate: d.birthdate,
            is_gp: d.is_gp,
            specialties: d.specialties.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Patient> for PatientResponse {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            name: p.name.into_inner(),
            has_insurance: p.has_insurance,
            gp_id: p.gp_id,
        }
    }
}

impl From<Visit> for VisitResponse {
    fn from(v: Visit) -> Self {
        Self {
            id: v.id,
            patient_id: v.patient_id,
            doctor_id: v.doctor_id,
            health_system_id: v.health_system.id,
            diagnoses: v.diagnoses.into_iter().map(Into::into).collect(),
            visit_date: v.visit_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Fee, NonEmptyText};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_visit_response_flattens_references() {
        let visit = Visit {
            id: 3,
            patient_id: 11,
            patient_has_insurance: false,
            doctor_id: 12,
            health_system: HealthSystem {
                id: 13,
                no_insurance_fee: Fee::new(dec!(40)).unwrap(),
            },
            diagnoses: vec![Diagnosis {
                id: 14,
                name: NonEmptyText::new("Migraine").unwrap(),
            }],
            visit_date: NaiveDate::from_ymd_opt(2021, 12, 24).unwrap(),
        };

        let res = VisitResponse::from(visit);
        assert_eq!(res.health_system_id, 13);
        assert_eq!(
            res.diagnoses,
            vec![DiagnosisResponse {
                id: 14,
                name: "Migraine".into()
            }]
        );
    }

    #[test]
    fn test_doctor_response_keeps_specialty_order() {
        let doctor = Doctor {
            id: 1,
            name: NonEmptyText::new("Dr. Grey").unwrap(),
            birthdate: NaiveDate::from_ymd_opt(1980, 5, 2),
            is_gp: false,
            specialties: vec![
                Specialty {
                    id: 2,
                    name: NonEmptyText::new("Surgery").unwrap(),
                },
                Specialty {
                    id: 5,
                    name: NonEmptyText::new("Trauma").unwrap(),
                },
            ],
        };

        let res = DoctorResponse::from(doctor);
        let ids: Vec<i64> = res.specialties.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 5]);
        assert_eq!(res.name, "Dr. Grey");
    }
}
