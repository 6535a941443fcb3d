//! Request validation.
//!
//! One function per request shape. Each checks every field, collects all violation
//! messages and returns either a draft ready for reference resolution or
//! [`ClinicError::Validation`] listing every problem found. "Today" is passed in so the
//! date rules are deterministic under test.

use crate::constants::{
    MSG_DATE_NOT_PAST, MSG_DIAGNOSES_EMPTY, MSG_DIAGNOSES_NULL, MSG_DOCTOR_MISSING,
    MSG_FEE_MISSING, MSG_FEE_NOT_POSITIVE, MSG_HAS_INSURANCE_MISSING, MSG_HEALTH_SYSTEM_MISSING,
    MSG_IS_GP_MISSING, MSG_NAME_EMPTY, MSG_PATIENT_MISSING, MSG_VISIT_DATE_FUTURE,
    MSG_VISIT_DATE_MISSING,
};
use crate::models::{DoctorDraft, PatientDraft, VisitDraft};
use crate::{ClinicError, ClinicResult, Fee, NonEmptyText};
use api_shared::{
    DiagnosisRequest, DoctorRequest, HealthSystemRequest, PatientRequest, SpecialtyRequest,
    VisitRequest,
};
use chrono::NaiveDate;

#[derive(Default)]
struct Violations(Vec<String>);

impl Violations {
    fn push(&mut self, message: &str) {
        self.0.push(message.to_string());
    }

    /// Records `message` when `value` is absent.
    fn required<T>(&mut self, value: Option<T>, message: &str) -> Option<T> {
        if value.is_none() {
            self.push(message);
        }
        value
    }

    fn name(&mut self, raw: Option<&str>) -> Option<NonEmptyText> {
        match raw.map(NonEmptyText::new) {
            Some(Ok(name)) => Some(name),
            _ => {
                self.push(MSG_NAME_EMPTY);
                None
            }
        }
    }

    fn into_result(self) -> ClinicResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ClinicError::Validation(self.0))
        }
    }
}

/// Unwraps a value the violation checks guarantee is present.
fn checked<T>(value: Option<T>) -> ClinicResult<T> {
    value.ok_or_else(|| ClinicError::InvalidInput("validated field missing".into()))
}

pub fn diagnosis_name(req: &DiagnosisRequest) -> ClinicResult<NonEmptyText> {
    let mut v = Violations::default();
    let name = v.name(req.name.as_deref());
    v.into_result()?;
    checked(name)
}

pub fn specialty_name(req: &SpecialtyRequest) -> ClinicResult<NonEmptyText> {
    let mut v = Violations::default();
    let name = v.name(req.name.as_deref());
    v.into_result()?;
    checked(name)
}

pub fn health_system_fee(req: &HealthSystemRequest) -> ClinicResult<Fee> {
    let Some(amount) = req.no_insurance_fee else {
        return Err(ClinicError::invalid(MSG_FEE_MISSING));
    };
    Fee::new(amount).map_err(|_| ClinicError::invalid(MSG_FEE_NOT_POSITIVE))
}

/// A birthdate, when given, must be strictly before `today`.
pub fn doctor_draft(req: &DoctorRequest, today: NaiveDate) -> ClinicResult<DoctorDraft> {
    let mut v = Violations::default();
    let name = v.name(req.name.as_deref());
    if req.birthdate.is_some_and(|date| date >= today) {
        v.push(MSG_DATE_NOT_PAST);
    }
    let is_gp = v.required(req.is_gp, MSG_IS_GP_MISSING);
    v.into_result()?;

    Ok(DoctorDraft {
        name: checked(name)?,
        birthdate: req.birthdate,
        is_gp: checked(is_gp)?,
        specialty_ids: req.specialties_ids.clone().unwrap_or_default(),
    })
}

pub fn patient_draft(req: &PatientRequest) -> ClinicResult<PatientDraft> {
    let mut v = Violations::default();
    let name = v.name(req.name.as_deref());
    let has_insurance = v.required(req.has_insurance, MSG_HAS_INSURANCE_MISSING);
    v.into_result()?;

    Ok(PatientDraft {
        name: checked(name)?,
        has_insurance: checked(has_insurance)?,
        gp_id: req.gp_id,
    })
}

/// A visit date may be today but not later.
pub fn visit_draft(req: &VisitRequest, today: NaiveDate) -> ClinicResult<VisitDraft> {
    let mut v = Violations::default();
    let patient_id = v.required(req.patient_id, MSG_PATIENT_MISSING);
    let doctor_id = v.required(req.doctor_id, MSG_DOCTOR_MISSING);
    let health_system_id = v.required(req.health_system_id, MSG_HEALTH_SYSTEM_MISSING);
    match &req.diagnoses_ids {
        None => v.push(MSG_DIAGNOSES_NULL),
        Some(ids) if ids.is_empty() => v.push(MSG_DIAGNOSES_EMPTY),
        Some(_) => {}
    }
    let visit_date = v.required(req.visit_date, MSG_VISIT_DATE_MISSING);
    if visit_date.is_some_and(|date| date > today) {
        v.push(MSG_VISIT_DATE_FUTURE);
    }
    v.into_result()?;

    VisitDraft::new(
        checked(patient_id)?,
        checked(doctor_id)?,
        checked(health_system_id)?,
        checked(req.diagnoses_ids.clone())?,
        checked(visit_date)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn messages(err: ClinicError) -> Vec<String> {
        match err {
            ClinicError::Validation(messages) => messages,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_name_is_trimmed_and_required() {
        let name = diagnosis_name(&DiagnosisRequest {
            name: Some("  Asthma ".into()),
        })
        .unwrap();
        assert_eq!(name.as_str(), "Asthma");

        for raw in [None, Some("".to_string()), Some("   ".to_string())] {
            let err = specialty_name(&SpecialtyRequest { name: raw }).expect_err("should fail");
            assert_eq!(messages(err), vec![MSG_NAME_EMPTY]);
        }
    }

    #[test]
    fn test_fee_must_be_present_and_positive() {
        let missing = health_system_fee(&HealthSystemRequest::default()).expect_err("missing");
        assert_eq!(messages(missing), vec![MSG_FEE_MISSING]);

        let zero = health_system_fee(&HealthSystemRequest {
            no_insurance_fee: Some(dec!(0)),
        })
        .expect_err("zero");
        assert_eq!(messages(zero), vec![MSG_FEE_NOT_POSITIVE]);

        let fee = health_system_fee(&HealthSystemRequest {
            no_insurance_fee: Some(dec!(12.5)),
        })
        .unwrap();
        assert_eq!(fee.amount(), dec!(12.5));
    }

    #[test]
    fn test_doctor_draft_collects_every_violation() {
        let err = doctor_draft(
            &DoctorRequest {
                name: None,
                birthdate: Some(today()),
                is_gp: None,
                specialties_ids: None,
            },
            today(),
        )
        .expect_err("should fail");
        assert_eq!(
            messages(err),
            vec![MSG_NAME_EMPTY, MSG_DATE_NOT_PAST, MSG_IS_GP_MISSING]
        );
    }

    #[test]
    fn test_doctor_draft_defaults_to_no_specialties() {
        let draft = doctor_draft(
            &DoctorRequest {
                name: Some("Dr. Who".into()),
                birthdate: today().pred_opt(),
                is_gp: Some(true),
                specialties_ids: None,
            },
            today(),
        )
        .unwrap();
        assert!(draft.specialty_ids.is_empty());
        assert!(draft.is_gp);
    }

    #[test]
    fn test_patient_draft_keeps_optional_gp() {
        let draft = patient_draft(&PatientRequest {
            name: Some("Ann".into()),
            has_insurance: Some(false),
            gp_id: None,
        })
        .unwrap();
        assert_eq!(draft.gp_id, None);

        let err = patient_draft(&PatientRequest::default()).expect_err("should fail");
        assert_eq!(messages(err), vec![MSG_NAME_EMPTY, MSG_HAS_INSURANCE_MISSING]);
    }

    #[test]
    fn test_visit_draft_reports_missing_fields() {
        let err = visit_draft(&VisitRequest::default(), today()).expect_err("should fail");
        assert_eq!(
            messages(err),
            vec![
                MSG_PATIENT_MISSING,
                MSG_DOCTOR_MISSING,
                MSG_HEALTH_SYSTEM_MISSING,
                MSG_DIAGNOSES_NULL,
                MSG_VISIT_DATE_MISSING,
            ]
        );
    }

    #[test]
    fn test_visit_date_may_be_today_but_not_tomorrow() {
        let mut req = VisitRequest {
            patient_id: Some(1),
            doctor_id: Some(2),
            health_system_id: Some(3),
            diagnoses_ids: Some(BTreeSet::from([4])),
            visit_date: Some(today()),
        };
        assert!(visit_draft(&req, today()).is_ok());

        req.visit_date = today().succ_opt();
        let err = visit_draft(&req, today()).expect_err("should fail");
        assert_eq!(messages(err), vec![MSG_VISIT_DATE_FUTURE]);

        req.visit_date = Some(today());
        req.diagnoses_ids = Some(BTreeSet::new());
        let err = visit_draft(&req, today()).expect_err("should fail");
        assert_eq!(messages(err), vec![MSG_DIAGNOSES_EMPTY]);
    }
}
