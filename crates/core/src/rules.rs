//! Business rules checked by the services before they persist or report.

use crate::models::Doctor;
use crate::{ClinicError, ClinicResult};
use rust_decimal::Decimal;

/// A patient's GP must be a general practitioner at the time of assignment.
pub fn ensure_gp(doctor: &Doctor) -> ClinicResult<()> {
    if doctor.is_gp {
        Ok(())
    } else {
        tracing::warn!(doctor_id = doctor.id, "rejected non-GP doctor as patient GP");
        Err(ClinicError::DoctorNotGp {
            doctor_id: doctor.id,
        })
    }
}

pub fn ensure_non_negative_threshold(threshold: Decimal) -> ClinicResult<()> {
    if threshold < Decimal::ZERO {
        tracing::warn!(%threshold, "rejected negative income threshold");
        return Err(ClinicError::NegativeIncome);
    }
    Ok(())
}

/// The uninsured percentage is undefined over an empty population.
pub fn ensure_patients_exist(patient_count: u64) -> ClinicResult<()> {
    if patient_count == 0 {
        return Err(ClinicError::NoPatients);
    }
    Ok(())
}
