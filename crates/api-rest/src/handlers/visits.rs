//! Visit records and the income reports computed from them.

use super::today;
use crate::error::ApiError;
use crate::AppState;
use api_shared::{ErrorsBody, MessageBody, VisitRequest, VisitResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_core::validation;
use rust_decimal::Decimal;
use std::str::FromStr;

#[utoipa::path(
    post,
    path = "/visits",
    request_body = VisitRequest,
    responses(
        (status = 201, description = "Visit recorded", body = VisitResponse),
        (status = 400, description = "Invalid visit", body = ErrorsBody),
        (status = 404, description = "A referenced record does not exist", body = MessageBody)
    )
)]
/// Record a visit.
///
/// References are resolved in the order diagnoses, patient, doctor, health system; the
/// first missing one is reported and nothing is stored.
#[axum::debug_handler]
pub async fn create_visit(
    State(state): State<AppState>,
    payload: Result<Json<VisitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VisitResponse>), ApiError> {
    let Json(req) = payload?;
    let draft = validation::visit_draft(&req, today())?;
    let visit = state.services.visits.create(draft)?;
    Ok((StatusCode::CREATED, Json(visit.into())))
}

#[utoipa::path(
    get,
    path = "/visits",
    responses(
        (status = 200, description = "All visits", body = [VisitResponse])
    )
)]
#[axum::debug_handler]
pub async fn list_visits(
    State(state): State<AppState>,
) -> Result<Json<Vec<VisitResponse>>, ApiError> {
    let visits = state.services.visits.list()?;
    Ok(Json(visits.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/visits/{id}",
    params(("id" = i64, Path, description = "Visit id")),
    responses(
        (status = 200, description = "The visit", body = VisitResponse),
        (status = 404, description = "Visit not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn get_visit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VisitResponse>, ApiError> {
    Ok(Json(state.services.visits.get(id)?.into()))
}

#[utoipa::path(
    put,
    path = "/visits/{id}",
    params(("id" = i64, Path, description = "Visit id")),
    request_body = VisitRequest,
    responses(
        (status = 200, description = "Visit updated", body = VisitResponse),
        (status = 400, description = "Invalid visit", body = ErrorsBody),
        (status = 404, description = "Visit or a referenced record not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn update_visit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<VisitRequest>, JsonRejection>,
) -> Result<Json<VisitResponse>, ApiError> {
    let Json(req) = payload?;
    let draft = validation::visit_draft(&req, today())?;
    Ok(Json(state.services.visits.update(id, draft)?.into()))
}

#[utoipa::path(
    delete,
    path = "/visits/{id}",
    params(("id" = i64, Path, description = "Visit id")),
    responses(
        (status = 204, description = "Visit deleted"),
        (status = 404, description = "Visit not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn delete_visit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.services.visits.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// REPORTS
// ============================================================================

#[utoipa::path(
    get,
    path = "/visits/total-income",
    responses(
        (status = 200, description = "Income over all visits", body = String)
    )
)]
#[axum::debug_handler]
pub async fn total_income(State(state): State<AppState>) -> Result<Json<Decimal>, ApiError> {
    Ok(Json(state.services.visits.total_income()?))
}

#[utoipa::path(
    get,
    path = "/visits/total-income-by-doctor/{doctor_id}",
    params(("doctor_id" = i64, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Income over the doctor's visits", body = String),
        (status = 404, description = "Doctor not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn total_income_by_doctor(
    State(state): State<AppState>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Decimal>, ApiError> {
    Ok(Json(state.services.visits.total_income_by_doctor(doctor_id)?))
}

#[utoipa::path(
    get,
    path = "/visits/count-visits-by-patient/{patient_id}",
    params(("patient_id" = i64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Number of the patient's visits", body = u64),
        (status = 404, description = "Patient not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn count_visits_by_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<i64>,
) -> Result<Json<u64>, ApiError> {
    Ok(Json(state.services.visits.count_visits_by_patient(patient_id)?))
}

#[utoipa::path(
    get,
    path = "/visits/count-visits-by-diagnosis/{diagnosis_id}",
    params(("diagnosis_id" = i64, Path, description = "Diagnosis id")),
    responses(
        (status = 200, description = "Number of visits citing the diagnosis", body = u64),
        (status = 404, description = "Diagnosis not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn count_visits_by_diagnosis(
    State(state): State<AppState>,
    Path(diagnosis_id): Path<i64>,
) -> Result<Json<u64>, ApiError> {
    Ok(Json(
        state.services.visits.count_visits_by_diagnosis(diagnosis_id)?,
    ))
}

#[utoipa::path(
    get,
    path = "/visits/count-doctors-by-income/{min_income}",
    params(("min_income" = String, Path, description = "Income a doctor must exceed")),
    responses(
        (status = 200, description = "Number of doctors earning strictly more", body = u64),
        (status = 400, description = "Not a decimal number", body = ErrorsBody),
        (status = 406, description = "Negative threshold", body = MessageBody)
    )
)]
/// Count doctors whose income is strictly greater than `min_income`.
///
/// # Errors
/// Returns `406 Not Acceptable` if `min_income` is negative.
#[axum::debug_handler]
pub async fn count_doctors_by_income(
    State(state): State<AppState>,
    Path(min_income): Path<String>,
) -> Result<Json<u64>, ApiError> {
    let threshold = Decimal::from_str(min_income.trim())
        .map_err(|_| ApiError::BadRequest(format!("Invalid income value: {min_income}")))?;
    Ok(Json(
        state.services.visits.count_doctors_above_income(threshold)?,
    ))
}

#[utoipa::path(
    get,
    path = "/visits/total-income-by-diagnosis/{diagnosis_id}",
    params(("diagnosis_id" = i64, Path, description = "Diagnosis id")),
    responses(
        (status = 200, description = "Income over visits citing the diagnosis", body = String),
        (status = 404, description = "Diagnosis not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn total_income_by_diagnosis(
    State(state): State<AppState>,
    Path(diagnosis_id): Path<i64>,
) -> Result<Json<Decimal>, ApiError> {
    Ok(Json(
        state.services.visits.total_income_by_diagnosis(diagnosis_id)?,
    ))
}

#[utoipa::path(
    get,
    path = "/visits/total-income-by-patients-no-insurance",
    responses(
        (status = 200, description = "Income over visits of uninsured patients", body = String)
    )
)]
#[axum::debug_handler]
pub async fn total_income_from_uninsured_patients(
    State(state): State<AppState>,
) -> Result<Json<Decimal>, ApiError> {
    Ok(Json(
        state.services.visits.total_income_from_uninsured_patients()?,
    ))
}

#[utoipa::path(
    get,
    path = "/visits/total-income-by-doctor-insured-patients/{doctor_id}",
    params(("doctor_id" = i64, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Doctor's income over visits of insured patients", body = String),
        (status = 404, description = "Doctor not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn doctor_income_from_insured_patients(
    State(state): State<AppState>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Decimal>, ApiError> {
    Ok(Json(
        state
            .services
            .visits
            .doctor_income_from_insured_patients(doctor_id)?,
    ))
}
