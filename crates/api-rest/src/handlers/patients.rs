use crate::error::ApiError;
use crate::AppState;
use api_shared::{ErrorsBody, MessageBody, PatientRequest, PatientResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_core::validation;
use rust_decimal::Decimal;

#[utoipa::path(
    post,
    path = "/patients",
    request_body = PatientRequest,
    responses(
        (status = 201, description = "Patient created", body = PatientResponse),
        (status = 400, description = "Invalid patient", body = ErrorsBody),
        (status = 404, description = "GP doctor not found", body = MessageBody),
        (status = 406, description = "Named GP is not a general practitioner", body = MessageBody)
    )
)]
/// Register a patient, optionally naming a general practitioner.
///
/// # Errors
/// Returns `406 Not Acceptable` if the named doctor exists but is not a GP.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<PatientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PatientResponse>), ApiError> {
    let Json(req) = payload?;
    let draft = validation::patient_draft(&req)?;
    let patient = state.services.patients.create(draft)?;
    Ok((StatusCode::CREATED, Json(patient.into())))
}

#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "All patients", body = [PatientResponse])
    )
)]
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<PatientResponse>>, ApiError> {
    let patients = state.services.patients.list()?;
    Ok(Json(patients.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = i64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient", body = PatientResponse),
        (status = 404, description = "Patient not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PatientResponse>, ApiError> {
    Ok(Json(state.services.patients.get(id)?.into()))
}

#[utoipa::path(
    put,
    path = "/patients/{id}",
    params(("id" = i64, Path, description = "Patient id")),
    request_body = PatientRequest,
    responses(
        (status = 200, description = "Patient updated", body = PatientResponse),
        (status = 400, description = "Invalid patient", body = ErrorsBody),
        (status = 404, description = "Patient or GP doctor not found", body = MessageBody),
        (status = 406, description = "Named GP is not a general practitioner", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<PatientRequest>, JsonRejection>,
) -> Result<Json<PatientResponse>, ApiError> {
    let Json(req) = payload?;
    let draft = validation::patient_draft(&req)?;
    Ok(Json(state.services.patients.update(id, draft)?.into()))
}

#[utoipa::path(
    delete,
    path = "/patients/{id}",
    params(("id" = i64, Path, description = "Patient id")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 404, description = "Patient not found", body = MessageBody),
        (status = 405, description = "Patient has visits", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.services.patients.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/patients/has-insurance",
    responses(
        (status = 200, description = "Patients with health insurance", body = [PatientResponse])
    )
)]
#[axum::debug_handler]
pub async fn insured_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<PatientResponse>>, ApiError> {
    let patients = state.services.patients.list_insured()?;
    Ok(Json(patients.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/patients/percent-without-insurance",
    responses(
        (status = 200, description = "Percentage of patients without insurance, two decimal places", body = String),
        (status = 404, description = "There are no patients", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn percent_without_insurance(
    State(state): State<AppState>,
) -> Result<Json<Decimal>, ApiError> {
    Ok(Json(state.services.patients.uninsured_percentage()?))
}
