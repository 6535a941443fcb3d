use super::today;
use crate::error::ApiError;
use crate::AppState;
use api_shared::{DoctorRequest, DoctorResponse, ErrorsBody, MessageBody};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_core::validation;

#[utoipa::path(
    post,
    path = "/doctors",
    request_body = DoctorRequest,
    responses(
        (status = 201, description = "Doctor created", body = DoctorResponse),
        (status = 400, description = "Invalid doctor", body = ErrorsBody),
        (status = 404, description = "A specialty does not exist", body = MessageBody)
    )
)]
/// Register a doctor with zero or more specialties.
#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<AppState>,
    payload: Result<Json<DoctorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DoctorResponse>), ApiError> {
    let Json(req) = payload?;
    let draft = validation::doctor_draft(&req, today())?;
    let doctor = state.services.doctors.create(draft)?;
    Ok((StatusCode::CREATED, Json(doctor.into())))
}

#[utoipa::path(
    get,
    path = "/doctors",
    responses(
        (status = 200, description = "All doctors", body = [DoctorResponse])
    )
)]
#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<AppState>,
) -> Result<Json<Vec<DoctorResponse>>, ApiError> {
    let doctors = state.services.doctors.list()?;
    Ok(Json(doctors.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/doctors/{id}",
    params(("id" = i64, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "The doctor", body = DoctorResponse),
        (status = 404, description = "Doctor not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DoctorResponse>, ApiError> {
    Ok(Json(state.services.doctors.get(id)?.into()))
}

#[utoipa::path(
    put,
    path = "/doctors/{id}",
    params(("id" = i64, Path, description = "Doctor id")),
    request_body = DoctorRequest,
    responses(
        (status = 200, description = "Doctor updated", body = DoctorResponse),
        (status = 400, description = "Invalid doctor", body = ErrorsBody),
        (status = 404, description = "Doctor or specialty not found", body = MessageBody)
    )
)]
/// Replace a doctor's attributes and specialty set.
#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<DoctorRequest>, JsonRejection>,
) -> Result<Json<DoctorResponse>, ApiError> {
    let Json(req) = payload?;
    let draft = validation::doctor_draft(&req, today())?;
    Ok(Json(state.services.doctors.update(id, draft)?.into()))
}

#[utoipa::path(
    delete,
    path = "/doctors/{id}",
    params(("id" = i64, Path, description = "Doctor id")),
    responses(
        (status = 204, description = "Doctor deleted"),
        (status = 404, description = "Doctor not found", body = MessageBody),
        (status = 405, description = "Doctor is a GP of a patient or has visits", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.services.doctors.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
