use crate::error::ApiError;
use crate::AppState;
use api_shared::{DiagnosisRequest, DiagnosisResponse, ErrorsBody, MessageBody};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_core::validation;

#[utoipa::path(
    post,
    path = "/diagnoses",
    request_body = DiagnosisRequest,
    responses(
        (status = 201, description = "Diagnosis created", body = DiagnosisResponse),
        (status = 400, description = "Invalid diagnosis", body = ErrorsBody)
    )
)]
#[axum::debug_handler]
pub async fn create_diagnosis(
    State(state): State<AppState>,
    payload: Result<Json<DiagnosisRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DiagnosisResponse>), ApiError> {
    let Json(req) = payload?;
    let name = validation::diagnosis_name(&req)?;
    let diagnosis = state.services.diagnoses.create(name)?;
    Ok((StatusCode::CREATED, Json(diagnosis.into())))
}

#[utoipa::path(
    get,
    path = "/diagnoses",
    responses(
        (status = 200, description = "All diagnoses", body = [DiagnosisResponse])
    )
)]
#[axum::debug_handler]
pub async fn list_diagnoses(
    State(state): State<AppState>,
) -> Result<Json<Vec<DiagnosisResponse>>, ApiError> {
    let diagnoses = state.services.diagnoses.list()?;
    Ok(Json(diagnoses.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/diagnoses/{id}",
    params(("id" = i64, Path, description = "Diagnosis id")),
    responses(
        (status = 200, description = "The diagnosis", body = DiagnosisResponse),
        (status = 404, description = "Diagnosis not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn get_diagnosis(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DiagnosisResponse>, ApiError> {
    Ok(Json(state.services.diagnoses.get(id)?.into()))
}

#[utoipa::path(
    put,
    path = "/diagnoses/{id}",
    params(("id" = i64, Path, description = "Diagnosis id")),
    request_body = DiagnosisRequest,
    responses(
        (status = 200, description = "Diagnosis updated", body = DiagnosisResponse),
        (status = 400, description = "Invalid diagnosis", body = ErrorsBody),
        (status = 404, description = "Diagnosis not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn update_diagnosis(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<DiagnosisRequest>, JsonRejection>,
) -> Result<Json<DiagnosisResponse>, ApiError> {
    let Json(req) = payload?;
    let name = validation::diagnosis_name(&req)?;
    Ok(Json(state.services.diagnoses.update(id, name)?.into()))
}

#[utoipa::path(
    delete,
    path = "/diagnoses/{id}",
    params(("id" = i64, Path, description = "Diagnosis id")),
    responses(
        (status = 204, description = "Diagnosis deleted"),
        (status = 404, description = "Diagnosis not found", body = MessageBody),
        (status = 405, description = "Diagnosis is cited by a visit", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn delete_diagnosis(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.services.diagnoses.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
