use crate::error::ApiError;
use crate::AppState;
use api_shared::{SpecialtyRequest, SpecialtyResponse, ErrorsBody, MessageBody};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_core::validation;

#[utoipa::path(
    post,
    path = "/specialties",
    request_body = SpecialtyRequest,
    responses(
        (status = 201, description = "Specialty created", body = SpecialtyResponse),
        (status = 400, description = "Invalid specialty", body = ErrorsBody)
    )
)]
#[axum::debug_handler]
pub async fn create_specialty(
    State(state): State<AppState>,
    payload: Result<Json<SpecialtyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SpecialtyResponse>), ApiError> {
    let Json(req) = payload?;
    let name = validation::specialty_name(&req)?;
    let specialty = state.services.specialties.create(name)?;
    Ok((StatusCode::CREATED, Json(specialty.into())))
}

#[utoipa::path(
    get,
    path = "/specialties",
    responses(
        (status = 200, description = "All specialties", body = [SpecialtyResponse])
    )
)]
#[axum::debug_handler]
pub async fn list_specialties(
    State(state): State<AppState>,
) -> Result<Json<Vec<SpecialtyResponse>>, ApiError> {
    let specialties = state.services.specialties.list()?;
    Ok(Json(specialties.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/specialties/{id}",
    params(("id" = i64, Path, description = "Specialty id")),
    responses(
        (status = 200, description = "The specialty", body = SpecialtyResponse),
        (status = 404, description = "Specialty not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn get_specialty(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SpecialtyResponse>, ApiError> {
    Ok(Json(state.services.specialties.get(id)?.into()))
}

#[utoipa::path(
    put,
    path = "/specialties/{id}",
    params(("id" = i64, Path, description = "Specialty id")),
    request_body = SpecialtyRequest,
    responses(
        (status = 200, description = "Specialty updated", body = SpecialtyResponse),
        (status = 400, description = "Invalid specialty", body = ErrorsBody),
        (status = 404, description = "Specialty not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn update_specialty(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<SpecialtyRequest>, JsonRejection>,
) -> Result<Json<SpecialtyResponse>, ApiError> {
    let Json(req) = payload?;
    let name = validation::specialty_name(&req)?;
    Ok(Json(state.services.specialties.update(id, name)?.into()))
}

#[utoipa::path(
    delete,
    path = "/specialties/{id}",
    params(("id" = i64, Path, description = "Specialty id")),
    responses(
        (status = 204, description = "Specialty deleted"),
        (status = 404, description = "Specialty not found", body = MessageBody),
        (status = 405, description = "Specialty is linked to a doctor", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn delete_specialty(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.services.specialties.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
