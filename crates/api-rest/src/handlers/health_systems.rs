use crate::error::ApiError;
use crate::AppState;
use api_shared::{HealthSystemRequest, HealthSystemResponse, ErrorsBody, MessageBody};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clinic_core::validation;

#[utoipa::path(
    post,
    path = "/health-systems",
    request_body = HealthSystemRequest,
    responses(
        (status = 201, description = "Health system created", body = HealthSystemResponse),
        (status = 400, description = "Invalid health system", body = ErrorsBody)
    )
)]
#[axum::debug_handler]
pub async fn create_health_system(
    State(state): State<AppState>,
    payload: Result<Json<HealthSystemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<HealthSystemResponse>), ApiError> {
    let Json(req) = payload?;
    let fee = validation::health_system_fee(&req)?;
    let system = state.services.health_systems.create(fee)?;
    Ok((StatusCode::CREATED, Json(system.into())))
}

#[utoipa::path(
    get,
    path = "/health-systems",
    responses(
        (status = 200, description = "All health systems", body = [HealthSystemResponse])
    )
)]
#[axum::debug_handler]
pub async fn list_health_systems(
    State(state): State<AppState>,
) -> Result<Json<Vec<HealthSystemResponse>>, ApiError> {
    let systems = state.services.health_systems.list()?;
    Ok(Json(systems.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/health-systems/{id}",
    params(("id" = i64, Path, description = "Health system id")),
    responses(
        (status = 200, description = "The health system", body = HealthSystemResponse),
        (status = 404, description = "Health system not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn get_health_system(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<HealthSystemResponse>, ApiError> {
    Ok(Json(state.services.health_systems.get(id)?.into()))
}

#[utoipa::path(
    put,
    path = "/health-systems/{id}",
    params(("id" = i64, Path, description = "Health system id")),
    request_body = HealthSystemRequest,
    responses(
        (status = 200, description = "Health system updated", body = HealthSystemResponse),
        (status = 400, description = "Invalid health system", body = ErrorsBody),
        (status = 404, description = "Health system not found", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn update_health_system(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<HealthSystemRequest>, JsonRejection>,
) -> Result<Json<HealthSystemResponse>, ApiError> {
    let Json(req) = payload?;
    let fee = validation::health_system_fee(&req)?;
    Ok(Json(state.services.health_systems.update(id, fee)?.into()))
}

#[utoipa::path(
    delete,
    path = "/health-systems/{id}",
    params(("id" = i64, Path, description = "Health system id")),
    responses(
        (status = 204, description = "Health system deleted"),
        (status = 404, description = "Health system not found", body = MessageBody),
        (status = 405, description = "Health system is used by a visit", body = MessageBody)
    )
)]
#[axum::debug_handler]
pub async fn delete_health_system(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.services.health_systems.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
