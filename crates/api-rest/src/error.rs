//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ApiError>`. Domain failures keep the exact message the
//! core produces; anything unexpected is logged and reported as a bare internal error.

use api_shared::{ErrorsBody, MessageBody};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use clinic_core::ClinicError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Clinic(#[from] ClinicError),
    #[error("malformed request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

fn message(status: StatusCode, text: String) -> Response {
    (status, Json(MessageBody { message: text })).into_response()
}

fn errors(errors: Vec<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorsBody { errors })).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::BadRequest(detail) => return errors(vec![detail]),
            ApiError::Clinic(err) => err,
        };

        match err {
            ClinicError::NotFound(_) | ClinicError::NoPatients => {
                message(StatusCode::NOT_FOUND, err.to_string())
            }
            ClinicError::Validation(messages) => errors(messages),
            ClinicError::DoctorNotGp { .. } | ClinicError::NegativeIncome => {
                message(StatusCode::NOT_ACCEPTABLE, err.to_string())
            }
            ClinicError::HasRelations => message(StatusCode::METHOD_NOT_ALLOWED, err.to_string()),
            other => {
                tracing::error!(error = %other, "request failed");
                message(StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::EntityKind;
    use http_body_util::BodyExt;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_returns_404_with_kind() {
        let (status, body) = render(ClinicError::NotFound(EntityKind::HealthSystem).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Health System not found");
    }

    #[tokio::test]
    async fn test_validation_returns_400_with_every_message() {
        let err = ClinicError::Validation(vec!["Must provide patient".into(), "Must provide doctor".into()]);
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["errors"],
            serde_json::json!(["Must provide patient", "Must provide doctor"])
        );
    }

    #[tokio::test]
    async fn test_rule_violations_return_406() {
        let (status, body) = render(ClinicError::DoctorNotGp { doctor_id: 3 }.into()).await;
        assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
        assert_eq!(body["message"], "Doctor with id 3 cannot be general practitioner.");

        let (status, _) = render(ClinicError::NegativeIncome.into()).await;
        assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    }

    #[tokio::test]
    async fn test_relations_return_405() {
        let (status, body) = render(ClinicError::HasRelations.into()).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body["message"],
            "Could not perform the operation because the entity has relations to other entities"
        );
    }

    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let (status, body) = render(ClinicError::LockPoisoned.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal error");

        let (status, _) = render(ClinicError::IncomeOverflow.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
