use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sixcities_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    NotFoundError { message: String, detail: &'static str },
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error(transparent)]
    Anyhow(anyhow::Error),
}

impl AppError {
    pub fn offer_not_found(offer_id: &str) -> Self {
        AppError::NotFoundError {
            message: format!("Offer with id {} not found.", offer_id),
            detail: "OfferController",
        }
    }
}

/// Wire shape shared by every error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: u16,
    message: String,
    detail: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            AppError::NotFoundError { message, detail } => {
                (StatusCode::NOT_FOUND, message, Some(detail.to_string()))
            }
            AppError::ValidationError(reason) => {
                (StatusCode::BAD_REQUEST, "Validation failed".to_string(), Some(reason))
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string(), None)
            }
        };

        let body = Json(ErrorBody {
            status_code: status.as_u16(),
            message,
            detail,
        });

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(reason) => AppError::ValidationError(reason),
            other => AppError::Anyhow(other.into()),
        }
    }
}
