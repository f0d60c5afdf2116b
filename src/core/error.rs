use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::shared::constants::{GENERATION_FAILED_MESSAGE, UNKNOWN_ERROR_MESSAGE};
use crate::shared::llm::InferenceError;
use crate::shared::prompts::TemplateError;
use crate::shared::types::ApiResponse;
use crate::shared::validation::collect_messages;

#[derive(Debug, Error)]
pub enum AppError {
    /// One entry per violated field constraint, as `field: message`
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(collect_messages(&errors))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Validation(errors) => {
                let message = errors
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Validation failed".to_string());
                (StatusCode::BAD_REQUEST, message, Some(errors))
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Inference(ref e) => {
                tracing::error!("Inference error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    GENERATION_FAILED_MESSAGE.to_string(),
                    None,
                )
            }
            AppError::Template(ref e) => {
                tracing::error!("Template error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    UNKNOWN_ERROR_MESSAGE.to_string(),
                    None,
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(message, errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
