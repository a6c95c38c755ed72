use actix_web::{HttpResponse, ResponseError};
use shared_types::ErrorResponse;
use survey_engine::{StorageError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Survey not found: {0}")]
    SurveyNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
        };

        match self {
            AppError::SurveyNotFound(_) => HttpResponse::NotFound().json(error_response),
            AppError::InvalidRequest(_) | AppError::Validation(_) => {
                HttpResponse::BadRequest().json(error_response)
            }
            AppError::Storage(_) => HttpResponse::InternalServerError().json(error_response),
        }
    }
}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::Storage(_) => "storage_error",
            AppError::SurveyNotFound(_) => "survey_not_found",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::Validation(_) => "validation_error",
        }
    }
}
