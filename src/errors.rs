use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid request fields")]
    Validation(BTreeMap<String, String>),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    /// Field path to message, only present for field validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { .. } => AppError::NotFound(e.to_string()),
            DomainError::InvalidInput(msg) => AppError::BadRequest(msg),
            DomainError::Storage(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details = BTreeMap::new();
        collect_field_messages(&errors, "", &mut details);
        AppError::Validation(details)
    }
}

/// Flattens nested validation errors into `pedidos[0].total` style paths.
fn collect_field_messages(
    errors: &ValidationErrors,
    prefix: &str,
    out: &mut BTreeMap<String, String>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                if let Some(first) = field_errors.first() {
                    let message = first
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| first.code.to_string());
                    out.insert(path, message);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_field_messages(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_messages(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let (error, message, details) = match self {
            AppError::BadRequest(msg) => ("Bad Request", msg.clone(), None),
            AppError::Validation(fields) => (
                "Validation Error",
                self.to_string(),
                Some(fields.clone()),
            ),
            AppError::NotFound(msg) => ("Not Found", msg.clone(), None),
            AppError::Internal(cause) => {
                log::error!("Internal server error: {}", cause);
                (
                    "Internal Server Error",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };
        HttpResponse::build(status).json(ErrorResponse {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: error.to_string(),
            message,
            details,
        })
    }
}
