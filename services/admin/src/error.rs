//! Custom error types for the admin service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::models::{ErrorBody, Flash};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{error, warn};

use crate::repositories::RepositoryError;

pub const EMAIL_TAKEN: &str = "The email has already been taken.";
pub const INVALID_DATA: &str = "The given data was invalid.";

/// Field-keyed validation messages, keyed by field name in sorted order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for a single failing field
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record the outcome of a single-field check
    pub fn check(&mut self, field: &str, outcome: Result<(), String>) {
        if let Err(message) = outcome {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

/// Custom error type for the admin service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request fields failed validation; nothing was persisted
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// Referenced record is absent or not visible to the caller
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid credentials
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but outside the permitted section
    #[error("Forbidden")]
    Forbidden,

    /// Declared operation with no behavior behind it
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Persistence failure
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

/// Field named by a body deserialization failure, e.g. `title` in
/// `...target type: title: invalid type: integer`
fn rejected_field(message: &str) -> Option<String> {
    let (_, detail) = message.split_once("target type: ")?;
    let (path, _) = detail.split_once(": ")?;

    if path.is_empty() || path == "." || path.contains(' ') {
        None
    } else {
        Some(path.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        warn!("Rejected request body: {}", message);

        let errors = match &rejection {
            JsonRejection::JsonDataError(_) => match rejected_field(&message) {
                Some(field) => {
                    let text = format!("The {} field is invalid.", field);
                    FieldErrors::single(&field, text)
                }
                None => FieldErrors::single("body", "The request body is invalid."),
            },
            _ => FieldErrors::single("body", "The request body must be a JSON object."),
        };

        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors, flash) = match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                errors.into_inner(),
                Flash::error(INVALID_DATA),
            ),
            ApiError::Repository(RepositoryError::DuplicateEmail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                FieldErrors::single("email", EMAIL_TAKEN).into_inner(),
                Flash::error(INVALID_DATA),
            ),
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, BTreeMap::new(), Flash::error(message))
            }
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                BTreeMap::new(),
                Flash::error("Unauthenticated."),
            ),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                BTreeMap::new(),
                Flash::error("This action is unauthorized."),
            ),
            ApiError::NotImplemented(message) => (
                StatusCode::NOT_IMPLEMENTED,
                BTreeMap::new(),
                Flash::error(message),
            ),
            ApiError::Repository(e) => {
                error!("Repository failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    BTreeMap::new(),
                    Flash::error("Something went wrong. Please try again."),
                )
            }
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                BTreeMap::new(),
                Flash::error("Something went wrong. Please try again."),
            ),
        };

        (status, Json(ErrorBody { errors, flash })).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
