//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a request can hit, from a missing token to a store fault, is funnelled
//! through this type so that clients always receive the same `{"error": "..."}` body.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert application errors
//! into HTTP responses. Server-side faults are logged here and hidden from the client
//! behind a generic message.

use actix_web::{error::BlockingError, error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Message sent to clients for every unexpected server-side failure.
pub const GENERIC_FAILURE: &str = "Something failed";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// No credentials were presented (HTTP 401).
    Unauthorized(String),
    /// The request was understood but rejected (HTTP 400): invalid tokens,
    /// duplicate registrations.
    BadRequest(String),
    /// The resource does not exist, or exists but belongs to somebody else (HTTP 404).
    NotFound(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// A failure reported by the backing store (HTTP 500).
    DatabaseError(String),
    /// Malformed or missing input fields (HTTP 400).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg) => msg.as_str(),
            // Store and runtime faults never leak their details to the client.
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                log::error!("{}", self);
                GENERIC_FAILURE
            }
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// Unique-constraint violations can only come from the `users` table, where they
/// mean a concurrent registration won the race for the same login or email.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::BadRequest(crate::models::user::ALREADY_REGISTERED.into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// Only field names and rule codes reach the client (`"password: length"`); the
/// rejected values never do.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        let mut fields: Vec<String> = error
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let codes: Vec<&str> = errors.iter().map(|e| &*e.code).collect();
                format!("{}: {}", field, codes.join(", "))
            })
            .collect();
        fields.sort();
        AppError::ValidationError(fields.join("; "))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalServerError(format!("Blocking task failed: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_error_statuses() {
        let error = AppError::Unauthorized("Access denied. No token provided.".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::BadRequest("Invalid token.".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::ValidationError("login: too short".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::NotFound("Resource not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::InternalServerError("Server error".into());
        assert_eq!(error.error_response().status(), 500);

        let error = AppError::DatabaseError("connection reset".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[actix_rt::test]
    async fn test_internal_details_are_hidden() {
        let error = AppError::DatabaseError("password authentication failed for user".into());
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], GENERIC_FAILURE);
    }

    #[test]
    fn test_validation_errors_name_fields_without_values() {
        use validator::ValidationError;

        let mut errors = ValidationErrors::new();
        let mut rejected = ValidationError::new("length");
        rejected.add_param("value".into(), &"hunter");
        errors.add("password", rejected);
        errors.add("email", ValidationError::new("email"));

        match AppError::from(errors) {
            AppError::ValidationError(msg) => {
                assert_eq!(msg, "email: email; password: length");
                assert!(!msg.contains("hunter"));
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_client_errors_carry_their_message() {
        let error = AppError::NotFound("The task with the given ID was not found!".into());
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "The task with the given ID was not found!");
    }
}
