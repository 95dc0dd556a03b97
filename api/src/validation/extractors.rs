//! Custom Axum extractors for validated input
//!
//! Provides `ValidatedJson<T>` - a drop-in replacement for `Json<T>` that
//! sanitizes and validates incoming JSON payloads, and the error types used
//! to report every violated rule at once.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

/// A field-level validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation error response body.
///
/// `message` joins every rule message with ", " so a client can display all
/// problems at once; `errors` carries the same information per field.
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub message: String,
    pub errors: Vec<FieldError>,
    pub code: u16,
    pub timestamp: String,
    pub correlation_id: String,
}

impl ValidationErrorResponse {
    pub fn new(errors: Vec<FieldError>) -> Self {
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            error: "ValidationError".to_string(),
            message,
            errors,
            code: 400,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            correlation_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Validation error that converts to an HTTP response
#[derive(Debug)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// All rule messages joined with ", ".
    pub fn message(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl axum::response::IntoResponse for ValidationError {
    fn into_response(self) -> axum::response::Response {
        let response = ValidationErrorResponse::new(self.errors);
        (StatusCode::BAD_REQUEST, Json(response)).into_response()
    }
}

/// Trait for types that can be validated and sanitized
pub trait Validatable: Sized {
    /// Sanitize the data in-place before validation
    fn sanitize(&mut self);

    /// Validate the data and return every field error
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

/// Custom JSON extractor that validates and sanitizes input
///
/// Use instead of `Json<T>` to:
/// 1. Parse JSON from the request body
/// 2. Sanitize the payload
/// 3. Validate fields against the type's rules
/// 4. Return a detailed 400 for validation failures
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validatable + Send,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut data) = Json::<T>::from_request(req, state).await.map_err(|err| {
            let message = match err {
                axum::extract::rejection::JsonRejection::JsonDataError(e) => {
                    format!("Invalid JSON data: {}", e.body_text())
                }
                axum::extract::rejection::JsonRejection::JsonSyntaxError(e) => {
                    format!("JSON syntax error: {}", e.body_text())
                }
                axum::extract::rejection::JsonRejection::MissingJsonContentType(_) => {
                    "Content-Type must be application/json".to_string()
                }
                axum::extract::rejection::JsonRejection::BytesRejection(_) => {
                    "Failed to read request body".to_string()
                }
                _ => "Invalid JSON payload".to_string(),
            };
            ValidationError::single("body", message)
        })?;

        data.sanitize();
        data.validate().map_err(ValidationError::new)?;

        Ok(ValidatedJson(data))
    }
}

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Builder for accumulating validation errors
#[derive(Debug, Default)]
pub struct ValidationBuilder {
    errors: Vec<FieldError>,
}

impl ValidationBuilder {
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// Add an error if the validator returns Err
    pub fn check<F>(&mut self, field: &str, validator: F) -> &mut Self
    where
        F: FnOnce() -> Result<(), String>,
    {
        if let Err(message) = validator() {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Add an error directly
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError::new(field, message));
        self
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Finish building and return Result
    pub fn build(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
