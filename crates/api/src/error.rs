use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use spycat_core::error::CoreError;
use validator::ValidationErrors;

use crate::middleware::request_log::LoggedError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{"error": "<message>"}` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `spycat_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A domain error raised by a write route. Missing rows answer 400
    /// instead of 404 and store failures use `store_status`.
    #[error("{source}")]
    Write {
        source: CoreError,
        store_status: StatusCode,
    },

    /// Malformed body, path parameter or field validation failure.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Error from a `/cats` write route. Every failure is a 400.
    pub fn cat_write(source: CoreError) -> Self {
        AppError::Write {
            source,
            store_status: StatusCode::BAD_REQUEST,
        }
    }

    /// Error from a `/missions` or `/targets` write route. Store failures
    /// stay 500.
    pub fn mission_write(source: CoreError) -> Self {
        AppError::Write {
            source,
            store_status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => {
                core_status(core, StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR)
            }
            AppError::Write {
                source,
                store_status,
            } => core_status(source, StatusCode::BAD_REQUEST, *store_status),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let mut response = (status, axum::Json(json!({ "error": message }))).into_response();
        response
            .extensions_mut()
            .insert(LoggedError(self.to_string()));
        response
    }
}

/// Status and client-facing message for a domain error.
///
/// Store details never reach the client; they are logged here and attached
/// to the response for the request log.
fn core_status(
    core: &CoreError,
    not_found: StatusCode,
    store: StatusCode,
) -> (StatusCode, String) {
    match core {
        CoreError::NotFound { entity, .. } => {
            (not_found, format!("{} not found", entity.to_lowercase()))
        }
        CoreError::Validation(msg)
        | CoreError::Conflict(msg)
        | CoreError::Upstream(msg)
        | CoreError::Integrity(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        CoreError::InvalidBreed => (StatusCode::BAD_REQUEST, core.to_string()),
        CoreError::Store(msg) => {
            tracing::error!(error = %msg, status = %store, "Store error");
            let message = if store.is_server_error() {
                "An internal error occurred"
            } else {
                "The request could not be saved"
            };
            (store, message.to_string())
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::BadRequest(validation_message(&errors))
    }
}

/// Flatten field validation errors into one message, ordered by field name.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
