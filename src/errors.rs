//! # Error mapping for resource handlers
//!
//! Every failure is mapped once, at the handler boundary, to a status code and a JSON body
//! of the form `{"error": "..."}`. Some not-found responses also echo the decoded request
//! payload under `data`.
//!
//! Storage failures are opaque to callers. The single exception is a unique-constraint
//! violation, which is classified as `409 Conflict`; every other storage error keeps the
//! generic `500` shape. Internal details are logged with `tracing` and never sent to the
//! client.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found
    NotFound {
        message: String,
        /// Decoded payload echoed back to the caller, if any.
        data: Option<serde_json::Value>,
    },

    /// 400 Bad Request, e.g. a body that does not decode into the record type
    BadRequest { message: String },

    /// 409 Conflict, a unique constraint rejected the write
    Conflict { message: String },

    /// 500 Internal Server Error (details logged, not exposed)
    Database { message: String, internal: DbErr },
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            data: None,
        }
    }

    /// Not found, echoing `data` in the response body.
    pub fn not_found_with(message: impl Into<String>, data: serde_json::Value) -> Self {
        Self::NotFound {
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Opaque storage failure with a user-facing `message`.
    pub fn database(message: impl Into<String>, internal: DbErr) -> Self {
        Self::Database {
            message: message.into(),
            internal,
        }
    }

    /// Classifies a storage error raised by a resource operation.
    ///
    /// - `DbErr::RecordNotFound` → 404 `"Record not found"`
    /// - unique-constraint violation → 409
    /// - anything else → 500 with `context` as the message
    pub fn storage(err: DbErr, context: &str) -> Self {
        if matches!(err, DbErr::RecordNotFound(_)) {
            return Self::not_found("Record not found");
        }
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            return Self::conflict("Duplicate entry");
        }
        Self::database(context, err)
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> &str {
        match self {
            Self::NotFound { message, .. }
            | Self::BadRequest { message }
            | Self::Conflict { message }
            | Self::Database { message, .. } => message,
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal, message } => {
                tracing::error!(error = ?internal, message = %message, "Database error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let data = match &self {
            Self::NotFound { data, .. } => data.as_ref(),
            _ => None,
        };
        let body = ErrorResponse {
            error: self.user_message(),
            data,
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self::storage(err, "A database error occurred")
    }
}

/// Any body that fails to decode, whether malformed JSON, a wrong field type or a missing
/// content type, is reported as 400 with the decoder's reason.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
