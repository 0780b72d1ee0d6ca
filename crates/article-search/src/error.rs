//! Error types for the article search service.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! [`ClientError`] covers the search engine boundary; [`ApiError`] is what a request
//! handler reports and maps onto an HTTP status.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors from the search engine client.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Engine rejected the request under load (429 response)
    #[error("Rate limited by search engine: {message}")]
    RateLimited {
        /// Response body
        message: String,
    },

    /// Index not found (404 response)
    #[error("Index not found: {resource}")]
    NotFound {
        /// Response body describing the missing index
        resource: String,
    },

    /// Query rejected by the engine (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the engine
        message: String,
    },

    /// Malformed response body
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// A hit came back without a document id.
    #[error("Search hit is missing its document id")]
    MissingId,

    /// Ping answered with a non-success status.
    #[error("Elasticsearch is not reachable: {reason}")]
    Unreachable {
        /// What the ping saw
        reason: String,
    },
}

impl ClientError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Create an unreachable error.
    #[must_use]
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::Unreachable { reason: reason.into() }
    }
}

/// Errors reported by request handlers.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Request parameters failed validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Parameter that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Nothing to report for the requested selection.
    #[error("{0}")]
    NotFound(String),

    /// Search engine failure.
    #[error("Error occurred: {0}")]
    Engine(#[from] ClientError),
}

impl ApiError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `detail` field of the response body.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            _ => self.to_string(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation("query", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Engine(error) => tracing::error!(%error, "Search engine call failed"),
            other => tracing::debug!(status = status.as_u16(), error = %other, "Request rejected"),
        }

        (status, Json(serde_json::json!({ "detail": self.detail() }))).into_response()
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for request handling.
pub type ApiResult<T> = Result<T, ApiError>;
