//! Error types.
//!
//! Two kinds of failure live here:
//!
//! - [`ApiError`] is an application-level failure (bad input, missing key,
//!   unknown record). It carries the HTTP status and message it will be
//!   rendered with, and converts into the `{"error": "..."}` envelope.
//! - [`Error`] surfaces infrastructure failures: binding to a port, accepting
//!   a connection, loading configuration.

use std::net::AddrParseError;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// The error type returned by murmur's fallible infrastructure operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address `{addr}`: {source}")]
    Address {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("cannot read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A request failure that becomes exactly one HTTP error response.
///
/// Build one at the point of failure and return it; handlers use
/// `Result<_, ApiError>` and the `?` operator, and the terminal responder
/// ([`IntoResponse`]) turns it into `{"error": message}` with `status`.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    status: Status,
    message: String,
}

impl ApiError {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Malformed or missing input.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(Status::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(Status::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Status::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(Status::Conflict, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Status::InternalServerError, message)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for ApiError {
    fn default() -> Self {
        Self::internal("Internal Server Error")
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::internal(format!("failed to serialize response: {e}"))
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    error: &'a str,
}

/// The terminal error responder. Every error path in the app ends here.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(status = self.status.as_u16(), error = %self.message, "request failed");
        } else {
            debug!(status = self.status.as_u16(), error = %self.message, "request rejected");
        }

        // Serializing a single borrowed string cannot fail; the fallback keeps
        // the envelope shape regardless.
        let body = serde_json::to_vec(&Envelope { error: &self.message })
            .unwrap_or_else(|_| br#"{"error":"Internal Server Error"}"#.to_vec());

        Response::builder().status(self.status).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn factory_keeps_status_and_message() {
        let err = ApiError::new(Status::Unauthorized, "Invalid API Key");
        assert_eq!(err.status(), Status::Unauthorized);
        assert_eq!(err.message(), "Invalid API Key");
        assert_eq!(err.to_string(), "Invalid API Key");
    }

    #[test]
    fn default_is_internal() {
        assert_eq!(ApiError::default().status(), Status::InternalServerError);
    }

    #[test]
    fn renders_error_envelope() {
        let res = ApiError::not_found("Resource Not Found").into_response();
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.header("content-type"), Some("application/json"));

        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body, json!({ "error": "Resource Not Found" }));
    }

    #[test]
    fn escapes_message_in_envelope() {
        let res = ApiError::bad_request(r#"bad "quote""#).into_response();
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["error"], r#"bad "quote""#);
    }
}
