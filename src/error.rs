use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors returned by client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL is not a valid absolute URL.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Endpoint path could not be joined to the base URL.
    #[error("invalid endpoint path '{0}'")]
    InvalidPath(String),

    /// Per-call options could not be encoded as query parameters.
    #[error("failed to encode query options: {0}")]
    QueryOptions(#[from] serde_qs::Error),

    /// HTTP transport-layer request failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body could not be parsed as JSON.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body did not have the expected shape for a text-valued
    /// endpoint (for example a non-numeric database size).
    #[error("unexpected response body: {0}")]
    UnexpectedBody(String),

    /// Non-success HTTP status, classified from the server's error body.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A non-2xx API response, classified into status, message and server
/// error code.
///
/// Equality compares the `(status, message, code)` tuple, so tests and
/// callers can match error values directly.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status of the response.
    pub status: StatusCode,
    /// Human-readable message from the server's error body, or the raw
    /// body text when it did not parse.
    pub message: String,
    /// Machine error code from the server's error body; empty when the
    /// body carried none.
    pub code: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "server returned status {}: {}", self.status, self.message)?;
        if !self.code.is_empty() {
            write!(f, " [{}]", self.code)?;
        }
        Ok(())
    }
}

/// Wire shape of the server's structured error body.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
    pub code: String,
}

impl ApiError {
    /// Builds an [`ApiError`] from a status and raw response body.
    ///
    /// A body matching `{"message": ..., "code": ...}` is taken as the
    /// server's structured error; anything else (including an empty body)
    /// falls back to the raw text with an empty code.
    pub(crate) fn classify(status: StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<ApiErrorBody>(body) {
            Ok(parsed) => Self {
                status,
                message: parsed.message,
                code: parsed.code,
            },
            Err(_) => Self {
                status,
                message: String::from_utf8_lossy(body).into_owned(),
                code: String::new(),
            },
        }
    }
}

/// Maps a call result onto a boolean existence check.
///
/// Success means "found"; an [`ApiError`] with status 404 means "absent"
/// and is not an error. Anything else passes through. Callers using this
/// helper treat 404 as a legitimate negative answer for that endpoint.
pub fn found(result: Result<(), ClientError>) -> Result<bool, ClientError> {
    match result {
        Ok(()) => Ok(true),
        Err(ClientError::Api(api)) if api.status == StatusCode::NOT_FOUND => Ok(false),
        Err(other) => Err(other),
    }
}
