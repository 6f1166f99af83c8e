//! Defines the app level error type and its conversions to HTTP responses.
use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;

use crate::html::error_view;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The seed data could not be fetched from the upstream provider, e.g.
    /// the host is unreachable or the request timed out.
    #[error("could not fetch the seed data: {0}")]
    SeedFetch(String),

    /// The upstream provider answered with a non-success status code.
    #[error("the seed data provider responded with status {0}")]
    SeedStatus(u16),

    /// The upstream provider's response was not a list of records.
    #[error("could not decode the seed data: {0}")]
    SeedDecode(String),

    /// The record collection could not be serialized as JSON.
    #[error("could not serialize the records as JSON: {0}")]
    JSONSerializationError(String),

    /// The record collection could not be written to the data file.
    #[error("could not write the records to {path}: {reason}")]
    WriteFailed {
        /// The path of the data file.
        path: String,
        /// The underlying IO error.
        reason: String,
    },

    /// Could not acquire the lock on an in-memory record store.
    #[error("could not acquire the record store lock")]
    StoreLockError,

    /// A part of a combined request did not finish in time.
    #[error("timed out while computing the {0}")]
    Timeout(&'static str),

    /// A background task panicked or was cancelled.
    #[error("the task computing the {0} failed: {1}")]
    TaskFailed(&'static str, String),
}

/// The body of a JSON error response.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    error: String,
}

/// An [Error] paired with a message describing what the client asked for.
///
/// Renders as a 500 response with the JSON body `{"message": ..., "error": ...}`.
#[derive(Debug)]
pub struct ApiError {
    /// A short description of the failed operation, e.g. "Error fetching statistics".
    pub message: &'static str,
    /// The cause of the failure.
    pub error: Error,
}

impl ApiError {
    /// Create an error response for the operation described by `message`.
    pub fn new(message: &'static str, error: Error) -> Self {
        Self { message, error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("{}: {}", self.message, self.error);

        let body = ErrorBody {
            message: self.message,
            error: self.error.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Renders the error as the HTML error page, for routes that serve pages.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("An unexpected error occurred: {}", self);

        let page = error_view(
            "Internal Server Error",
            "500",
            "Sorry, something went wrong.",
            "Try again later or check the server logs",
        );

        (StatusCode::INTERNAL_SERVER_ERROR, Html(page.into_string())).into_response()
    }
}
