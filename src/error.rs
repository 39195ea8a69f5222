//! Defines the app level error type and its conversion to JSON responses.
use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A month-scoped operation was requested without a month selector.
    #[error("Month is required")]
    MissingMonth,

    /// The month selector is neither a month name, an abbreviation nor a
    /// number from 1 to 12.
    #[error("\"{0}\" is not a valid month")]
    InvalidMonth(String),

    /// The query string could not be read, e.g. a month-scoped report was
    /// given more than one month.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A background read task panicked or was cancelled before it finished.
    #[error("a read task did not complete: {0}")]
    TaskFailed(String),

    /// The seed feed could not be parsed or contained invalid records.
    #[error("invalid seed data: {0}")]
    InvalidSeedData(String),

    /// The seed file could not be read.
    #[error("could not read the seed file: {0}")]
    SeedFileError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("rejected query string: {rejection}");

        let reason = rejection.body_text();
        let reason = reason
            .strip_prefix("Failed to deserialize query string: ")
            .map(str::to_owned)
            .unwrap_or(reason);

        Error::InvalidQuery(reason)
    }
}

/// The JSON body sent to clients for every error response.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::MissingMonth | Error::InvalidMonth(_) | Error::InvalidQuery(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong, check the server logs for more details.".to_owned(),
                )
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}
