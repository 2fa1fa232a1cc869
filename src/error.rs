//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The username and password did not match a registered user.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The username or password was left empty.
    #[error("username and password must not be empty")]
    EmptyCredentials,

    /// A user tried to register with a username that is already taken.
    #[error("the username \"{0}\" is already taken")]
    DuplicateUsername(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The session token cookie is missing from the cookie jar in the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// The session token has passed its expiry time.
    #[error("the session has expired")]
    SessionExpired,

    /// The session token could not be serialized or deserialized.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// The amount entered for a transaction is not a number zero or greater.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The entry form was submitted without choosing expense or income.
    #[error("the transaction type is missing")]
    MissingTransactionType,

    /// The date entered for a transaction is not a calendar date.
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),

    /// Tried to delete a transaction at a position past the end of the ledger.
    #[error("tried to delete a transaction that is not in the ledger")]
    DeleteMissingTransaction,

    /// Could not acquire the lock on one of the CSV stores.
    #[error("could not acquire the store lock")]
    StoreLockError,

    /// Reading or writing one of the CSV files failed.
    #[error("an I/O error occurred: {0}")]
    Io(String),

    /// The CSV had issues that prevented it from being parsed.
    #[error("Could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        if value.is_io_error() {
            Error::Io(value.to_string())
        } else {
            Error::InvalidCSV(value.to_string())
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::StoreLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid amount".to_owned(),
                    details: format!(
                        "\"{amount}\" is not a valid amount. Enter a number that is zero or greater."
                    ),
                },
            ),
            Error::InvalidDate(date) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid date".to_owned(),
                    details: format!("\"{date}\" is not a valid date. Use the format YYYY-MM-DD."),
                },
            ),
            Error::MissingTransactionType => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Missing transaction type".to_owned(),
                    details: "Choose whether the transaction is an expense or income.".to_owned(),
                },
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert {
                    message: "Could not delete transaction".to_owned(),
                    details: "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted."
                        .to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}
