//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{alert::Alert, html::error_view, not_found::NotFoundError};

const DEFAULT_SERVER_ERROR: &str = "Sorry, something went wrong.";
const DEFAULT_SERVER_ERROR_FIX: &str = "Try again later or check the server logs";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A main category that is not one of the eight fixed categories.
    #[error("\"{0}\" is not a main category")]
    InvalidMainCategory(String),

    /// A sub category that does not belong to the chosen main category.
    #[error("\"{sub}\" is not a sub category of {main}")]
    InvalidSubCategory {
        /// The label of the main category.
        main: String,
        /// The rejected sub category.
        sub: String,
    },

    /// An empty string was used to create a tag name.
    #[error("Tag name cannot be empty")]
    EmptyTagName,

    /// A month that is not in the `YYYY-MM` format.
    #[error("\"{0}\" is not a valid month, expected YYYY-MM")]
    InvalidMonthKey(String),

    /// An amount that is negative, not a number or infinite.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A date or time that is not in the `YYYY-MM-DD` or `HH:MM` format.
    #[error("\"{0}\" is not a valid date or time")]
    InvalidDateTime(String),

    /// A required form field was left empty.
    #[error("the field {0} is required")]
    MissingField(&'static str),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The gateway did not accept a create, update or delete.
    #[error("the transaction could not be saved")]
    WriteFailed,

    /// The CSV export could not be written.
    #[error("could not write CSV: {0}")]
    CsvError(String),
}

impl Error {
    /// Whether the error was caused by bad user input rather than the server.
    fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidMainCategory(_)
                | Error::InvalidSubCategory { .. }
                | Error::EmptyTagName
                | Error::InvalidMonthKey(_)
                | Error::InvalidAmount(_)
                | Error::InvalidDateTime(_)
                | Error::MissingField(_)
        )
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CsvError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => server_error_page(
                "時區設定錯誤",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            ),
            Error::DatabaseLockError => {
                server_error_page(DEFAULT_SERVER_ERROR, DEFAULT_SERVER_ERROR_FIX)
            }
            error if error.is_validation_error() => (
                StatusCode::BAD_REQUEST,
                Html(
                    error_view("Bad Request", "400", "輸入格式錯誤", &error.to_string())
                        .into_string(),
                ),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                server_error_page(DEFAULT_SERVER_ERROR, DEFAULT_SERVER_ERROR_FIX)
            }
        }
    }
}

/// The 500 page with a short `description` of the problem and a suggested `fix`.
fn server_error_page(description: &str, fix: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(error_view("Internal Server Error", "500", description, fix).into_string()),
    )
        .into_response()
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::MissingField(_)
            | Error::InvalidMainCategory(_)
            | Error::InvalidSubCategory { .. } => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "請填寫金額與分類".to_owned(),
                    details: self.to_string(),
                },
            ),
            Error::InvalidAmount(_)
            | Error::InvalidDateTime(_)
            | Error::EmptyTagName
            | Error::InvalidMonthKey(_) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "輸入格式錯誤".to_owned(),
                    details: self.to_string(),
                },
            ),
            Error::WriteFailed => (
                StatusCode::BAD_GATEWAY,
                Alert {
                    message: "儲存失敗，請檢查 API 設定".to_owned(),
                    details: "The change was not saved. Check the endpoint settings and the \
                        server logs, then try again."
                        .to_owned(),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert {
                    message: "找不到這筆紀錄".to_owned(),
                    details: "Try refreshing the page to see if the transaction has already \
                        been deleted."
                        .to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert {
                    message: "時區設定錯誤".to_owned(),
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
                        message: "發生錯誤".to_owned(),
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
