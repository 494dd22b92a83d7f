use actix_web::{HttpResponse, ResponseError, body::BoxBody, http::StatusCode};
use serde_json::json;
use strum::Display;
use thiserror::Error;

use crate::model::request::RequestStatus;

/// Why a cancellation request was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CancellationDenied {
    /// The requested time off has already elapsed.
    #[strum(serialize = "already passed")]
    AlreadyPassed,
    /// The start date is within the 4-week notice window.
    #[strum(serialize = "inside notice window")]
    InsideNoticeWindow,
}

/// Everything the engine can refuse to do. All variants are recoverable: the
/// caller gets a message and state is left untouched.
#[derive(Debug, Error)]
pub enum Error {
    #[error("start_date cannot be after end_date")]
    InvalidRange,

    #[error("no weekdays in range")]
    EmptyRange,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("request is {found}, expected {expected}")]
    StatePrecondition {
        expected: RequestStatus,
        found: RequestStatus,
    },

    #[error("cancellation not allowed: {0}")]
    CancellationNotAllowed(CancellationDenied),

    #[error("request was modified by someone else, reload and retry")]
    StaleState,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidRange | Error::EmptyRange => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::StatePrecondition { .. }
            | Error::CancellationNotAllowed(_)
            | Error::StaleState => StatusCode::CONFLICT,
            Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        if let Error::Database(e) = self {
            tracing::error!(error = %e, "Database failure");
            return HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            }));
        }

        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
