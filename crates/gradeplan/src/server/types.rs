use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::db::StoreError;
use crate::export::ExportError;
use crate::grading::GradingError;

/// JSON error body returned by every endpoint.
#[derive(Debug)]
pub struct ApiErrorType {
    status: StatusCode,
    error: String,
    context: Option<String>,
}

impl ApiErrorType {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<(StatusCode, &str, Option<String>)> for ApiErrorType {
    fn from((status, error, context): (StatusCode, &str, Option<String>)) -> Self {
        Self {
            status,
            error: error.to_string(),
            context,
        }
    }
}

impl From<GradingError> for ApiErrorType {
    fn from(err: GradingError) -> Self {
        let message = match err.root() {
            GradingError::InvalidGrade { .. } => "Invalid grade",
            GradingError::DuplicateCourse { .. } => "Duplicate course entry",
            GradingError::InvalidCreditHours { .. } => "Invalid credit hours",
            GradingError::UnknownTargetClass { .. } => "Unknown target class",
            GradingError::InvalidField { .. } | GradingError::InSemester { .. } => {
                "Invalid record"
            }
        };

        Self::from((StatusCode::BAD_REQUEST, message, Some(err.to_string())))
    }
}

impl From<StoreError> for ApiErrorType {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable => Self::from((
                StatusCode::SERVICE_UNAVAILABLE,
                "Database not connected",
                None,
            )),
            other => Self::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error",
                Some(other.to_string()),
            )),
        }
    }
}

impl From<ExportError> for ApiErrorType {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Grading(e) => Self::from(e),
            other => Self::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to render export",
                Some(other.to_string()),
            )),
        }
    }
}

impl IntoResponse for ApiErrorType {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": self.error,
                "context": self.context,
            })),
        )
            .into_response()
    }
}
