use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use super::calculator::{rejection, validate_semesters, CgpaRequest};
use crate::export::{self, ExportError};
use crate::server::types::ApiErrorType;

/// POST /api/export/csv
///
/// Returns the semester history as a CSV attachment.
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn post_export_csv(Json(req): Json<CgpaRequest>) -> Response {
    info!("POST /api/export/csv ({} semesters)", req.semesters.len());

    match export::transcript_csv(&req.semesters) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=transcript.csv",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to write CSV transcript: {}", e);
            ApiErrorType::from(e).into_response()
        }
    }
}

/// POST /api/export/report
///
/// Returns a printable, paginated GPA report as a text attachment.
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn post_export_report(Json(req): Json<CgpaRequest>) -> Response {
    info!("POST /api/export/report ({} semesters)", req.semesters.len());

    if let Err(e) = validate_semesters(&req.semesters) {
        return rejection("POST /api/export/report", e);
    }

    match export::build_report(&req.semesters) {
        Ok(report) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=gpa_report.txt",
                ),
            ],
            report,
        )
            .into_response(),
        Err(e) => ApiErrorType::from(ExportError::from(e)).into_response(),
    }
}
