//! Endpoints for GPA, CGPA, projection and advice calculations.
//!
//! Request bodies are validated field by field before any engine runs, so
//! a malformed record is reported with the field or course that failed.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::grading::{
    self, classify_honors, Course, GpaResult, GradingError, SemesterRecord, UserProfile,
};
use crate::server::types::ApiErrorType;
use crate::types::AppState;

#[derive(Debug, Deserialize)]
pub struct GpaRequest {
    pub courses: Vec<Course>,
}

#[derive(Debug, Deserialize)]
pub struct CgpaRequest {
    pub semesters: Vec<SemesterRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    #[serde(default)]
    pub completed: Vec<Course>,
    pub remaining_credits: f64,
    pub target_class: String,
}

#[derive(Debug, Deserialize)]
pub struct AdviceRequest {
    pub profile: UserProfile,
    pub semesters: Vec<SemesterRecord>,
}

#[derive(Debug, Serialize)]
pub struct CgpaResponse {
    pub cgpa: f64,
    pub gpa_by_semester: Vec<GpaResult>,
    pub classification: &'static str,
}

pub(crate) fn validate_courses(courses: &[Course]) -> Result<(), GradingError> {
    courses.iter().try_for_each(Course::validate)
}

pub(crate) fn validate_semesters(semesters: &[SemesterRecord]) -> Result<(), GradingError> {
    semesters.iter().try_for_each(SemesterRecord::validate)
}

/// Logs and converts a rejected calculation into a response.
pub(crate) fn rejection(route: &str, err: GradingError) -> Response {
    warn!("{} rejected: {}", route, err);
    ApiErrorType::from(err).into_response()
}

/// POST /api/gpa
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn post_gpa(Json(req): Json<GpaRequest>) -> Response {
    info!("POST /api/gpa ({} courses)", req.courses.len());

    let result = validate_courses(&req.courses).and_then(|_| grading::compute_gpa(&req.courses));
    match result {
        Ok(gpa) => (StatusCode::OK, Json(gpa)).into_response(),
        Err(e) => rejection("POST /api/gpa", e),
    }
}

/// POST /api/cgpa
///
/// Returns the cumulative GPA, per-semester results, and the classification
/// the cumulative GPA falls into.
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn post_cgpa(Json(req): Json<CgpaRequest>) -> Response {
    info!("POST /api/cgpa ({} semesters)", req.semesters.len());

    let result =
        validate_semesters(&req.semesters).and_then(|_| grading::compute_cgpa(&req.semesters));
    match result {
        Ok(data) => {
            let response = CgpaResponse {
                classification: classify_honors(data.cgpa),
                cgpa: data.cgpa,
                gpa_by_semester: data.gpa_by_semester,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => rejection("POST /api/cgpa", e),
    }
}

/// POST /api/project
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn post_projection(Json(req): Json<ProjectionRequest>) -> Response {
    info!(
        "POST /api/project (target={}, remaining_credits={})",
        req.target_class, req.remaining_credits
    );

    let result = validate_courses(&req.completed).and_then(|_| {
        grading::project_needed_average(&req.completed, req.remaining_credits, &req.target_class)
    });
    match result {
        Ok(projection) => (StatusCode::OK, Json(projection)).into_response(),
        Err(e) => rejection("POST /api/project", e),
    }
}

/// POST /api/advice
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn post_advice(
    State(s): State<Arc<AppState>>,
    Json(req): Json<AdviceRequest>,
) -> Response {
    info!(
        "POST /api/advice (user={}, {} semesters)",
        req.profile.user_id,
        req.semesters.len()
    );

    let result = req
        .profile
        .validate()
        .and_then(|_| validate_semesters(&req.semesters))
        .and_then(|_| s.advisor.generate_advice(&req.profile, &req.semesters));
    match result {
        Ok(advice) => (StatusCode::OK, Json(advice)).into_response(),
        Err(e) => rejection("POST /api/advice", e),
    }
}
