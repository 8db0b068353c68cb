use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::grading::{self, Course, GradingError, SemesterRecord, StudyAdvisor, UserProfile};
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// Maximum number of collection names reported by `/test`.
const MAX_LISTED_COLLECTIONS: usize = 10;

/// GET /
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn get_root() -> Response {
    (
        StatusCode::OK,
        Json(json!({ "message": "GPA & Graduation Planner API running" })),
    )
        .into_response()
}

/// GET /health
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn get_health(State(s): State<Arc<AppState>>) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "uptime_secs": s.started_at.elapsed().as_secs(),
            "nominal_credits": s.advisor.config().nominal_credits,
        })),
    )
        .into_response()
}

/// GET /test
///
/// Reports whether the document store is connected and which collections it
/// holds.
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn get_store_status(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /test");

    let Some(ref store) = s.store else {
        return (
            StatusCode::OK,
            Json(json!({
                "backend": "Running",
                "database": "Not Available",
                "database_url": null,
                "database_name": null,
                "connection_status": "Not Connected",
                "collections": [],
            })),
        )
            .into_response();
    };

    let database_url = if s.database_url_set { "Set" } else { "Not Set" };
    let (database, connection_status, collections) = match store.collection_names() {
        Ok(mut names) => {
            names.truncate(MAX_LISTED_COLLECTIONS);
            ("Connected & Working".to_string(), "Connected", names)
        }
        Err(e) => {
            warn!("Store is open but listing collections failed: {}", e);
            let detail: String = e.to_string().chars().take(80).collect();
            (format!("Connected but Error: {detail}"), "Error", Vec::new())
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "backend": "Running",
            "database": database,
            "database_url": database_url,
            "database_name": store.name(),
            "connection_status": connection_status,
            "collections": collections,
        })),
    )
        .into_response()
}

/// GET /api/selftest
///
/// Runs every calculator on fixed records and returns the results.
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn get_selftest(State(s): State<Arc<AppState>>) -> Response {
    info!("GET /api/selftest");

    match run_selftest(&s.advisor) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!("Self-test failed: {}", e);
            ApiErrorType::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Self-test failed",
                Some(e.to_string()),
            ))
            .into_response()
        }
    }
}

fn run_selftest(advisor: &StudyAdvisor) -> Result<Value, GradingError> {
    let completed = [Course::new("TST101", "Test", 3.0).with_grade("A")];
    let gpa = grading::compute_gpa(&completed)?;

    let cgpa = grading::compute_cgpa(&[
        SemesterRecord::new("S1", vec![Course::new("T1", "t1", 3.0).with_grade("A")]),
        SemesterRecord::new("S2", vec![Course::new("T2", "t2", 3.0).with_grade("B")]),
    ])?;

    let projection = grading::project_needed_average(&completed, 9.0, "Second Class Upper")?;

    let profile = UserProfile {
        user_id: "u1".to_string(),
        name: "User".to_string(),
        program: "SE".to_string(),
        target_class: None,
    };
    let advice = advisor.generate_advice(
        &profile,
        &[
            SemesterRecord::new(
                "S1",
                vec![Course::new("MTH", "Math", 3.0)
                    .with_grade("C")
                    .with_category("math")],
            ),
            SemesterRecord::new(
                "S2",
                vec![Course::new("PRG", "Prog", 3.0)
                    .with_grade("B")
                    .with_category("programming")],
            ),
        ],
    )?;

    Ok(json!({
        "ok": true,
        "gpa": gpa,
        "cgpa": { "cgpa": cgpa.cgpa },
        "projection": projection,
        "advice": advice,
    }))
}
