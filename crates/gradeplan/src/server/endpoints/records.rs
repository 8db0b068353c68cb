//! Persistence endpoints for profiles and semester history.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info};

use super::calculator::{rejection, validate_semesters};
use crate::db::{self, StoreError};
use crate::grading::{GradingError, SemesterRecord, UserProfile};
use crate::server::types::ApiErrorType;
use crate::types::AppState;

fn store_error_to_response(route: &str, err: StoreError) -> Response {
    error!("{} failed: {}", route, err);
    ApiErrorType::from(err).into_response()
}

/// A history may hold each term at most once.
fn validate_history(semesters: &[SemesterRecord]) -> Result<(), GradingError> {
    validate_semesters(semesters)?;

    let mut terms = HashSet::with_capacity(semesters.len());
    for semester in semesters {
        if !terms.insert(semester.term.as_str()) {
            return Err(GradingError::InvalidField {
                field: "term",
                reason: format!("'{}' appears more than once", semester.term),
            });
        }
    }
    Ok(())
}

fn profile_not_found(user_id: &str) -> Response {
    ApiErrorType::from((
        StatusCode::NOT_FOUND,
        "Profile not found",
        Some(format!("No profile with user_id: {}", user_id)),
    ))
    .into_response()
}

/// POST /api/profile
///
/// Creates or updates a profile keyed by `user_id`.
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn post_profile(
    State(s): State<Arc<AppState>>,
    Json(profile): Json<UserProfile>,
) -> Response {
    info!("POST /api/profile (user={})", profile.user_id);

    if let Err(e) = profile.validate() {
        return rejection("POST /api/profile", e);
    }

    match s.store().and_then(|store| db::save_profile(store, &profile)) {
        Ok(doc) => (StatusCode::OK, Json(doc)).into_response(),
        Err(e) => store_error_to_response("POST /api/profile", e),
    }
}

/// GET /api/profile/:user_id
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn get_profile(
    Path(user_id): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /api/profile/{}", user_id);

    match s.store().and_then(|store| db::load_profile(store, &user_id)) {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile)).into_response(),
        Ok(None) => profile_not_found(&user_id),
        Err(e) => store_error_to_response("GET /api/profile", e),
    }
}

/// PUT /api/semesters/:user_id
///
/// Creates or replaces one term of the user's history.
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn put_semester(
    Path(user_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Json(semester): Json<SemesterRecord>,
) -> Response {
    info!("PUT /api/semesters/{} (term={})", user_id, semester.term);

    if let Err(e) = semester.validate() {
        return rejection("PUT /api/semesters", e);
    }

    match s
        .store()
        .and_then(|store| db::save_semester(store, &user_id, &semester))
    {
        Ok(doc) => (StatusCode::OK, Json(doc)).into_response(),
        Err(e) => store_error_to_response("PUT /api/semesters", e),
    }
}

/// POST /api/semesters/:user_id
///
/// Replaces the user's whole history with the given semesters, in order.
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn post_semesters(
    Path(user_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Json(semesters): Json<Vec<SemesterRecord>>,
) -> Response {
    info!("POST /api/semesters/{} ({} semesters)", user_id, semesters.len());

    if let Err(e) = validate_history(&semesters) {
        return rejection("POST /api/semesters", e);
    }

    match s
        .store()
        .and_then(|store| db::replace_semesters(store, &user_id, &semesters))
    {
        Ok(docs) => (StatusCode::OK, Json(docs)).into_response(),
        Err(e) => store_error_to_response("POST /api/semesters", e),
    }
}

/// DELETE /api/semesters/:user_id/:term
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn delete_semester(
    Path((user_id, term)): Path<(String, String)>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("DELETE /api/semesters/{}/{}", user_id, term);

    match s
        .store()
        .and_then(|store| db::delete_semester(store, &user_id, &term))
    {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({ "user_id": user_id, "term": term, "deleted": true })),
        )
            .into_response(),
        Ok(false) => ApiErrorType::from((
            StatusCode::NOT_FOUND,
            "Semester not found",
            Some(format!("No term '{}' stored for user_id: {}", term, user_id)),
        ))
        .into_response(),
        Err(e) => store_error_to_response("DELETE /api/semesters", e),
    }
}

/// GET /api/semesters/:user_id
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn get_semesters(
    Path(user_id): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /api/semesters/{}", user_id);

    match s.store().and_then(|store| db::load_semesters(store, &user_id)) {
        Ok(semesters) => (StatusCode::OK, Json(semesters)).into_response(),
        Err(e) => store_error_to_response("GET /api/semesters", e),
    }
}

/// GET /api/advice/:user_id
///
/// Generates advice from the stored profile and semester history.
#[cfg_attr(test, axum_macros::debug_handler)]
pub async fn get_stored_advice(
    Path(user_id): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /api/advice/{}", user_id);

    let store = match s.store() {
        Ok(store) => store,
        Err(e) => return store_error_to_response("GET /api/advice", e),
    };

    let profile = match db::load_profile(store, &user_id) {
        Ok(Some(profile)) => profile,
        Ok(None) => return profile_not_found(&user_id),
        Err(e) => return store_error_to_response("GET /api/advice", e),
    };

    let semesters = match db::load_semesters(store, &user_id) {
        Ok(semesters) => semesters,
        Err(e) => return store_error_to_response("GET /api/advice", e),
    };

    match s.advisor.generate_advice(&profile, &semesters) {
        Ok(advice) => (StatusCode::OK, Json(advice)).into_response(),
        Err(e) => rejection("GET /api/advice", e),
    }
}
