use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::endpoints::{calculator, export, records, status};
use crate::types::AppState;

mod endpoints;
pub mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Stateless calculation endpoints
    let calculator_router = Router::new()
        .route("/gpa", post(calculator::post_gpa))
        .route("/cgpa", post(calculator::post_cgpa))
        .route("/project", post(calculator::post_projection))
        .route("/advice", post(calculator::post_advice))
        .route("/selftest", get(status::get_selftest))
        .route("/export/csv", post(export::post_export_csv))
        .route("/export/report", post(export::post_export_report));

    // Endpoints backed by the document store
    let records_router = Router::new()
        .route("/profile", post(records::post_profile))
        .route("/profile/:user_id", get(records::get_profile))
        .route(
            "/semesters/:user_id",
            put(records::put_semester)
                .post(records::post_semesters)
                .get(records::get_semesters),
        )
        .route(
            "/semesters/:user_id/:term",
            delete(records::delete_semester),
        )
        .route("/advice/:user_id", get(records::get_stored_advice));

    Router::new()
        .route("/", get(status::get_root))
        .route("/health", get(status::get_health))
        .route("/test", get(status::get_store_status))
        .nest("/api", calculator_router.merge(records_router))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(app_state)
}
