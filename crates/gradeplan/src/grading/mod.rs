//! GPA, CGPA, classification, projection and advice.
//!
//! Everything in this module is pure and synchronous: results are computed
//! from the records passed in and nothing is retained between calls.
mod advisor;
mod classify;
mod config;
mod error;
mod gpa;
mod projection;
mod table;
mod types;

pub use advisor::StudyAdvisor;
pub use classify::classify_honors;
pub use config::{PlannerConfig, DEFAULT_NOMINAL_CREDITS, DEFAULT_TARGET_CLASS};
pub use error::GradingError;
pub use gpa::{compute_cgpa, compute_gpa, format_points, round3};
pub use projection::project_needed_average;
pub use table::{band_labels, band_threshold, grade_to_points, Grade, FAIL_LABEL, HONORS_BANDS};
pub use types::*;
