/// Projection of the average needed to reach a target classification
use super::error::GradingError;
use super::gpa::{compute_gpa, format_points, round3};
use super::table::{band_threshold, MAX_GRADE_POINTS};
use super::types::{Course, ProjectionResult};

/// Solves for the average GPA needed on the remaining credits.
///
/// `completed` goes through the GPA engine, so duplicate codes there are
/// rejected the same way as in a plain GPA request.
pub fn project_needed_average(
    completed: &[Course],
    remaining_credits: f64,
    target_class: &str,
) -> Result<ProjectionResult, GradingError> {
    let target_cgpa = band_threshold(target_class)?;
    let current = compute_gpa(completed)?;

    if remaining_credits <= 0.0 {
        return Ok(ProjectionResult {
            target_class: target_class.to_string(),
            target_cgpa,
            needed_avg_gpa: 0.0,
            message: "No remaining credits. Your final classification is already determined."
                .to_string(),
        });
    }

    // (P + x * R) / (C + R) = T
    let total_credits_final = current.total_credits + remaining_credits;
    let required_points_remaining = target_cgpa * total_credits_final - current.total_points;
    let required_avg = required_points_remaining / remaining_credits;
    let needed_avg_gpa = round3(required_avg.clamp(0.0, MAX_GRADE_POINTS));

    let message = if required_avg > MAX_GRADE_POINTS {
        format!(
            "Even a 4.0 average can't reach {target_class}. Aim for the highest possible and consult your advisor."
        )
    } else {
        format!(
            "You need an average GPA of {} across the remaining credits to achieve {target_class}.",
            format_points(needed_avg_gpa)
        )
    };

    Ok(ProjectionResult {
        target_class: target_class.to_string(),
        target_cgpa,
        needed_avg_gpa,
        message,
    })
}
