/// GPA and CGPA computation
use super::error::GradingError;
use super::table::grade_to_points;
use super::types::{CgpaResult, Course, GpaResult, SemesterRecord, MAX_CREDIT_HOURS};
use std::collections::HashSet;

/// Rounds to 3 decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Formats a grade-point or credit figure for display, keeping one decimal
/// place on whole numbers (`3.0`, `3.067`).
pub fn format_points(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Computes the credit-weighted GPA of a flat list of courses.
///
/// Ungraded courses are skipped. Codes are compared after normalization and
/// the first repeat is reported as `DuplicateCourse`.
pub fn compute_gpa(courses: &[Course]) -> Result<GpaResult, GradingError> {
    let mut total_points = 0.0;
    let mut total_credits = 0.0;
    let mut seen: HashSet<String> = HashSet::with_capacity(courses.len());

    for course in courses {
        let code = course.normalized_code();
        if !seen.insert(code.clone()) {
            return Err(GradingError::DuplicateCourse { code });
        }

        let Some(points) = grade_to_points(course.grade.as_deref())? else {
            continue;
        };

        if !(course.credit_hours > 0.0 && course.credit_hours <= MAX_CREDIT_HOURS) {
            return Err(GradingError::InvalidCreditHours {
                code,
                credit_hours: course.credit_hours,
            });
        }

        total_points += points * course.credit_hours;
        total_credits += course.credit_hours;
    }

    Ok(GpaResult {
        gpa: ratio(total_points, total_credits),
        total_points: round3(total_points),
        total_credits: round3(total_credits),
    })
}

/// Computes the cumulative GPA across semesters.
///
/// The cumulative figure sums every semester's points and credits, so a light
/// semester weighs only as much as its credits.
pub fn compute_cgpa(semesters: &[SemesterRecord]) -> Result<CgpaResult, GradingError> {
    let mut gpa_by_semester = Vec::with_capacity(semesters.len());
    let mut agg_points = 0.0;
    let mut agg_credits = 0.0;

    for semester in semesters {
        let result = compute_gpa(&semester.courses)
            .map_err(|e| GradingError::in_semester(&semester.term, e))?;
        agg_points += result.total_points;
        agg_credits += result.total_credits;
        gpa_by_semester.push(result);
    }

    Ok(CgpaResult {
        cgpa: ratio(agg_points, agg_credits),
        gpa_by_semester,
    })
}

fn ratio(points: f64, credits: f64) -> f64 {
    if credits > 0.0 {
        round3(points / credits)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graded(code: &str, credits: f64, grade: &str) -> Course {
        Course::new(code, code, credits).with_grade(grade)
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(0.0), "0.0");
        assert_eq!(format_points(3.0), "3.0");
        assert_eq!(format_points(3.067), "3.067");
        assert_eq!(format_points(2.5), "2.5");
    }

    #[test]
    fn test_basic_gpa() {
        let result = compute_gpa(&[graded("T1", 3.0, "A"), graded("T2", 3.0, "B")]).unwrap();
        assert_eq!(result.gpa, 3.5);
        assert_eq!(result.total_credits, 6.0);
        assert_eq!(result.total_points, 21.0);
    }

    #[test]
    fn test_empty_input_is_zero() {
        let result = compute_gpa(&[]).unwrap();
        assert_eq!(result.gpa, 0.0);
        assert_eq!(result.total_credits, 0.0);
    }

    #[test]
    fn test_ungraded_courses_are_skipped() {
        let courses = vec![
            graded("T1", 4.0, "B"),
            Course::new("T2", "Planned", 3.0),
            graded("T3", 2.0, "F"),
        ];
        let result = compute_gpa(&courses).unwrap();
        assert_eq!(result.total_credits, 6.0);
        assert_eq!(result.total_points, 12.0);
        assert_eq!(result.gpa, 2.0);
    }

    #[test]
    fn test_ungraded_course_with_bad_credits_is_not_checked() {
        let courses = vec![graded("T1", 3.0, "A"), Course::new("T2", "Planned", 0.0)];
        assert!(compute_gpa(&courses).is_ok());
    }

    #[test]
    fn test_duplicate_codes() {
        let err = compute_gpa(&[graded("DUP", 3.0, "A"), graded("DUP", 3.0, "B")]).unwrap_err();
        assert_eq!(
            err,
            GradingError::DuplicateCourse {
                code: "DUP".to_string()
            }
        );
    }

    #[test]
    fn test_duplicates_are_detected_after_normalization() {
        let mut first = graded("T1", 3.0, "A");
        first.code = " t1 ".to_string();
        let err = compute_gpa(&[first, graded("T1", 3.0, "B")]).unwrap_err();
        assert!(matches!(err, GradingError::DuplicateCourse { code } if code == "T1"));
    }

    #[test]
    fn test_duplicate_ungraded_courses_still_rejected() {
        let courses = vec![Course::new("P1", "Plan", 3.0), Course::new("P1", "Plan", 3.0)];
        assert!(matches!(
            compute_gpa(&courses),
            Err(GradingError::DuplicateCourse { .. })
        ));
    }

    #[test]
    fn test_credit_hour_boundaries() {
        assert!(compute_gpa(&[graded("T1", 10.0, "A")]).is_ok());
        assert!(matches!(
            compute_gpa(&[graded("T1", 10.0001, "A")]),
            Err(GradingError::InvalidCreditHours { .. })
        ));
        assert!(matches!(
            compute_gpa(&[graded("T1", 0.0, "A")]),
            Err(GradingError::InvalidCreditHours { .. })
        ));
        assert!(matches!(
            compute_gpa(&[graded("T1", -1.0, "A")]),
            Err(GradingError::InvalidCreditHours { .. })
        ));
    }

    #[test]
    fn test_invalid_grade_is_reported() {
        assert!(matches!(
            compute_gpa(&[graded("T1", 3.0, "Q")]),
            Err(GradingError::InvalidGrade { grade, .. }) if grade == "Q"
        ));
    }

    #[test]
    fn test_total_credits_counts_graded_only_and_is_idempotent() {
        let courses = vec![
            graded("A1", 2.5, "C"),
            graded("A2", 3.5, "E"),
            Course::new("A3", "Planned", 4.0),
            graded("A4", 1.0, "A"),
        ];
        let first = compute_gpa(&courses).unwrap();
        let second = compute_gpa(&courses).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total_credits, 7.0);
    }

    #[test]
    fn test_cgpa_two_semesters() {
        let semesters = vec![
            SemesterRecord::new("S1", vec![graded("A", 3.0, "A")]),
            SemesterRecord::new("S2", vec![graded("B", 3.0, "B")]),
        ];
        let result = compute_cgpa(&semesters).unwrap();
        assert_eq!(result.cgpa, 3.5);
        assert_eq!(result.gpa_by_semester.len(), 2);
        assert_eq!(result.gpa_by_semester[0].gpa, 4.0);
        assert_eq!(result.gpa_by_semester[1].gpa, 3.0);
    }

    #[test]
    fn test_cgpa_is_credit_weighted() {
        // mean of semester GPAs would be 2.5
        let semesters = vec![
            SemesterRecord::new("S1", vec![graded("A", 1.0, "A")]),
            SemesterRecord::new("S2", vec![graded("B", 9.0, "D")]),
        ];
        let result = compute_cgpa(&semesters).unwrap();
        assert_eq!(result.cgpa, 1.3);
    }

    #[test]
    fn test_cgpa_allows_repeated_codes_across_semesters() {
        let semesters = vec![
            SemesterRecord::new("S1", vec![graded("MAT101", 3.0, "F")]),
            SemesterRecord::new("S2", vec![graded("MAT101", 3.0, "B")]),
        ];
        assert_eq!(compute_cgpa(&semesters).unwrap().cgpa, 1.5);
    }

    #[test]
    fn test_cgpa_error_names_semester() {
        let semesters = vec![
            SemesterRecord::new("S1", vec![graded("A", 3.0, "A")]),
            SemesterRecord::new("S2", vec![graded("B", 3.0, "B"), graded("B", 3.0, "C")]),
        ];
        let err = compute_cgpa(&semesters).unwrap_err();
        assert_eq!(err.term(), Some("S2"));
        assert!(matches!(err.root(), GradingError::DuplicateCourse { .. }));
    }

    #[test]
    fn test_cgpa_without_credits_is_zero() {
        let semesters = vec![SemesterRecord::new("S1", vec![Course::new("P", "Planned", 3.0)])];
        let result = compute_cgpa(&semesters).unwrap();
        assert_eq!(result.cgpa, 0.0);
        assert_eq!(result.gpa_by_semester[0].total_credits, 0.0);
    }
}
