/// Heuristic study advice built on top of the grading engines
use super::config::PlannerConfig;
use super::error::GradingError;
use super::gpa::compute_cgpa;
use super::projection::project_needed_average;
use super::types::{AdviceResult, Course, SemesterRecord, UserProfile};

/// Semester-over-semester GPA change that counts as a trend.
const TREND_DELTA: f64 = 0.2;

/// Grade points below this mark a course as at risk.
const RISK_POINTS: f64 = 2.0;

/// Category mean below this is reported as a weakness.
const WEAK_CATEGORY_MEAN: f64 = 2.3;

/// At most this many risk courses are named in the leading recommendation.
const MAX_NAMED_RISK_COURSES: usize = 5;

const STUDY_RECOMMENDATIONS: [&str; 4] = [
    "Adopt spaced repetition for theory-heavy units (25-30 minute intervals).",
    "Schedule weekly review blocks and use past papers for targeted practice.",
    "Form a small study group for challenging categories to explain concepts out loud.",
    "Meet course lecturers/TAs early for feedback on weak areas.",
];

/// Produces trend insights, weak-area flags and recommendations
pub struct StudyAdvisor {
    config: PlannerConfig,
}

impl StudyAdvisor {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Generates advice for a student from their semester history.
    ///
    /// # Arguments
    /// * `profile` - Student profile; its target class drives the projection
    /// * `semesters` - Semester history in chronological order
    ///
    /// # Returns
    /// * `Ok(AdviceResult)` - Insights, recommendations and at-risk courses
    /// * `Err` - If any semester fails GPA validation, or the target is unknown
    pub fn generate_advice(
        &self,
        profile: &UserProfile,
        semesters: &[SemesterRecord],
    ) -> Result<AdviceResult, GradingError> {
        let mut insights = Vec::new();

        let cgpa_info = compute_cgpa(semesters)?;
        let semester_gpas: Vec<f64> = cgpa_info
            .gpa_by_semester
            .iter()
            .filter(|r| r.total_credits > 0.0)
            .map(|r| r.gpa)
            .collect();

        if let [.., previous, latest] = semester_gpas[..] {
            if latest < previous - TREND_DELTA {
                insights.push(
                    "Recent semester GPA dropped significantly. Consider workload balance and support resources."
                        .to_string(),
                );
            } else if latest > previous + TREND_DELTA {
                insights.push(
                    "Great improvement in the latest semester. Keep leveraging what worked."
                        .to_string(),
                );
            }
        }

        let graded: Vec<&Course> = semesters
            .iter()
            .flat_map(|s| &s.courses)
            .filter(|c| c.is_graded())
            .collect();

        let mut risk_courses = Vec::new();
        let mut category_scores: Vec<(String, Vec<f64>)> = Vec::new();

        for course in &graded {
            let Some(grade) = course.parsed_grade()? else {
                continue;
            };
            let points = grade.points();

            if points < RISK_POINTS {
                risk_courses.push(format!("{} ({})", course.normalized_code(), grade));
            }

            let key = match course.category.as_deref().map(str::trim) {
                Some(category) if !category.is_empty() => category.to_lowercase(),
                _ => continue,
            };
            match category_scores.iter_mut().find(|(name, _)| *name == key) {
                Some((_, scores)) => scores.push(points),
                None => category_scores.push((key, vec![points])),
            }
        }

        for (category, scores) in &category_scores {
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            if mean < WEAK_CATEGORY_MEAN {
                insights.push(format!(
                    "Performance is weaker in {category}-related units. Prioritize foundational practice and clinics."
                ));
            }
        }

        let target = profile
            .target_class
            .as_deref()
            .unwrap_or(self.config.default_target_class.as_str());
        let completed_credits: f64 = graded.iter().map(|c| c.credit_hours).sum();
        let remaining_estimate = (self.config.nominal_credits - completed_credits).max(0.0);

        let completed: Vec<Course> = graded.iter().map(|c| (*c).clone()).collect();
        let projection = project_needed_average(&completed, remaining_estimate, target)?;
        insights.push(projection.message);

        let mut recommendations = Vec::with_capacity(STUDY_RECOMMENDATIONS.len() + 1);
        if !risk_courses.is_empty() {
            let named = risk_courses
                .iter()
                .take(MAX_NAMED_RISK_COURSES)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            let ellipsis = if risk_courses.len() > MAX_NAMED_RISK_COURSES {
                "..."
            } else {
                ""
            };
            recommendations.push(format!(
                "Focus on re-assessment of weak units: {named}{ellipsis}"
            ));
        }
        recommendations.extend(STUDY_RECOMMENDATIONS.iter().map(|r| r.to_string()));

        Ok(AdviceResult {
            insights,
            recommendations,
            risk_courses,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}

impl Default for StudyAdvisor {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::format_points;

    fn profile(target: Option<&str>) -> UserProfile {
        UserProfile {
            user_id: "u1".to_string(),
            name: "User".to_string(),
            program: "SE".to_string(),
            target_class: target.map(str::to_string),
        }
    }

    fn graded(code: &str, credits: f64, grade: &str) -> Course {
        Course::new(code, code, credits).with_grade(grade)
    }

    fn semester(term: &str, courses: Vec<Course>) -> SemesterRecord {
        SemesterRecord::new(term, courses)
    }

    #[test]
    fn test_declining_trend() {
        let semesters = vec![
            semester("S1", vec![graded("A1", 3.0, "A")]),
            semester("S2", vec![graded("B1", 3.0, "B")]),
        ];
        let advice = StudyAdvisor::default()
            .generate_advice(&profile(None), &semesters)
            .unwrap();
        assert!(advice.insights[0].starts_with("Recent semester GPA dropped"));
        assert!(!advice.insights.iter().any(|i| i.starts_with("Great improvement")));
    }

    #[test]
    fn test_improving_trend_uses_last_two_graded_semesters() {
        let semesters = vec![
            semester("S1", vec![graded("A1", 3.0, "C")]),
            semester("S2", vec![Course::new("P1", "Planned", 3.0)]),
            semester("S3", vec![graded("B1", 3.0, "A")]),
        ];
        let advice = StudyAdvisor::default()
            .generate_advice(&profile(None), &semesters)
            .unwrap();
        assert!(advice.insights[0].starts_with("Great improvement"));
    }

    #[test]
    fn test_small_change_is_not_a_trend() {
        let semesters = vec![
            semester("S1", vec![graded("A1", 5.0, "B"), graded("A2", 1.0, "A")]),
            semester("S2", vec![graded("B1", 3.0, "B")]),
        ];
        let advice = StudyAdvisor::default()
            .generate_advice(&profile(None), &semesters)
            .unwrap();
        assert_eq!(advice.insights.len(), 1);
        assert!(advice.insights[0].starts_with("You need an average GPA of"));
    }

    #[test]
    fn test_weak_category_is_case_insensitive() {
        let semesters = vec![semester(
            "S1",
            vec![
                graded("M1", 3.0, "C").with_category("Math"),
                graded("M2", 3.0, "D").with_category(" math "),
                graded("P1", 3.0, "A").with_category("programming"),
            ],
        )];
        let advice = StudyAdvisor::default()
            .generate_advice(&profile(None), &semesters)
            .unwrap();
        let weak: Vec<_> = advice
            .insights
            .iter()
            .filter(|i| i.starts_with("Performance is weaker"))
            .collect();
        assert_eq!(weak.len(), 1);
        assert!(weak[0].contains("math-related units"));
    }

    #[test]
    fn test_blank_category_is_ignored() {
        let semesters = vec![semester(
            "S1",
            vec![
                graded("F1", 3.0, "F").with_category("  "),
                graded("F2", 3.0, "F").with_category(""),
            ],
        )];
        let advice = StudyAdvisor::default()
            .generate_advice(&profile(None), &semesters)
            .unwrap();
        assert!(!advice
            .insights
            .iter()
            .any(|i| i.starts_with("Performance is weaker")));
        assert_eq!(advice.risk_courses, vec!["F1 (F)", "F2 (F)"]);
    }

    #[test]
    fn test_risk_courses_and_recommendations() {
        let semesters = vec![semester(
            "S1",
            vec![
                graded("R1", 3.0, "D"),
                graded("R2", 3.0, "e"),
                graded("R3", 3.0, "F"),
                graded("OK", 3.0, "C"),
            ],
        )];
        let advice = StudyAdvisor::default()
            .generate_advice(&profile(None), &semesters)
            .unwrap();

        assert_eq!(advice.risk_courses, vec!["R1 (D)", "R2 (E)", "R3 (F)"]);
        assert_eq!(advice.recommendations.len(), 5);
        assert_eq!(
            advice.recommendations[0],
            "Focus on re-assessment of weak units: R1 (D), R2 (E), R3 (F)"
        );
        assert_eq!(advice.recommendations[1..], STUDY_RECOMMENDATIONS);
    }

    #[test]
    fn test_risk_list_is_truncated_after_five() {
        let courses = (1..=7).map(|i| graded(&format!("F{i}"), 2.0, "F")).collect();
        let advice = StudyAdvisor::default()
            .generate_advice(&profile(None), &[semester("S1", courses)])
            .unwrap();

        assert_eq!(advice.risk_courses.len(), 7);
        assert_eq!(
            advice.recommendations[0],
            "Focus on re-assessment of weak units: F1 (F), F2 (F), F3 (F), F4 (F), F5 (F)..."
        );
    }

    #[test]
    fn test_no_risk_courses_gives_only_fixed_recommendations() {
        let advice = StudyAdvisor::default()
            .generate_advice(&profile(None), &[semester("S1", vec![graded("A1", 3.0, "A")])])
            .unwrap();
        assert!(advice.risk_courses.is_empty());
        assert_eq!(advice.recommendations, STUDY_RECOMMENDATIONS);
    }

    #[test]
    fn test_projection_uses_nominal_credit_load() {
        // 3 credits done at 4.0, 177 remaining, target 3.30
        let advice = StudyAdvisor::default()
            .generate_advice(&profile(None), &[semester("S1", vec![graded("A1", 3.0, "A")])])
            .unwrap();
        let expected = (3.30 * 180.0 - 12.0) / 177.0;
        let expected = format_points((expected * 1000.0_f64).round() / 1000.0);
        assert_eq!(
            advice.insights.last().unwrap(),
            &format!(
                "You need an average GPA of {expected} across the remaining credits to achieve Second Class Upper."
            )
        );
    }

    #[test]
    fn test_profile_target_and_configured_defaults() {
        let advisor = StudyAdvisor::new(PlannerConfig {
            nominal_credits: 3.0,
            default_target_class: "Pass".to_string(),
        });
        let semesters = vec![semester("S1", vec![graded("A1", 3.0, "A")])];

        let advice = advisor.generate_advice(&profile(None), &semesters).unwrap();
        assert!(advice.insights.last().unwrap().contains("already determined"));

        let advice = advisor
            .generate_advice(&profile(Some("Unknown Class")), &semesters)
            .err();
        assert!(matches!(advice, Some(GradingError::UnknownTargetClass { .. })));
    }

    #[test]
    fn test_retaken_course_fails_projection() {
        let semesters = vec![
            semester("S1", vec![graded("MAT101", 3.0, "F")]),
            semester("S2", vec![graded("MAT101", 3.0, "B")]),
        ];
        let err = StudyAdvisor::default()
            .generate_advice(&profile(None), &semesters)
            .unwrap_err();
        assert!(matches!(err, GradingError::DuplicateCourse { code } if code == "MAT101"));
    }
}
