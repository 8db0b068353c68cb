/// Types for course records and computed results
use super::error::GradingError;
use super::table::{band_threshold, Grade};
use serde::{Deserialize, Deserializer, Serialize};

pub const MAX_CREDIT_HOURS: f64 = 10.0;

/// One academic unit instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(deserialize_with = "deserialize_code")]
    pub code: String,
    pub name: String,
    pub credit_hours: f64,
    /// Missing when the course is planned or in progress
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub semester: Option<u32>,
    /// Free-text tag, e.g. "math", "programming"
    #[serde(default)]
    pub category: Option<String>,
}

impl Course {
    pub fn new(code: &str, name: &str, credit_hours: f64) -> Self {
        Self {
            code: normalize_code(code),
            name: name.to_string(),
            credit_hours,
            grade: None,
            semester: None,
            category: None,
        }
    }

    pub fn with_grade(mut self, grade: &str) -> Self {
        self.grade = Some(grade.to_string());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_semester(mut self, semester: u32) -> Self {
        self.semester = Some(semester);
        self
    }

    /// Course code trimmed and uppercased.
    pub fn normalized_code(&self) -> String {
        normalize_code(&self.code)
    }

    pub fn is_graded(&self) -> bool {
        self.grade.is_some()
    }

    /// Parses the grade letter, if one is set.
    pub fn parsed_grade(&self) -> Result<Option<Grade>, GradingError> {
        self.grade.as_deref().map(str::parse::<Grade>).transpose()
    }

    /// Checks the field constraints of a course record.
    pub fn validate(&self) -> Result<(), GradingError> {
        let code = self.normalized_code();
        check_length("code", &code, 2, 16)?;
        check_length("name", &self.name, 2, 64)?;

        if !(self.credit_hours > 0.0 && self.credit_hours <= MAX_CREDIT_HOURS) {
            return Err(GradingError::InvalidCreditHours {
                code,
                credit_hours: self.credit_hours,
            });
        }

        if let Some(semester) = self.semester {
            if !(1..=12).contains(&semester) {
                return Err(GradingError::InvalidField {
                    field: "semester",
                    reason: format!("{semester} is outside 1-12"),
                });
            }
        }

        self.parsed_grade()?;
        Ok(())
    }
}

/// A term label plus its ordered courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterRecord {
    /// e.g. "Y2S1" or "2024-1"
    pub term: String,
    pub courses: Vec<Course>,
}

impl SemesterRecord {
    pub fn new(term: &str, courses: Vec<Course>) -> Self {
        Self {
            term: term.to_string(),
            courses,
        }
    }

    pub fn validate(&self) -> Result<(), GradingError> {
        if self.term.trim().is_empty() {
            return Err(GradingError::InvalidField {
                field: "term",
                reason: "must not be empty".to_string(),
            });
        }

        self.courses
            .iter()
            .try_for_each(Course::validate)
            .map_err(|e| GradingError::in_semester(&self.term, e))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub program: String,
    /// One of the classification band labels
    #[serde(default)]
    pub target_class: Option<String>,
}

impl UserProfile {
    pub fn validate(&self) -> Result<(), GradingError> {
        if self.user_id.trim().is_empty() {
            return Err(GradingError::InvalidField {
                field: "user_id",
                reason: "must not be empty".to_string(),
            });
        }

        if let Some(ref target) = self.target_class {
            band_threshold(target)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpaResult {
    pub gpa: f64,
    pub total_points: f64,
    pub total_credits: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CgpaResult {
    pub cgpa: f64,
    pub gpa_by_semester: Vec<GpaResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub target_class: String,
    pub target_cgpa: f64,
    pub needed_avg_gpa: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdviceResult {
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk_courses: Vec<String>,
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_code(&raw))
}

fn check_length(field: &'static str, value: &str, min: usize, max: usize) -> Result<(), GradingError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(GradingError::InvalidField {
            field,
            reason: format!("length {len} is outside {min}-{max}"),
        });
    }
    Ok(())
}
