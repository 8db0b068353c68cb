//! Fixed grade and classification tables.

use super::error::GradingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter grade -> grade points.
pub const GRADE_POINTS: [(Grade, f64); 6] = [
    (Grade::A, 4.0),
    (Grade::B, 3.0),
    (Grade::C, 2.0),
    (Grade::D, 1.0),
    (Grade::E, 0.5),
    (Grade::F, 0.0),
];

/// Classification label -> minimum CGPA, ordered by descending threshold.
pub const HONORS_BANDS: [(&str, f64); 4] = [
    ("First Class Honors", 3.70),
    ("Second Class Upper", 3.30),
    ("Second Class Lower", 2.70),
    ("Pass", 2.00),
];

/// Label returned when no band threshold is met.
pub const FAIL_LABEL: &str = "Fail";

/// Highest achievable grade point average.
pub const MAX_GRADE_POINTS: f64 = 4.0;

/// A letter grade from the closed set A-F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    /// Grade points awarded per credit hour.
    pub fn points(self) -> f64 {
        // GRADE_POINTS is ordered by variant
        GRADE_POINTS[self as usize].1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = GradingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letter = s.trim().to_uppercase();
        GRADE_POINTS
            .iter()
            .map(|(grade, _)| *grade)
            .find(|grade| grade.as_str() == letter)
            .ok_or_else(|| GradingError::InvalidGrade {
                grade: s.to_string(),
                allowed: allowed_grades(),
            })
    }
}

/// Looks up grade points for an optional grade letter.
///
/// A missing grade means the course is not yet gradable and yields `None`;
/// only a letter outside the table is an error.
pub fn grade_to_points(grade: Option<&str>) -> Result<Option<f64>, GradingError> {
    grade
        .map(|letter| letter.parse::<Grade>().map(Grade::points))
        .transpose()
}

/// Returns the minimum CGPA of a classification band.
pub fn band_threshold(label: &str) -> Result<f64, GradingError> {
    HONORS_BANDS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, threshold)| *threshold)
        .ok_or_else(|| GradingError::UnknownTargetClass {
            label: label.to_string(),
            allowed: band_labels().join(", "),
        })
}

/// Band labels in descending threshold order.
pub fn band_labels() -> Vec<&'static str> {
    HONORS_BANDS.iter().map(|(name, _)| *name).collect()
}

fn allowed_grades() -> String {
    GRADE_POINTS
        .iter()
        .map(|(grade, _)| grade.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
