use super::ExportError;
use crate::grading::{format_points, SemesterRecord};

const HEADER: [&str; 6] = ["Term", "Code", "Name", "Credits", "Grade", "Category"];

/// Flattens semester history into CSV, one row per course.
pub fn transcript_csv(semesters: &[SemesterRecord]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for semester in semesters {
        for course in &semester.courses {
            let credits = format_points(course.credit_hours);
            writer.write_record([
                semester.term.as_str(),
                course.code.as_str(),
                course.name.as_str(),
                credits.as_str(),
                course.grade.as_deref().unwrap_or(""),
                course.category.as_deref().unwrap_or(""),
            ])?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}
