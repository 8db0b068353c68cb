use std::fmt::Write;

use crate::grading::{classify_honors, compute_cgpa, format_points, GradingError, SemesterRecord};

/// Lines per printed page, footer included.
pub const REPORT_PAGE_LINES: usize = 50;

/// Renders a printable GPA report, paginated with form feeds.
pub fn build_report(semesters: &[SemesterRecord]) -> Result<String, GradingError> {
    let cgpa = compute_cgpa(semesters)?;

    let mut lines = vec![
        "GPA Report".to_string(),
        String::new(),
        format!("CGPA: {}", format_points(cgpa.cgpa)),
        format!("Classification: {}", classify_honors(cgpa.cgpa)),
        String::new(),
        "Courses".to_string(),
    ];

    for semester in semesters {
        lines.push(format!("Term: {}", semester.term));
        for course in &semester.courses {
            let grade = course
                .grade
                .as_deref()
                .map(|g| g.trim().to_uppercase())
                .unwrap_or_else(|| "-".to_string());
            lines.push(format!(
                " - {} {} | {} CH | Grade: {}",
                course.code,
                course.name,
                format_points(course.credit_hours),
                grade
            ));
        }
    }

    Ok(paginate(&lines))
}

fn paginate(lines: &[String]) -> String {
    // blank line + footer
    let body_lines = REPORT_PAGE_LINES - 2;
    let pages: Vec<&[String]> = lines.chunks(body_lines).collect();
    let total = pages.len();

    let mut output = String::new();
    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            output.push('\u{c}');
        }
        for line in page.iter() {
            let _ = writeln!(output, "{}", line);
        }
        let _ = writeln!(output);
        let _ = writeln!(output, "Page {} of {}", index + 1, total);
    }

    output
}
