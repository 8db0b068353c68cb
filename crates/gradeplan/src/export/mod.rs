//! Presentation of semester history: CSV transcripts and printable reports.
mod report;
mod transcript;

pub use report::{build_report, REPORT_PAGE_LINES};
pub use transcript::transcript_csv;

use crate::grading::GradingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Grading(#[from] GradingError),
}
