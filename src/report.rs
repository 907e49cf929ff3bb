//! Rendering and exporting student reports.
//!
//! Two formats are supported: the flat text report card, with fixed field
//! labels, and a JSON array for scripting.

use std::{fmt::Write as _, fs, io, path::Path};

use serde::{Deserialize, Serialize};

use crate::domain::Student;

/// Separator printed after every student in the text report.
pub const SEPARATOR: &str = "-----------------------------------";

/// Supported export formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// The labelled plain-text report card.
    #[default]
    Text,
    /// A pretty-printed JSON array.
    Json,
}

/// Serializable view of a student.
#[derive(Debug, Serialize)]
struct StudentRecord<'a> {
    name: &'a str,
    roll: u32,
    marks: Vec<u32>,
    average: f64,
    grade: char,
    performance: &'a str,
}

impl<'a> From<&'a Student> for StudentRecord<'a> {
    fn from(student: &'a Student) -> Self {
        Self {
            name: student.name().as_str(),
            roll: student.roll(),
            marks: student.marks().iter().collect(),
            average: student.average(),
            grade: student.grade().letter(),
            performance: student.performance(),
        }
    }
}

/// Formats an average the way the report shows it.
///
/// Whole numbers keep one decimal place (`90.0`), anything else uses the
/// shortest exact representation (`60.2`).
#[must_use]
pub fn format_average(average: f64) -> String {
    format!("{average:?}")
}

/// Renders the plain-text report card.
#[must_use]
pub fn render_text(students: &[Student]) -> String {
    let mut out = String::from("===== STUDENT REPORT CARD =====\n");
    for (i, student) in students.iter().enumerate() {
        // writing to a String cannot fail
        let _ = writeln!(out, "Student {}", i + 1);
        let _ = writeln!(out, "Name       : {}", student.name());
        let _ = writeln!(out, "Roll Number: {}", student.roll());
        let _ = writeln!(out, "Average    : {}", format_average(student.average()));
        let _ = writeln!(out, "Grade      : {}", student.grade());
        let _ = writeln!(out, "Performance: {}", student.performance());
        let _ = writeln!(out, "{SEPARATOR}");
    }
    out
}

/// Renders the students as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(students: &[Student]) -> Result<String, serde_json::Error> {
    let records: Vec<StudentRecord> = students.iter().map(StudentRecord::from).collect();
    serde_json::to_string_pretty(&records)
}

/// Renders the students in the given format.
///
/// # Errors
///
/// Returns [`ExportError::Json`] if JSON serialization fails.
pub fn render(students: &[Student], format: ReportFormat) -> Result<String, ExportError> {
    match format {
        ReportFormat::Text => Ok(render_text(students)),
        ReportFormat::Json => Ok(render_json(students)?),
    }
}

/// Writes a report to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written.
#[tracing::instrument(level = "debug", skip(students))]
pub fn write_report(
    path: &Path,
    students: &[Student],
    format: ReportFormat,
) -> Result<(), ExportError> {
    let content = render(students, format)?;
    fs::write(path, content).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(count = students.len(), "Exported report to {}", path.display());
    Ok(())
}

/// Errors that can occur while exporting a report.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The report file could not be written.
    #[error("Error writing to file '{path}': {source}")]
    Io {
        /// The destination path.
        path: String,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
