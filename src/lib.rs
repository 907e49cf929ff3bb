//! Student Report System
//!
//! An in-memory roster of student records, each with derived average, grade
//! and performance, plus sorting, searching and report export over it.

pub mod domain;
pub use domain::{
    Config, Grade, InvalidMarksError, InvalidNameError, Marks, RollNumber, Student, StudentError,
    StudentName,
};

/// Sorting and searching over student sequences.
pub mod algorithms;

/// The owning roster of students.
pub mod roster;
pub use roster::{Roster, RosterError, Summary};

/// Report rendering and file export.
pub mod report;
pub use report::{ExportError, ReportFormat};
