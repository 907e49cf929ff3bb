//! Domain models for student records.
//!
//! This module contains the core domain types: validated names and marks,
//! the grading scale, the student record itself, and configuration.

/// Student record and derived-field computation.
pub mod student;
pub use student::{Error as StudentError, RollNumber, Student};

mod config;
pub use config::Config;

/// The fixed grading scale.
pub mod grade;
pub use grade::Grade;

/// Validated subject marks.
pub mod marks;
pub use marks::{InvalidMarksError, Marks};

/// Validated student names.
pub mod name;
pub use name::{InvalidNameError, StudentName};
