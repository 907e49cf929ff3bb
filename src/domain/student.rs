//! The student record and the rules for its derived fields.

use crate::domain::{
    grade::Grade,
    marks::{InvalidMarksError, Marks},
    name::{InvalidNameError, StudentName},
};

/// A student's roll number.
///
/// Expected to be unique within a roster; see
/// [`Roster::add`](crate::Roster::add).
pub type RollNumber = u32;

/// A single student record.
///
/// The average, grade and performance label are derived from the marks at
/// construction and on every [`Student::update_marks`]. They cannot be set
/// independently, so they are never stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    name: StudentName,
    roll: RollNumber,
    marks: Marks,
    evaluation: Evaluation,
}

/// Fields derived from a set of marks, computed in dependency order.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Evaluation {
    average: f64,
    grade: Grade,
    performance: &'static str,
}

impl Evaluation {
    fn of(marks: &Marks) -> Self {
        let average = marks.average();
        let grade = Grade::from_average(average);
        let performance = grade.performance();
        Self {
            average,
            grade,
            performance,
        }
    }
}

impl Student {
    /// Creates a student from pre-validated parts.
    #[must_use]
    pub fn new(name: StudentName, roll: RollNumber, marks: Marks) -> Self {
        let evaluation = Evaluation::of(&marks);
        Self {
            name,
            roll,
            marks,
            evaluation,
        }
    }

    /// Creates a student from raw primitives, validating each of them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Name`] if the name is not letters and spaces, or
    /// [`Error::Marks`] if there are not exactly five marks in `0..=100`.
    pub fn try_new(name: &str, roll: RollNumber, marks: &[u32]) -> Result<Self, Error> {
        let name = StudentName::new(name)?;
        let marks = Marks::try_from(marks)?;
        Ok(Self::new(name, roll, marks))
    }

    /// Replaces the marks and re-derives average, grade and performance.
    pub fn update_marks(&mut self, marks: Marks) {
        self.marks = marks;
        self.evaluation = Evaluation::of(&self.marks);
    }

    /// Validates raw marks and applies them.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMarksError`] if the marks are rejected, in which case
    /// the student is left unchanged.
    pub fn try_update_marks(&mut self, marks: &[u32]) -> Result<(), InvalidMarksError> {
        let marks = Marks::try_from(marks)?;
        self.update_marks(marks);
        Ok(())
    }

    /// The student's name.
    #[must_use]
    pub const fn name(&self) -> &StudentName {
        &self.name
    }

    /// The student's roll number.
    #[must_use]
    pub const fn roll(&self) -> RollNumber {
        self.roll
    }

    /// The student's current marks.
    #[must_use]
    pub const fn marks(&self) -> &Marks {
        &self.marks
    }

    /// Mean of the current marks.
    #[must_use]
    pub const fn average(&self) -> f64 {
        self.evaluation.average
    }

    /// Letter grade for the current average.
    #[must_use]
    pub const fn grade(&self) -> Grade {
        self.evaluation.grade
    }

    /// Performance label for the current grade.
    #[must_use]
    pub const fn performance(&self) -> &'static str {
        self.evaluation.performance
    }
}

/// Errors that can occur when building a student from raw input.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// The name was rejected.
    #[error(transparent)]
    Name(#[from] InvalidNameError),

    /// The marks were rejected.
    #[error(transparent)]
    Marks(#[from] InvalidMarksError),
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn student(marks: [u32; 5]) -> Student {
        Student::new(
            StudentName::new("Test Student").unwrap(),
            1,
            Marks::new(marks).unwrap(),
        )
    }

    #[test]
    fn uniform_nineties_are_excellent() {
        let s = student([90, 90, 90, 90, 90]);
        assert!((s.average() - 90.0).abs() < f64::EPSILON);
        assert_eq!(s.grade(), Grade::A);
        assert_eq!(s.performance(), "Excellent");
    }

    #[test]
    fn mixed_marks_average_sixty() {
        let s = student([50, 60, 70, 55, 65]);
        assert!((s.average() - 60.0).abs() < f64::EPSILON);
        assert_eq!(s.grade(), Grade::D);
        assert_eq!(s.performance(), "Below Average");
    }

    #[test_case([80, 80, 80, 80, 80], Grade::B, "Good")]
    #[test_case([70, 70, 70, 70, 70], Grade::C, "Average")]
    #[test_case([59, 60, 60, 60, 60], Grade::F, "Poor"; "just under sixty")]
    #[test_case([89, 90, 90, 90, 90], Grade::B, "Good"; "just under ninety")]
    fn derived_fields_follow_scale(marks: [u32; 5], grade: Grade, performance: &str) {
        let s = student(marks);
        assert_eq!(s.grade(), grade);
        assert_eq!(s.performance(), performance);
    }

    #[test]
    fn update_marks_rederives_everything() {
        let mut s = student([90, 90, 90, 90, 90]);
        let new_marks = Marks::new([50, 60, 70, 55, 65]).unwrap();

        s.update_marks(new_marks);

        let fresh = student([50, 60, 70, 55, 65]);
        assert_eq!(s.marks(), &new_marks);
        assert!((s.average() - fresh.average()).abs() < f64::EPSILON);
        assert_eq!(s.grade(), fresh.grade());
        assert_eq!(s.performance(), fresh.performance());
    }

    #[test]
    fn update_keeps_identity() {
        let mut s = student([10, 20, 30, 40, 50]);
        s.try_update_marks(&[100, 100, 100, 100, 100]).unwrap();
        assert_eq!(s.name().as_str(), "Test Student");
        assert_eq!(s.roll(), 1);
        assert_eq!(s.grade(), Grade::A);
    }

    #[test]
    fn rejected_update_leaves_student_unchanged() {
        let mut s = student([90, 90, 90, 90, 90]);
        let before = s.clone();

        let result = s.try_update_marks(&[90, 90, 90, 90, 101]);

        assert!(matches!(result, Err(InvalidMarksError::OutOfRange { .. })));
        assert_eq!(s, before);

        let result = s.try_update_marks(&[90, 90]);
        assert_eq!(result, Err(InvalidMarksError::Length(2)));
        assert_eq!(s, before);
    }

    #[test]
    fn try_new_validates_inputs() {
        let s = Student::try_new("Ada Lovelace", 7, &[100, 95, 90, 85, 80]).unwrap();
        assert_eq!(s.roll(), 7);
        assert!((s.average() - 90.0).abs() < f64::EPSILON);

        assert!(matches!(
            Student::try_new("Ada99", 7, &[100, 95, 90, 85, 80]),
            Err(Error::Name(_))
        ));
        assert!(matches!(
            Student::try_new("Ada", 7, &[100, 95, 90, 85]),
            Err(Error::Marks(InvalidMarksError::Length(4)))
        ));
    }
}
