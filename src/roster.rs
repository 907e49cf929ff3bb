//! An in-memory roster of students.
//!
//! The [`Roster`] owns its records and wraps the free functions in
//! [`crate::algorithms`], always passing its full populated length as the
//! logical count.

use std::{collections::BTreeMap, num::NonZeroUsize};

use crate::{
    algorithms,
    domain::{Config, Grade, Marks, RollNumber, Student},
};

/// An insertion-ordered collection of students.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    students: Vec<Student>,
    capacity: Option<NonZeroUsize>,
    unique_rolls: bool,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    /// Creates an empty, unbounded roster that rejects duplicate roll numbers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            students: Vec::new(),
            capacity: None,
            unique_rolls: true,
        }
    }

    /// Creates an empty roster that holds at most `capacity` students.
    #[must_use]
    pub fn with_capacity_limit(capacity: NonZeroUsize) -> Self {
        Self {
            students: Vec::with_capacity(capacity.get()),
            capacity: Some(capacity),
            unique_rolls: true,
        }
    }

    /// Creates an empty roster bounded and checked according to `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut roster = config
            .capacity()
            .map_or_else(Self::new, Self::with_capacity_limit);
        roster.unique_rolls = config.enforce_unique_rolls;
        roster
    }

    /// Adds a student to the end of the roster.
    ///
    /// # Errors
    ///
    /// This method can fail if:
    ///
    /// - the roster is bounded and already full
    /// - roll numbers are unique and a student with the same roll is present
    ///
    /// The roster is unchanged on failure.
    pub fn add(&mut self, student: Student) -> Result<&Student, RosterError> {
        if let Some(capacity) = self.capacity {
            if self.students.len() >= capacity.get() {
                tracing::warn!(
                    capacity = capacity.get(),
                    "Roster is full, rejecting {}",
                    student.roll()
                );
                return Err(RosterError::CapacityExceeded { capacity });
            }
        }

        if self.unique_rolls && self.contains(student.roll()) {
            tracing::warn!("Duplicate roll number {}", student.roll());
            return Err(RosterError::DuplicateRoll(student.roll()));
        }

        tracing::debug!(
            roll = student.roll(),
            average = student.average(),
            "Adding student {}",
            student.name()
        );
        self.students.push(student);
        Ok(&self.students[self.students.len() - 1])
    }

    /// Replaces the marks of the student with the given roll number.
    ///
    /// If roll numbers are not unique, the first match in the current order is
    /// updated.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] if no student has that roll number.
    pub fn update_marks(
        &mut self,
        roll: RollNumber,
        marks: Marks,
    ) -> Result<&Student, RosterError> {
        let student = self
            .students
            .iter_mut()
            .find(|s| s.roll() == roll)
            .ok_or(RosterError::NotFound(roll))?;

        student.update_marks(marks);
        tracing::debug!(roll, average = student.average(), "Updated marks");
        Ok(&*student)
    }

    /// Whether a student with this roll number is present.
    #[must_use]
    pub fn contains(&self, roll: RollNumber) -> bool {
        self.find_linear(roll).is_some()
    }

    /// Orders the roster from highest to lowest average.
    pub fn sort_by_average(&mut self) {
        let count = self.students.len();
        algorithms::sort_by_average_descending(&mut self.students, count);
        tracing::debug!(count, "Sorted roster by average");
    }

    /// Orders the roster by roll number, lowest first.
    pub fn sort_by_roll(&mut self) {
        let count = self.students.len();
        algorithms::sort_by_roll_ascending(&mut self.students, count);
        tracing::debug!(count, "Sorted roster by roll number");
    }

    /// Finds a student by scanning the roster in its current order.
    #[must_use]
    pub fn find_linear(&self, roll: RollNumber) -> Option<&Student> {
        algorithms::linear_search(&self.students, self.students.len(), roll)
    }

    /// Sorts the roster by roll number, then finds a student by binary search.
    ///
    /// The roster stays sorted by roll number afterwards.
    pub fn find_binary(&mut self, roll: RollNumber) -> Option<&Student> {
        self.sort_by_roll();
        algorithms::binary_search(&self.students, self.students.len(), roll)
    }

    /// The students in their current order.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Number of students in the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the roster holds no students.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Whether the roster is bounded and full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.students.len() >= capacity.get())
    }

    /// The maximum number of students, if bounded.
    #[must_use]
    pub const fn capacity_limit(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    /// Whether duplicate roll numbers are rejected by [`Roster::add`].
    #[must_use]
    pub const fn enforces_unique_rolls(&self) -> bool {
        self.unique_rolls
    }

    /// Removes every student.
    pub fn clear(&mut self) {
        tracing::debug!(count = self.students.len(), "Clearing roster");
        self.students.clear();
    }

    /// Class-wide statistics, or `None` for an empty roster.
    #[must_use]
    pub fn summary(&self) -> Option<Summary<'_>> {
        let first = self.students.first()?;

        let mut highest = first;
        let mut lowest = first;
        let mut total = 0.0;
        let mut distribution: BTreeMap<Grade, usize> =
            Grade::ALL.into_iter().map(|grade| (grade, 0)).collect();

        for student in &self.students {
            if student.average() > highest.average() {
                highest = student;
            }
            if student.average() < lowest.average() {
                lowest = student;
            }
            total += student.average();
            *distribution.entry(student.grade()).or_default() += 1;
        }

        #[allow(clippy::cast_precision_loss)]
        let class_average = total / self.students.len() as f64;

        Some(Summary {
            count: self.students.len(),
            class_average,
            highest,
            lowest,
            distribution,
        })
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Student;
    type IntoIter = std::slice::Iter<'a, Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.students.iter()
    }
}

/// Class-wide statistics over a non-empty roster.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary<'a> {
    /// Number of students.
    pub count: usize,
    /// Mean of all student averages.
    pub class_average: f64,
    /// The first student with the highest average.
    pub highest: &'a Student,
    /// The first student with the lowest average.
    pub lowest: &'a Student,
    /// Number of students holding each grade, including grades nobody holds.
    pub distribution: BTreeMap<Grade, usize>,
}

/// Errors returned by roster mutations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum RosterError {
    /// A student with this roll number is already present.
    #[error("A student with roll number {0} already exists")]
    DuplicateRoll(RollNumber),

    /// The roster is bounded and full.
    #[error("The roster is full (capacity {capacity})")]
    CapacityExceeded {
        /// The configured capacity.
        capacity: NonZeroUsize,
    },

    /// No student has this roll number.
    #[error("No student found with roll number {0}")]
    NotFound(RollNumber),
}
