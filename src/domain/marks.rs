use std::fmt;

/// Number of subjects every student is marked in.
pub const SUBJECTS: usize = 5;

/// Highest mark a single subject can receive.
pub const MAX_MARK: u32 = 100;

/// A validated set of subject marks.
///
/// Always holds exactly [`SUBJECTS`] marks, each in the range `0..=100`. The
/// only way to obtain a `Marks` is through one of the validating
/// constructors, so a value of this type can be trusted without re-checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marks([u8; SUBJECTS]);

impl Marks {
    /// Creates a new set of marks.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMarksError::OutOfRange`] if any mark exceeds
    /// [`MAX_MARK`].
    pub fn new(marks: [u32; SUBJECTS]) -> Result<Self, InvalidMarksError> {
        let mut validated = [0u8; SUBJECTS];
        for (index, (slot, &mark)) in validated.iter_mut().zip(marks.iter()).enumerate() {
            *slot = u8::try_from(mark)
                .ok()
                .filter(|&m| u32::from(m) <= MAX_MARK)
                .ok_or(InvalidMarksError::OutOfRange { index, mark })?;
        }
        Ok(Self(validated))
    }

    /// Sum of all marks.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().map(|&m| u32::from(m)).sum()
    }

    /// Real-valued mean of the marks.
    ///
    /// This is never integer division: `[50, 60, 70, 55, 66]` averages to
    /// `60.2`.
    #[must_use]
    pub fn average(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let subjects = SUBJECTS as f64;
        f64::from(self.total()) / subjects
    }

    /// Iterates over the marks as `u32` in subject order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().map(|&m| u32::from(m))
    }
}

impl TryFrom<&[u32]> for Marks {
    type Error = InvalidMarksError;

    fn try_from(value: &[u32]) -> Result<Self, Self::Error> {
        let marks: [u32; SUBJECTS] = value
            .try_into()
            .map_err(|_| InvalidMarksError::Length(value.len()))?;
        Self::new(marks)
    }
}

impl TryFrom<Vec<u32>> for Marks {
    type Error = InvalidMarksError;

    fn try_from(value: Vec<u32>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl TryFrom<[u32; SUBJECTS]> for Marks {
    type Error = InvalidMarksError;

    fn try_from(value: [u32; SUBJECTS]) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Marks {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, mark) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{mark}")?;
        }
        Ok(())
    }
}

/// Error returned when a set of marks is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum InvalidMarksError {
    /// Wrong number of marks.
    #[error("Invalid marks: expected 5 marks, got {0}")]
    Length(usize),

    /// A mark outside `0..=100`.
    #[error("Invalid marks: subject {} has mark {mark}, expected 0 to 100", .index + 1)]
    OutOfRange {
        /// Zero-based subject index of the offending mark.
        index: usize,
        /// The rejected mark.
        mark: u32,
    },
}
