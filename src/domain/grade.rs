use std::fmt;

/// Letter grade assigned from a student's average.
///
/// Ordered from best to worst, so `Grade::A < Grade::F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    /// Average of 90 or above.
    A,
    /// Average from 80 up to (not including) 90.
    B,
    /// Average from 70 up to (not including) 80.
    C,
    /// Average from 60 up to (not including) 70.
    D,
    /// Average below 60.
    F,
}

impl Grade {
    /// Every grade, best first.
    pub const ALL: [Self; 5] = [Self::A, Self::B, Self::C, Self::D, Self::F];

    /// Maps an average onto the fixed grading scale.
    ///
    /// Lower bounds are inclusive: an average of exactly `80.0` is a `B`.
    #[must_use]
    pub fn from_average(average: f64) -> Self {
        if average >= 90.0 {
            Self::A
        } else if average >= 80.0 {
            Self::B
        } else if average >= 70.0 {
            Self::C
        } else if average >= 60.0 {
            Self::D
        } else {
            Self::F
        }
    }

    /// The single-character letter for this grade.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::F => 'F',
        }
    }

    /// Performance label that goes with this grade.
    #[must_use]
    pub const fn performance(self) -> &'static str {
        match self {
            Self::A => "Excellent",
            Self::B => "Good",
            Self::C => "Average",
            Self::D => "Below Average",
            Self::F => "Poor",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
