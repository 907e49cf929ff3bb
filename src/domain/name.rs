use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// A validated student name.
///
/// Names contain only ASCII letters and spaces (`[a-zA-Z ]+`) and at least one
/// letter. Leading and trailing spaces are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StudentName(NonEmptyString);

impl StudentName {
    /// Creates a new `StudentName`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNameError`] if the name is blank or contains anything
    /// other than ASCII letters and spaces.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidNameError> {
        let s = s.into();
        let trimmed = s.trim();

        if !trimmed.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
            return Err(InvalidNameError(s));
        }

        let non_empty =
            NonEmptyString::new(trimmed.to_string()).map_err(|_| InvalidNameError(s.clone()))?;
        Ok(Self(non_empty))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for StudentName {
    type Error = InvalidNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for StudentName {
    type Error = InvalidNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for StudentName {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for StudentName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for StudentName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for StudentName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a name contains anything but letters and spaces.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
#[error("Invalid name '{0}': use letters and spaces only")]
pub struct InvalidNameError(String);
