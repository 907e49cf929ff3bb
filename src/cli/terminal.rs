//! Colouring of session output and terminal width detection.

use std::sync::LazyLock;

use gradebook::Grade;
use owo_colors::{OwoColorize, colors::css};

/// Report cards switch from one line to a block below this width.
const NARROW_COLUMNS: u16 = 60;

static COLOR: LazyLock<bool> =
    LazyLock::new(|| supports_color::on(supports_color::Stream::Stdout).is_some());

/// Whether stdout is narrower than a one-line report card.
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < NARROW_COLUMNS)
}

/// The colour a piece of output is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
    Info,
    Dim,
}

impl Tone {
    /// Good grades read as success and failing ones as errors.
    pub const fn for_grade(grade: Grade) -> Self {
        match grade {
            Grade::A | Grade::B => Self::Success,
            Grade::C => Self::Info,
            Grade::D => Self::Warning,
            Grade::F => Self::Error,
        }
    }

    /// Renders `text` in this tone, or unchanged when `color` is off.
    pub fn paint(self, text: &str, color: bool) -> String {
        if !color {
            return text.to_string();
        }
        match self {
            Self::Success => text.fg::<css::Green>().to_string(),
            Self::Warning => text.fg::<css::Orange>().to_string(),
            Self::Error => text.fg::<css::Red>().to_string(),
            Self::Info => text.fg::<css::LightBlue>().to_string(),
            Self::Dim => text.dimmed().to_string(),
        }
    }
}

/// Paints `text` in the tone of `grade`, honouring the terminal's colour
/// support.
pub fn graded(text: &str, grade: Grade) -> String {
    Tone::for_grade(grade).paint(text, *COLOR)
}

/// Extension trait for colouring status messages.
pub trait Colorize {
    /// Renders the text in `tone` when stdout supports colour.
    fn tone(&self, tone: Tone) -> String;

    fn success(&self) -> String {
        self.tone(Tone::Success)
    }

    fn warning(&self) -> String {
        self.tone(Tone::Warning)
    }

    fn error(&self) -> String {
        self.tone(Tone::Error)
    }

    fn info(&self) -> String {
        self.tone(Tone::Info)
    }

    fn dim(&self) -> String {
        self.tone(Tone::Dim)
    }
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn tone(&self, tone: Tone) -> String {
        tone.paint(self.as_ref(), *COLOR)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(Grade::A, Tone::Success)]
    #[test_case(Grade::B, Tone::Success)]
    #[test_case(Grade::C, Tone::Info)]
    #[test_case(Grade::D, Tone::Warning)]
    #[test_case(Grade::F, Tone::Error)]
    fn grade_tones(grade: Grade, expected: Tone) {
        assert_eq!(Tone::for_grade(grade), expected);
    }

    #[test]
    fn plain_without_color() {
        for tone in [Tone::Success, Tone::Warning, Tone::Error, Tone::Info, Tone::Dim] {
            assert_eq!(tone.paint("Grade      : A", false), "Grade      : A");
        }
    }

    #[test]
    fn colored_output_wraps_text() {
        let painted = Tone::Error.paint("Poor", true);
        assert!(painted.starts_with('\u{1b}'));
        assert!(painted.contains("Poor"));
        assert_ne!(painted, Tone::Success.paint("Poor", true));
    }
}
