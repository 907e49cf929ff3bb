//! The interactive menu session.

use std::{io::Write, path::PathBuf};

use gradebook::{
    Config, Marks, ReportFormat, RollNumber, Roster, Student,
    domain::marks::SUBJECTS,
    report::{self, SEPARATOR, format_average},
};

use super::{
    prompt::{Prompt, ask, parse_mark, parse_name, parse_number},
    terminal::{Colorize, graded, is_narrow},
};

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    Display,
    SortByAverage,
    LinearSearch,
    BinarySearch,
    Export,
    UpdateMarks,
    Summary,
    Exit,
}

impl MenuChoice {
    const ALL: [Self; 9] = [
        Self::Add,
        Self::Display,
        Self::SortByAverage,
        Self::LinearSearch,
        Self::BinarySearch,
        Self::Export,
        Self::UpdateMarks,
        Self::Summary,
        Self::Exit,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::Add => "Add Student",
            Self::Display => "Display All Students",
            Self::SortByAverage => "Sort by Average Marks (Bubble Sort)",
            Self::LinearSearch => "Search by Roll Number (Linear Search)",
            Self::BinarySearch => "Search by Roll Number (Binary Search)",
            Self::Export => "Export to File",
            Self::UpdateMarks => "Update Student Marks",
            Self::Summary => "Class Summary",
            Self::Exit => "Exit",
        }
    }
}

/// An interactive session over a single in-memory roster.
pub struct Session<P, W> {
    roster: Roster,
    prompt: P,
    out: W,
    export_path: PathBuf,
    export_format: ReportFormat,
}

impl<P: Prompt, W: Write> Session<P, W> {
    pub fn new(config: &Config, prompt: P, out: W) -> Self {
        Self {
            roster: Roster::from_config(config),
            prompt,
            out,
            export_path: config.export_path.clone(),
            export_format: config.export_format,
        }
    }

    /// Shows the menu and handles choices until the user exits.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let labels = MenuChoice::ALL.map(MenuChoice::label);
        loop {
            writeln!(
                self.out,
                "{}",
                "\n===== STUDENT REPORT SYSTEM MENU =====".info()
            )?;
            let index = self.prompt.select("Enter your choice", &labels)?;
            let choice = MenuChoice::ALL
                .get(index)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("invalid menu selection {index}"))?;
            tracing::debug!(?choice, "Menu selection");

            match choice {
                MenuChoice::Add => self.add_students()?,
                MenuChoice::Display => self.display_all()?,
                MenuChoice::SortByAverage => self.sort_by_average()?,
                MenuChoice::LinearSearch => self.search_linear()?,
                MenuChoice::BinarySearch => self.search_binary()?,
                MenuChoice::Export => self.export()?,
                MenuChoice::UpdateMarks => self.update_marks()?,
                MenuChoice::Summary => self.summary()?,
                MenuChoice::Exit => {
                    writeln!(self.out, "👋 Exiting program. Goodbye!")?;
                    return Ok(());
                }
            }
        }
    }

    #[cfg(test)]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (P, W) {
        (self.prompt, self.out)
    }

    fn add_students(&mut self) -> anyhow::Result<()> {
        let count = ask(
            &mut self.prompt,
            &mut self.out,
            "How many students do you want to add?",
            parse_number,
        )?;

        for _ in 0..count {
            if self.roster.is_full() {
                let capacity = self.roster.capacity_limit().map_or(0, |c| c.get());
                let message = format!("⚠️ Roster is full ({capacity} students). Cannot add more.");
                writeln!(self.out, "{}", message.warning())?;
                break;
            }

            writeln!(
                self.out,
                "\n--- Entering details for Student {} ---",
                self.roster.len() + 1
            )?;

            let name = ask(
                &mut self.prompt,
                &mut self.out,
                "Enter Student Name",
                parse_name,
            )?;
            let roll = self.ask_new_roll()?;
            writeln!(self.out, "Enter marks for {SUBJECTS} subjects (0 - 100):")?;
            let marks = self.ask_marks()?;

            match self.roster.add(Student::new(name, roll, marks)).map(|_| ()) {
                Ok(_) => writeln!(
                    self.out,
                    "{}",
                    format!("✅ Student {} added successfully!", self.roster.len()).success()
                )?,
                Err(e) => writeln!(self.out, "{}", format!("❌ {e}").error())?,
            }
        }

        Ok(())
    }

    /// Asks for a roll number, refusing ones already taken when rolls must be
    /// unique.
    fn ask_new_roll(&mut self) -> anyhow::Result<RollNumber> {
        let roster = &self.roster;
        let unique = roster.enforces_unique_rolls();
        ask(
            &mut self.prompt,
            &mut self.out,
            "Enter Roll Number",
            |input| {
                let roll = parse_number(input)
                    .map_err(|_| "Invalid Roll Number! Digits only.".to_string())?;
                if unique && roster.contains(roll) {
                    Err(format!("Roll Number {roll} is already taken."))
                } else {
                    Ok(roll)
                }
            },
        )
    }

    fn ask_marks(&mut self) -> anyhow::Result<Marks> {
        let mut marks = [0; SUBJECTS];
        for (i, mark) in marks.iter_mut().enumerate() {
            *mark = ask(
                &mut self.prompt,
                &mut self.out,
                &format!("Subject {}", i + 1),
                parse_mark,
            )?;
        }
        Ok(Marks::new(marks)?)
    }

    fn ask_roll(&mut self, question: &str) -> anyhow::Result<RollNumber> {
        ask(&mut self.prompt, &mut self.out, question, parse_number)
    }

    /// Prints `message` as a warning and returns `true` if the roster is empty.
    fn warn_if_empty(&mut self, message: &str) -> anyhow::Result<bool> {
        if self.roster.is_empty() {
            writeln!(self.out, "{}", format!("⚠️ {message}").warning())?;
            return Ok(true);
        }
        Ok(false)
    }

    fn display_all(&mut self) -> anyhow::Result<()> {
        if self.warn_if_empty("No student records found.")? {
            return Ok(());
        }

        writeln!(self.out, "\n===== ALL STUDENT REPORT CARDS =====\n")?;
        let narrow = is_narrow();
        for student in &self.roster {
            if narrow {
                write_card(&mut self.out, student)?;
            } else {
                let line = format!(
                    "Name: {} | Roll: {} | Average: {} | Grade: {} | Performance: {}",
                    student.name(),
                    student.roll(),
                    format_average(student.average()),
                    student.grade(),
                    student.performance()
                );
                writeln!(self.out, "{}", graded(&line, student.grade()))?;
            }
            writeln!(self.out, "{}", SEPARATOR.dim())?;
        }
        Ok(())
    }

    fn sort_by_average(&mut self) -> anyhow::Result<()> {
        if self.warn_if_empty("No students to sort.")? {
            return Ok(());
        }

        self.roster.sort_by_average();
        writeln!(
            self.out,
            "{}",
            "✅ Students sorted by average marks (high to low).".success()
        )?;
        Ok(())
    }

    fn search_linear(&mut self) -> anyhow::Result<()> {
        if self.warn_if_empty("No students to search.")? {
            return Ok(());
        }

        let roll = self.ask_roll("Enter Roll Number to search")?;
        let found = self.roster.find_linear(roll);
        write_search_result(&mut self.out, found)
    }

    fn search_binary(&mut self) -> anyhow::Result<()> {
        if self.warn_if_empty("No students to search.")? {
            return Ok(());
        }

        let roll = self.ask_roll("Enter Roll Number to search")?;
        let found = self.roster.find_binary(roll);
        write_search_result(&mut self.out, found)
    }

    fn export(&mut self) -> anyhow::Result<()> {
        match report::write_report(
            &self.export_path,
            self.roster.students(),
            self.export_format,
        ) {
            Ok(()) => writeln!(
                self.out,
                "{}",
                format!(
                    "✅ Student data exported to {} successfully!",
                    self.export_path.display()
                )
                .success()
            )?,
            Err(e) => {
                tracing::error!("Export failed: {e}");
                writeln!(self.out, "{}", format!("❌ {e}").error())?;
            }
        }
        Ok(())
    }

    fn update_marks(&mut self) -> anyhow::Result<()> {
        if self.warn_if_empty("No students to update.")? {
            return Ok(());
        }

        let roll = self.ask_roll("Enter Roll Number to update")?;
        if !self.roster.contains(roll) {
            writeln!(
                self.out,
                "{}",
                "❌ No student found with that roll number.".error()
            )?;
            return Ok(());
        }

        writeln!(self.out, "Enter new marks for {SUBJECTS} subjects (0 - 100):")?;
        let marks = self.ask_marks()?;
        let student = self.roster.update_marks(roll, marks)?;

        writeln!(self.out, "{}", "\n✅ Marks updated!\n".success())?;
        write_card(&mut self.out, student)
    }

    fn summary(&mut self) -> anyhow::Result<()> {
        let Some(summary) = self.roster.summary() else {
            writeln!(self.out, "{}", "⚠️ No student records found.".warning())?;
            return Ok(());
        };

        writeln!(self.out, "\n===== CLASS SUMMARY =====")?;
        writeln!(self.out, "Students     : {}", summary.count)?;
        writeln!(self.out, "Class Average: {:.2}", summary.class_average)?;
        writeln!(
            self.out,
            "Highest      : {} (Roll {}, {})",
            summary.highest.name(),
            summary.highest.roll(),
            format_average(summary.highest.average())
        )?;
        writeln!(
            self.out,
            "Lowest       : {} (Roll {}, {})",
            summary.lowest.name(),
            summary.lowest.roll(),
            format_average(summary.lowest.average())
        )?;
        writeln!(self.out, "{}", "Grade distribution".dim())?;
        for (grade, count) in &summary.distribution {
            let line = format!("  {grade} ({}): {count}", grade.performance());
            writeln!(self.out, "{}", graded(&line, *grade))?;
        }
        Ok(())
    }
}

fn write_card<W: Write>(out: &mut W, student: &Student) -> anyhow::Result<()> {
    writeln!(out, "Name       : {}", student.name())?;
    writeln!(out, "Roll Number: {}", student.roll())?;
    writeln!(out, "Average    : {}", format_average(student.average()))?;
    let grade = student.grade();
    let performance = format!("Performance: {}", student.performance());
    writeln!(out, "{}", graded(&format!("Grade      : {grade}"), grade))?;
    writeln!(out, "{}", graded(&performance, grade))?;
    Ok(())
}

fn write_search_result<W: Write>(out: &mut W, student: Option<&Student>) -> anyhow::Result<()> {
    match student {
        Some(student) => {
            writeln!(out, "{}", "\n✅ Student Found!\n".success())?;
            write_card(out, student)
        }
        None => {
            writeln!(
                out,
                "{}",
                "❌ No student found with that roll number.".error()
            )?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, num::NonZeroUsize};

    use gradebook::Grade;

    use super::*;
    use crate::cli::prompt::{LinePrompt, scripted::Scripted};

    const ADD: &str = "0";
    const DISPLAY: &str = "1";
    const SORT: &str = "2";
    const LINEAR: &str = "3";
    const BINARY: &str = "4";
    const EXPORT: &str = "5";
    const UPDATE: &str = "6";
    const SUMMARY: &str = "7";
    const EXIT: &str = "8";

    fn run(config: &Config, answers: &[&str]) -> (Roster, String) {
        let prompt = Scripted::new(answers.iter().copied());
        let mut session = Session::new(config, prompt, Vec::new());
        session.run().unwrap();
        let roster = session.roster().clone();
        let (_, output) = session.into_parts();
        (roster, String::from_utf8(output).unwrap())
    }

    /// Runs a session reading `input` line by line, returning the roster and
    /// everything written to the terminal.
    fn run_lines(config: &Config, input: &str) -> (Roster, String) {
        let prompt = LinePrompt::new(Cursor::new(input.to_string()), Vec::new());
        let mut session = Session::new(config, prompt, Vec::new());
        session.run().unwrap();
        let roster = session.roster().clone();
        let (prompt, output) = session.into_parts();
        let mut output = String::from_utf8(output).unwrap();
        output.push_str(&String::from_utf8(prompt.into_output()).unwrap());
        (roster, output)
    }

    /// Answers for adding one student.
    fn student(
        name: &'static str,
        roll: &'static str,
        marks: [&'static str; 5],
    ) -> Vec<&'static str> {
        let mut answers = vec![name, roll];
        answers.extend(marks);
        answers
    }

    fn script(parts: &[&[&'static str]]) -> Vec<&'static str> {
        parts.iter().flat_map(|part| part.iter().copied()).collect()
    }

    #[test]
    fn exit_immediately() {
        let (roster, output) = run(&Config::default(), &[EXIT]);
        assert!(roster.is_empty());
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn piped_input_adds_student() {
        let (roster, output) = run_lines(
            &Config::default(),
            "1\n1\nAlice\n10\n90\n90\n90\n90\n90\n9\n",
        );

        assert_eq!(roster.len(), 1);
        let alice = roster.find_linear(10).unwrap();
        assert_eq!(alice.name().as_str(), "Alice");
        assert_eq!(alice.grade(), Grade::A);
        assert!(output.contains("1. Add Student"));
        assert!(output.contains("9. Exit"));
        assert!(output.contains("Enter your choice: "));
        assert!(output.contains("Student 1 added successfully!"));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn piped_input_reprompts_invalid_choice() {
        let (roster, output) = run_lines(&Config::default(), "12\nabc\n9\n");

        assert!(roster.is_empty());
        assert!(output.contains("Invalid choice! Please select a valid option."));
        assert!(output.contains("Invalid input! Please enter a numeric value."));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn piped_input_ending_early_is_an_error() {
        let prompt = LinePrompt::new(Cursor::new("1\n1\nAlice\n"), Vec::new());
        let mut session = Session::new(&Config::default(), prompt, Vec::new());

        assert!(session.run().is_err());
        assert!(session.roster().is_empty());
    }

    #[test]
    fn add_students_with_retries() {
        let answers = script(&[
            &[ADD, "two", "2"],
            &["R2D2", "Alice"],
            &["abc", "10"],
            &["90", "101", "90", "90", "90", "90"],
            &student("Bob", "20", ["50", "60", "70", "55", "65"]),
            &[EXIT],
        ]);

        let (roster, output) = run(&Config::default(), &answers);

        assert_eq!(roster.len(), 2);
        let alice = roster.find_linear(10).unwrap();
        assert_eq!(alice.name().as_str(), "Alice");
        assert_eq!(alice.grade(), Grade::A);
        assert_eq!(roster.find_linear(20).unwrap().grade(), Grade::D);

        assert!(output.contains("Invalid input! Please enter a numeric value."));
        assert!(output.contains("Invalid name! Use letters and spaces only."));
        assert!(output.contains("Invalid Roll Number! Digits only."));
        assert!(output.contains("Enter mark between 0 and 100."));
        assert!(output.contains("Student 2 added successfully!"));
    }

    #[test]
    fn duplicate_roll_is_reprompted() {
        let answers = script(&[
            &[ADD, "1"],
            &student("Alice", "10", ["90"; 5]),
            &[ADD, "1", "Bob", "10", "11"],
            &["80"; 5],
            &[EXIT],
        ]);

        let (roster, output) = run(&Config::default(), &answers);

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.find_linear(11).unwrap().name().as_str(), "Bob");
        assert!(output.contains("Roll Number 10 is already taken."));
    }

    #[test]
    fn full_roster_stops_adding() {
        let mut config = Config::default();
        config.set_capacity(NonZeroUsize::new(1));
        let answers = script(&[
            &[ADD, "3"],
            &student("Alice", "10", ["90"; 5]),
            &[EXIT],
        ]);

        let (roster, output) = run(&config, &answers);

        assert_eq!(roster.len(), 1);
        assert!(output.contains("Roster is full (1 students)"));
    }

    #[test]
    fn empty_roster_warnings() {
        let (_, output) = run(
            &Config::default(),
            &[DISPLAY, SORT, LINEAR, BINARY, UPDATE, SUMMARY, EXIT],
        );

        assert!(output.contains("No student records found."));
        assert!(output.contains("No students to sort."));
        assert!(output.contains("No students to search."));
        assert!(output.contains("No students to update."));
    }

    #[test]
    fn sort_and_display() {
        let answers = script(&[
            &[ADD, "3"],
            &student("Carol", "30", ["70"; 5]),
            &student("Alice", "10", ["95"; 5]),
            &student("Bob", "20", ["85"; 5]),
            &[SORT, DISPLAY, EXIT],
        ]);

        let (roster, output) = run(&Config::default(), &answers);

        let rolls: Vec<_> = roster.students().iter().map(Student::roll).collect();
        assert_eq!(rolls, vec![10, 20, 30]);
        assert!(output.contains("Students sorted by average marks (high to low)."));

        let alice = output.find("Alice").unwrap();
        let bob = output.rfind("Bob").unwrap();
        let carol = output.rfind("Carol").unwrap();
        let listing = output.find("ALL STUDENT REPORT CARDS").unwrap();
        assert!(listing < alice && alice < bob && bob < carol);
    }

    #[test]
    fn searches_report_found_and_missing() {
        let answers = script(&[
            &[ADD, "3"],
            &student("Carol", "30", ["70"; 5]),
            &student("Alice", "10", ["95"; 5]),
            &student("Bob", "20", ["85"; 5]),
            &[LINEAR, "30", LINEAR, "99", BINARY, "20", BINARY, "98", EXIT],
        ]);

        let (roster, output) = run(&Config::default(), &answers);

        assert_eq!(output.matches("Student Found!").count(), 2);
        assert_eq!(
            output
                .matches("No student found with that roll number.")
                .count(),
            2
        );
        assert!(output.contains("Roll Number: 30"));
        assert!(output.contains("Roll Number: 20"));

        // binary search leaves the roster sorted by roll
        let rolls: Vec<_> = roster.students().iter().map(Student::roll).collect();
        assert_eq!(rolls, vec![10, 20, 30]);
    }

    #[test]
    fn update_marks_rederives() {
        let answers = script(&[
            &[ADD, "1"],
            &student("Alice", "10", ["90"; 5]),
            &[UPDATE, "11", UPDATE, "10"],
            &["50", "60", "70", "55", "65"],
            &[EXIT],
        ]);

        let (roster, output) = run(&Config::default(), &answers);

        let alice = roster.find_linear(10).unwrap();
        assert_eq!(alice.grade(), Grade::D);
        assert_eq!(alice.performance(), "Below Average");
        assert!(output.contains("No student found with that roll number."));
        assert!(output.contains("Marks updated!"));
    }

    #[test]
    fn summary_lists_distribution() {
        let answers = script(&[
            &[ADD, "2"],
            &student("Alice", "10", ["95"; 5]),
            &student("Bob", "20", ["45"; 5]),
            &[SUMMARY, EXIT],
        ]);

        let (_, output) = run(&Config::default(), &answers);

        assert!(output.contains("Class Average: 70.00"));
        assert!(output.contains("Highest      : Alice (Roll 10, 95.0)"));
        assert!(output.contains("Lowest       : Bob (Roll 20, 45.0)"));
        assert!(output.contains("A (Excellent): 1"));
        assert!(output.contains("F (Poor): 1"));
    }

    #[test]
    fn export_writes_configured_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.export_path = tmp.path().join("student_report.txt");

        let answers = script(&[
            &[ADD, "1"],
            &student("Alice", "10", ["90"; 5]),
            &[EXPORT, EXIT],
        ]);

        let (_, output) = run(&config, &answers);

        assert!(output.contains("exported to"));
        let content = std::fs::read_to_string(&config.export_path).unwrap();
        assert!(content.starts_with("===== STUDENT REPORT CARD ====="));
        assert!(content.contains("Name       : Alice"));
    }

    #[test]
    fn export_failure_is_reported_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.export_path = tmp.path().join("missing").join("report.txt");

        let (_, output) = run(&config, &[EXPORT, EXIT]);

        assert!(output.contains("Error writing to file"));
        assert!(output.contains("Goodbye!"));
    }
}
