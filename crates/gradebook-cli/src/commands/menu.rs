//! The `gradebook menu` command: the interactive lettered menu.
//!
//! Input problems and failed operations are printed and the menu carries
//! on; only errors writing to the terminal end it. End of input behaves
//! like `Q`.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use gradebook_core::{GradebookConfig, Mark, OutputFormat, RecordStore};
use gradebook_report::{write_report, Render};

use super::records::{edit_message, is_yes, preview};
use super::Session;

const INVALID_MARK: &str = "Invalid input for mark. Mark should be an integer within 0-100.";
const INVALID_OPTION: &str = "Invalid option. Please try again.";

pub fn execute(session: Session) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(session.store, &session.config, stdin.lock(), stdout.lock());
    menu.run()
}

pub struct Menu<R, W> {
    store: RecordStore,
    format: OutputFormat,
    school_name: String,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(store: RecordStore, config: &GradebookConfig, input: R, out: W) -> Self {
        Self {
            store,
            format: config.format,
            school_name: config.school_name.clone(),
            input,
            out,
        }
    }

    /// Loop until `Q` or end of input, then save once more.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "------{} student registry system ------", self.school_name)?;
            writeln!(self.out, "A. Add student")?;
            writeln!(self.out, "B. Edit student")?;
            writeln!(self.out, "C. Delete student")?;
            writeln!(self.out, "D. Report")?;
            writeln!(self.out, "E. Special Report")?;
            writeln!(self.out, "Q. Quit")?;

            let Some(option) = self.prompt("Enter one of these options (A-E or Q): ")? else {
                break;
            };

            match option.to_uppercase().as_str() {
                "A" => self.add_student()?,
                "B" => self.edit_student()?,
                "C" => self.delete_student()?,
                "D" => self.report()?,
                "E" => self.special_report()?,
                "Q" => {
                    writeln!(self.out, "Thank you for using the school registry system!")?;
                    break;
                }
                _ => writeln!(self.out, "{INVALID_OPTION}")?,
            }
        }

        if let Err(e) = self.store.save() {
            writeln!(self.out, "Failed to save records: {e}")?;
        }
        Ok(())
    }

    /// Print `text`, read one line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_mark(&mut self, text: &str) -> Result<Option<Mark>> {
        let Some(raw) = self.prompt(text)? else {
            return Ok(None);
        };
        match raw.parse::<Mark>() {
            Ok(mark) => Ok(Some(mark)),
            Err(_) => {
                writeln!(self.out, "{INVALID_MARK}")?;
                Ok(None)
            }
        }
    }

    fn show<T: Render>(&mut self, report: &T) -> Result<()> {
        write_report(report, self.format, &mut self.out)
    }

    fn add_student(&mut self) -> Result<()> {
        let Some(id) = self.prompt("Enter the student's ID: ")? else {
            return Ok(());
        };
        if self.store.contains(&id) {
            writeln!(self.out, "A student with this ID already exists.")?;
            return Ok(());
        }
        let Some(first_name) = self.prompt("Enter the student's first name: ")? else {
            return Ok(());
        };
        let Some(last_name) = self.prompt("Enter the student's last name: ")? else {
            return Ok(());
        };
        let Some(course) = self.prompt("Enter the course code: ")? else {
            return Ok(());
        };
        let Some(mark) = self.prompt_mark("Enter the student's mark: ")? else {
            return Ok(());
        };

        match self.store.add(&id, &first_name, &last_name, &course, mark) {
            Ok(()) => writeln!(self.out, "Student has been added.")?,
            Err(e) => writeln!(self.out, "Failed to add student: {e}")?,
        }
        Ok(())
    }

    /// Show the student and ask for confirmation. Returns the trimmed id.
    fn confirm_student(&mut self, id_prompt: &str, question: &str) -> Result<Option<String>> {
        let Some(id) = self.prompt(id_prompt)? else {
            return Ok(None);
        };
        let Some(listing) = preview(&self.store, &id) else {
            writeln!(self.out, "Student does not exist.")?;
            return Ok(None);
        };
        self.show(&listing)?;

        match self.prompt(question)? {
            Some(answer) if is_yes(&answer) => Ok(Some(id)),
            _ => Ok(None),
        }
    }

    fn edit_student(&mut self) -> Result<()> {
        let Some(id) = self.confirm_student(
            "Enter the student's ID to be edited: ",
            "Do you want to edit ? (Y/N): ",
        )?
        else {
            return Ok(());
        };
        let Some(course) = self.prompt("Enter the course you want to edit: ")? else {
            return Ok(());
        };
        let Some(mark) = self.prompt_mark("Enter the new mark: ")? else {
            return Ok(());
        };

        match self.store.edit(&id, &course, mark) {
            Ok(outcome) => writeln!(self.out, "{}", edit_message(outcome, &course))?,
            Err(e) => writeln!(self.out, "Failed to update student's mark: {e}")?,
        }
        Ok(())
    }

    fn delete_student(&mut self) -> Result<()> {
        let Some(id) = self.confirm_student(
            "Enter the student's ID to be deleted: ",
            "Do you want to delete ? (Y/N): ",
        )?
        else {
            return Ok(());
        };

        match self.store.delete(&id) {
            Ok(_) => writeln!(self.out, "Student has been deleted.")?,
            Err(e) => writeln!(self.out, "Failed to delete student: {e}")?,
        }
        Ok(())
    }

    fn report(&mut self) -> Result<()> {
        writeln!(self.out, "1. All")?;
        writeln!(self.out, "2. By Course")?;
        writeln!(self.out, "3. By Student")?;
        let Some(choice) = self.prompt("Enter one of these options (1-3): ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let report = self.store.report_all();
                self.show(&report)
            }
            "2" => {
                let Some(course) = self.prompt("Enter the course name: ")? else {
                    return Ok(());
                };
                let report = self.store.report_by_course(&course);
                self.show(&report)
            }
            "3" => {
                let Some(id) = self.prompt("Enter the student's ID: ")? else {
                    return Ok(());
                };
                let report = self.store.individual_report(&id);
                self.show(&report)
            }
            _ => Ok(writeln!(self.out, "{INVALID_OPTION}")?),
        }
    }

    fn special_report(&mut self) -> Result<()> {
        writeln!(self.out, "1. Students who failed one or more courses")?;
        writeln!(self.out, "2. Student(s) whose Average is the highest in school")?;
        writeln!(self.out, "3. Student(s) whose Average is lowest in School")?;
        writeln!(self.out, "4. Students who got top mark in each course")?;
        let Some(choice) = self.prompt("Enter one of these options (1-4): ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let report = self.store.report_failed_courses();
                self.show(&report)
            }
            "2" => {
                let report = self.store.report_highest_average();
                self.show(&report)
            }
            "3" => {
                let report = self.store.report_lowest_average();
                self.show(&report)
            }
            "4" => {
                let report = self.store.report_top_mark_in_each_course();
                self.show(&report)
            }
            _ => Ok(writeln!(self.out, "{INVALID_OPTION}")?),
        }
    }
}
