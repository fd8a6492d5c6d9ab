//! The `gradebook add`, `edit`, `delete`, and `show` commands.

use std::io::{self, BufRead, Write};

use std::path::Path;

use anyhow::Result;

use gradebook_core::report::Listing;
use gradebook_core::{EditOutcome, Mark, RecordStore, RegistryResult, Student};

use super::Session;

pub fn add(
    session: &mut Session,
    id: &str,
    first_name: &str,
    last_name: &str,
    course: &str,
    mark: &str,
) -> Result<()> {
    let mark: Mark = mark.parse()?;
    let result = session.store.add(id, first_name, last_name, course, mark);
    saved(result, &session.config.data_file)?;
    println!("Student has been added.");
    Ok(())
}

pub fn edit(session: &mut Session, id: &str, course: &str, mark: &str) -> Result<()> {
    let mark: Mark = mark.parse()?;
    let result = session.store.edit(id, course, mark);
    let outcome = saved(result, &session.config.data_file)?;
    println!("{}", edit_message(outcome, course));
    Ok(())
}

pub fn delete(session: &mut Session, id: &str, yes: bool) -> Result<()> {
    let Some(student) = session.store.get(id) else {
        anyhow::bail!("Student {} does not exist.", id.trim());
    };

    if !yes {
        session.print(&student_listing(student))?;
        print!("Do you want to delete ? (Y/N): ");
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !is_yes(&answer) {
            println!("Student was not deleted.");
            return Ok(());
        }
    }

    let result = session.store.delete(id);
    saved(result, &session.config.data_file)?;
    println!("Student has been deleted.");
    Ok(())
}

pub fn show(session: &Session, id: &str) -> Result<()> {
    match session.store.get(id) {
        Some(student) => session.print(&student_listing(student)),
        None => {
            println!("Student does not exist.");
            Ok(())
        }
    }
}

/// Name the data file when a mutation failed to reach it.
fn saved<T>(result: RegistryResult<T>, data_file: &Path) -> Result<T> {
    result.map_err(|e| {
        if e.is_storage() {
            anyhow::Error::new(e)
                .context(format!("changes were not saved to {}", data_file.display()))
        } else {
            e.into()
        }
    })
}

/// All rows of one student, for previews before edit/delete.
pub fn student_listing(student: &Student) -> Listing {
    Listing {
        course_code: None,
        rows: student.rows().collect(),
    }
}

/// Look a student up and build their preview listing.
pub fn preview(store: &RecordStore, id: &str) -> Option<Listing> {
    store.get(id).map(student_listing)
}

pub fn edit_message(outcome: EditOutcome, course: &str) -> String {
    match outcome {
        EditOutcome::Updated { previous } => {
            format!("Student's mark has been updated (was {previous}).")
        }
        EditOutcome::Enrolled => {
            format!("Student has been enrolled in {} and the mark recorded.", course.trim())
        }
    }
}

pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
