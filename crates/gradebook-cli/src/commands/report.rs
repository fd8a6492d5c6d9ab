//! The `gradebook report` command.

use anyhow::Result;
use clap::Subcommand;

use super::Session;

#[derive(Subcommand, Debug, Clone)]
pub enum ReportKind {
    /// Every student, sorted by full name
    All,
    /// Students in one course, best mark first
    Course {
        /// Course code
        code: String,
    },
    /// One student's courses and average
    Student {
        /// Student ID
        id: String,
    },
    /// Students who failed one or more courses
    Failed,
    /// Student(s) with the highest average
    Highest,
    /// Student(s) with the lowest average
    Lowest,
    /// The student with the top mark in each course
    Top,
}

pub fn execute(session: &Session, kind: ReportKind) -> Result<()> {
    let store = &session.store;
    match kind {
        ReportKind::All => session.print(&store.report_all()),
        ReportKind::Course { code } => session.print(&store.report_by_course(&code)),
        ReportKind::Student { id } => session.print(&store.individual_report(&id)),
        ReportKind::Failed => session.print(&store.report_failed_courses()),
        ReportKind::Highest => session.print(&store.report_highest_average()),
        ReportKind::Lowest => session.print(&store.report_lowest_average()),
        ReportKind::Top => session.print(&store.report_top_mark_in_each_course()),
    }
}
