//! Bordered console tables.

use comfy_table::{Cell, CellAlignment, Table};

use gradebook_core::report::{
    AverageReport, FailedReport, IndividualReport, Listing, TopMarkReport,
};
use gradebook_core::statistics::Extreme;

use crate::format_average;

fn mark_cell(value: impl ToString) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

pub(crate) fn listing(report: &Listing) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Student ID", "Full name", "Course", "Mark"]);

    for row in &report.rows {
        table.add_row(vec![
            Cell::new(&row.student_id),
            Cell::new(row.full_name()),
            Cell::new(&row.course_code),
            mark_cell(row.mark),
        ]);
    }

    match &report.course_code {
        Some(code) => format!("Course: {code} ({} students)\n{table}\n", report.rows.len()),
        None => format!("{table}\n"),
    }
}

pub(crate) fn individual(report: &IndividualReport) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Course", "Mark"]);
    for course in &report.courses {
        table.add_row(vec![Cell::new(&course.course_code), mark_cell(course.mark)]);
    }

    format!(
        "Student ID: {}\nFull name:  {}\nAverage:    {}\n{table}\n",
        report.id,
        report.full_name,
        format_average(report.average)
    )
}

pub(crate) fn failed(report: &FailedReport) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Student ID", "Full name", "Failed course", "Mark"]);

    for student in &report.students {
        for (i, course) in student.courses.iter().enumerate() {
            let (id, name) = if i == 0 {
                (student.id.as_str(), student.full_name.as_str())
            } else {
                ("", "")
            };
            table.add_row(vec![
                Cell::new(id),
                Cell::new(name),
                Cell::new(&course.course_code),
                mark_cell(course.mark),
            ]);
        }
    }

    format!("{table}\n")
}

pub(crate) fn averages(report: &AverageReport) -> String {
    let title = match report.extreme {
        Extreme::Highest => "Highest average",
        Extreme::Lowest => "Lowest average",
    };

    let mut table = Table::new();
    table.set_header(vec!["Student ID", "Full name", "Average"]);
    for student in &report.students {
        table.add_row(vec![
            Cell::new(&student.id),
            Cell::new(&student.full_name),
            mark_cell(format_average(student.average)),
        ]);
    }

    format!("{title}\n{table}\n")
}

pub(crate) fn top_marks(report: &TopMarkReport) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Course", "Student ID", "Full name", "Mark"]);
    for top in &report.courses {
        table.add_row(vec![
            Cell::new(&top.course_code),
            Cell::new(&top.student_id),
            Cell::new(&top.full_name),
            mark_cell(top.mark),
        ]);
    }

    format!("{table}\n")
}

#[cfg(test)]
mod tests {
    use crate::Render;
    use gradebook_core::{MemoryStorage, RecordStore};

    fn store() -> RecordStore {
        RecordStore::open(MemoryStorage::with_content(
            "h\n1001,Jane,Doe,MCR3U,85\n1002,John,Smith,MCR3U,85\n1002,John,Smith,ICS3U,30\n",
        ))
        .unwrap()
    }

    #[test]
    fn by_course_table_has_title_and_rows() {
        let text = store().report_by_course("MCR3U").to_table();
        assert!(text.starts_with("Course: MCR3U (2 students)"));
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("John Smith"));
        assert!(!text.contains("ICS3U"));
    }

    #[test]
    fn failed_table_names_student_once() {
        let store = RecordStore::open(MemoryStorage::with_content(
            "h\n7,Al,Ant,X,10\n7,Al,Ant,Y,20\n",
        ))
        .unwrap();
        let text = store.report_failed_courses().to_table();
        assert_eq!(text.matches("Al Ant").count(), 1);
        assert!(text.contains('X') && text.contains('Y'));
    }

    #[test]
    fn averages_table_lists_every_tie() {
        let text = store().report_lowest_average().to_table();
        assert!(text.starts_with("Lowest average"));
        assert!(text.contains("57.5"));

        let text = store().report_highest_average().to_table();
        assert!(text.contains("85.0"));
        assert!(text.contains("Jane Doe"));
    }

    #[test]
    fn individual_table_and_missing_student() {
        let text = store().individual_report("1002").to_table();
        assert!(text.contains("Average:    57.5"));
        assert_eq!(store().individual_report("0").to_table(), "No such student.\n");
    }

    #[test]
    fn top_mark_table_prefers_first_student() {
        let text = store().report_top_mark_in_each_course().to_table();
        let mcr = text.lines().find(|l| l.contains("MCR3U")).unwrap();
        assert!(mcr.contains("Jane Doe"));
    }
}
