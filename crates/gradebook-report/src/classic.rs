//! The classic fixed-width text layout.
//!
//! Column widths match the original console program so existing users see
//! the same output.

use gradebook_core::report::{
    AverageReport, FailedReport, IndividualReport, Listing, TopMarkReport,
};

use crate::{format_average, Render, NO_SUCH_STUDENT};

const BANNER: &str = "###################################################";
const LISTING_HEADER: &str = "| STUDENT ID | Full name            | Course name | Mark";

impl Render for Listing {
    fn to_table(&self) -> String {
        crate::table::listing(self)
    }

    fn to_classic(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{BANNER}\n{LISTING_HEADER}\n"));
        for row in &self.rows {
            out.push_str(&format!(
                "| {:<10} | {:<20} | {:<11} | {}\n",
                row.student_id,
                row.full_name(),
                row.course_code,
                row.mark
            ));
        }
        out.push_str(&format!("{BANNER}\n"));
        out
    }
}

impl Render for Option<IndividualReport> {
    fn to_table(&self) -> String {
        match self {
            Some(report) => crate::table::individual(report),
            None => format!("{NO_SUCH_STUDENT}\n"),
        }
    }

    fn to_classic(&self) -> String {
        let Some(report) = self else {
            return format!("{NO_SUCH_STUDENT}\n");
        };

        let mut out = String::new();
        out.push_str(&format!("{BANNER}\n"));
        out.push_str(&format!("| STUDENT ID: {}\n", report.id));
        out.push_str(&format!("| Full name: {}\n", report.full_name));
        out.push_str(&format!("| Average: {}\n", format_average(report.average)));
        out.push_str("| Course name | Mark\n");
        for course in &report.courses {
            out.push_str(&format!("| {:<11} | {}\n", course.course_code, course.mark));
        }
        out.push_str(&format!("{BANNER}\n"));
        out
    }
}

impl Render for FailedReport {
    fn to_table(&self) -> String {
        crate::table::failed(self)
    }

    fn to_classic(&self) -> String {
        let mut out = String::new();
        out.push_str("Student ID | Full name       | Failed courses | Mark\n");
        for student in &self.students {
            for (i, course) in student.courses.iter().enumerate() {
                if i == 0 {
                    out.push_str(&format!("{:<10} | {:<15} | ", student.id, student.full_name));
                } else {
                    out.push_str(&format!("{:<29}| ", ""));
                }
                out.push_str(&format!("{:<14} | {}\n", course.course_code, course.mark));
            }
        }
        out
    }
}

impl Render for AverageReport {
    fn to_table(&self) -> String {
        crate::table::averages(self)
    }

    fn to_classic(&self) -> String {
        let mut out = String::new();
        out.push_str("Student ID | Full name       | Average\n");
        for student in &self.students {
            out.push_str(&format!(
                "{:<10} | {:<15} | {}\n",
                student.id,
                student.full_name,
                format_average(student.average)
            ));
        }
        out
    }
}

impl Render for TopMarkReport {
    fn to_table(&self) -> String {
        crate::table::top_marks(self)
    }

    fn to_classic(&self) -> String {
        let mut out = String::new();
        out.push_str("Student ID | Full name       | Course  | Mark\n");
        for top in &self.courses {
            out.push_str(&format!(
                "{:<10} | {:<15} | {:<7} | {}\n",
                top.student_id, top.full_name, top.course_code, top.mark
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_core::{MemoryStorage, RecordStore};

    fn store() -> RecordStore {
        RecordStore::open(MemoryStorage::with_content(
            "\
Student_id,student_first_name,student_last_name,course_code,mark
1001,Jane,Doe,MCR3U,85
1002,John,Smith,MCR3U,42
1002,John,Smith,ICS3U,30
",
        ))
        .unwrap()
    }

    #[test]
    fn listing_layout() {
        let text = store().report_all().to_classic();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], BANNER);
        assert_eq!(lines[1], LISTING_HEADER);
        assert_eq!(lines[2], "| 1001       | Jane Doe             | MCR3U       | 85");
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[5], BANNER);
    }

    #[test]
    fn individual_layout() {
        let text = store().individual_report("1002").to_classic();
        assert!(text.contains("| STUDENT ID: 1002\n"));
        assert!(text.contains("| Full name: John Smith\n"));
        assert!(text.contains("| Average: 36.0\n"));
        assert!(text.contains("| ICS3U       | 30\n"));

        assert_eq!(store().individual_report("nope").to_classic(), "No such student.\n");
    }

    #[test]
    fn failed_layout_continues_under_first_row() {
        let text = store().report_failed_courses().to_classic();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1002       | John Smith      | MCR3U          | 42");
        assert_eq!(lines[2], format!("{}| ICS3U          | 30", " ".repeat(29)));
    }

    #[test]
    fn averages_and_top_marks_layout() {
        let text = store().report_highest_average().to_classic();
        assert_eq!(text.lines().nth(1), Some("1001       | Jane Doe        | 85.0"));

        let text = store().report_top_mark_in_each_course().to_classic();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "1001       | Jane Doe        | MCR3U   | 85");
        assert_eq!(lines[2], "1002       | John Smith      | ICS3U   | 30");
    }
}
