//! Report queries over the record store.
//!
//! Each query returns a plain serializable value; turning it into text is
//! the job of the `gradebook-report` crate.

use serde::Serialize;

use crate::model::{CourseRecord, CourseRow, Mark, Student};
use crate::statistics::{extreme_averages, stable_max_by_key, student_averages, Extreme};
use crate::store::RecordStore;

/// Rows grouped by student, as produced by the "all" and "by course" reports.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    /// Set for the by-course report.
    pub course_code: Option<String>,
    pub rows: Vec<CourseRow>,
}

/// One student's courses and mean mark.
#[derive(Debug, Clone, Serialize)]
pub struct IndividualReport {
    pub id: String,
    pub full_name: String,
    pub average: f64,
    pub courses: Vec<CourseRecord>,
}

/// A student with at least one failed course.
#[derive(Debug, Clone, Serialize)]
pub struct FailedStudent {
    pub id: String,
    pub full_name: String,
    pub courses: Vec<CourseRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedReport {
    pub students: Vec<FailedStudent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentAverage {
    pub id: String,
    pub full_name: String,
    pub average: f64,
}

/// Every student tied at the highest or lowest average.
#[derive(Debug, Clone, Serialize)]
pub struct AverageReport {
    pub extreme: Extreme,
    /// `None` for an empty store.
    pub average: Option<f64>,
    pub students: Vec<StudentAverage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopMark {
    pub course_code: String,
    pub student_id: String,
    pub full_name: String,
    pub mark: Mark,
}

/// The best mark in each course, courses in first-seen order.
#[derive(Debug, Clone, Serialize)]
pub struct TopMarkReport {
    pub courses: Vec<TopMark>,
}

impl RecordStore {
    /// All rows, students sorted by full name, courses in insertion order.
    pub fn report_all(&self) -> Listing {
        let mut students: Vec<&Student> = self.students().collect();
        students.sort_by(|a, b| a.full_name().cmp(&b.full_name()));

        Listing {
            course_code: None,
            rows: students.into_iter().flat_map(|s| s.rows()).collect(),
        }
    }

    /// Rows for one course, students ordered by their mark in it, best first.
    pub fn report_by_course(&self, course_code: &str) -> Listing {
        let course_code = course_code.trim();
        let key = |s: &Student| s.course(course_code).map_or(0, |c| c.mark.value());

        let mut students: Vec<&Student> = self.students().collect();
        // Stable, so equal marks keep store order.
        students.sort_by(|a, b| key(b).cmp(&key(a)));

        let rows = students
            .into_iter()
            .flat_map(|s| {
                s.courses
                    .iter()
                    .filter(|c| c.course_code == course_code)
                    .map(move |c| CourseRow::new(s, c))
            })
            .collect();

        Listing {
            course_code: Some(course_code.to_string()),
            rows,
        }
    }

    /// One student's details, or `None` if there is no such student.
    pub fn individual_report(&self, id: &str) -> Option<IndividualReport> {
        let student = self.get(id)?;
        Some(IndividualReport {
            id: student.id.clone(),
            full_name: student.full_name(),
            average: student.average().unwrap_or(0.0),
            courses: student.courses.clone(),
        })
    }

    /// Students with at least one mark below the pass mark.
    pub fn report_failed_courses(&self) -> FailedReport {
        let students = self
            .students()
            .filter_map(|s| {
                let failed: Vec<CourseRecord> = s
                    .courses
                    .iter()
                    .filter(|c| c.mark.is_failing())
                    .cloned()
                    .collect();
                (!failed.is_empty()).then(|| FailedStudent {
                    id: s.id.clone(),
                    full_name: s.full_name(),
                    courses: failed,
                })
            })
            .collect();

        FailedReport { students }
    }

    pub fn report_highest_average(&self) -> AverageReport {
        self.report_average(Extreme::Highest)
    }

    pub fn report_lowest_average(&self) -> AverageReport {
        self.report_average(Extreme::Lowest)
    }

    fn report_average(&self, extreme: Extreme) -> AverageReport {
        let averages = student_averages(self.students());
        let (average, tied) = match extreme_averages(&averages, extreme) {
            Some((avg, tied)) => (Some(avg), tied),
            None => (None, Vec::new()),
        };

        AverageReport {
            extreme,
            average,
            students: tied
                .into_iter()
                .map(|(s, avg)| StudentAverage {
                    id: s.id.clone(),
                    full_name: s.full_name(),
                    average: avg,
                })
                .collect(),
        }
    }

    /// The top mark in every course; the first student wins a tie.
    pub fn report_top_mark_in_each_course(&self) -> TopMarkReport {
        let mut by_course: Vec<(String, Vec<CourseRow>)> = Vec::new();
        for row in self.rows() {
            match by_course.iter_mut().find(|(code, _)| *code == row.course_code) {
                Some((_, rows)) => rows.push(row),
                None => by_course.push((row.course_code.clone(), vec![row])),
            }
        }

        let courses = by_course
            .into_iter()
            .filter_map(|(course_code, rows)| {
                let best = stable_max_by_key(rows, |r| r.mark)?;
                Some(TopMark {
                    full_name: best.full_name(),
                    student_id: best.student_id,
                    mark: best.mark,
                    course_code,
                })
            })
            .collect();

        TopMarkReport { courses }
    }
}
