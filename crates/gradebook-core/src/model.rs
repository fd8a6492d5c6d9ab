//! Core data model types for gradebook.
//!
//! A [`Student`] owns its name once and an ordered list of
//! [`CourseRecord`]s. The flat [`CourseRow`] view is what the backing file
//! and the reports work with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{RegistryError, RegistryResult};

/// Marks below this value count as a failed course.
pub const PASS_MARK: u8 = 50;

/// A course mark, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Mark(u8);

impl Mark {
    pub const MAX: u8 = 100;

    /// Create a mark, rejecting values above 100.
    pub fn new(value: u8) -> RegistryResult<Self> {
        if value > Self::MAX {
            return Err(RegistryError::InvalidMark(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this mark is below [`PASS_MARK`].
    pub fn is_failing(self) -> bool {
        self.0 < PASS_MARK
    }
}

impl TryFrom<i64> for Mark {
    type Error = RegistryError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or_else(|| RegistryError::InvalidMark(value.to_string()))
    }
}

impl From<Mark> for u8 {
    fn from(mark: Mark) -> Self {
        mark.0
    }
}

impl FromStr for Mark {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| RegistryError::InvalidMark(trimmed.to_string()))?;
        Mark::try_from(value)
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One course a student is enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Course code, e.g. "MCR3U".
    pub course_code: String,
    /// Mark obtained in the course.
    pub mark: Mark,
}

/// A student and every course record they hold, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub courses: Vec<CourseRecord>,
}

impl Student {
    /// `"first last"`, the key reports sort and display by.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Arithmetic mean of all marks, or `None` when the student has no courses.
    pub fn average(&self) -> Option<f64> {
        if self.courses.is_empty() {
            return None;
        }
        let total: u32 = self.courses.iter().map(|c| u32::from(c.mark.value())).sum();
        Some(f64::from(total) / self.courses.len() as f64)
    }

    /// First record for `course_code`, if enrolled.
    pub fn course(&self, course_code: &str) -> Option<&CourseRecord> {
        self.courses.iter().find(|c| c.course_code == course_code)
    }

    /// Flatten into one row per course.
    pub fn rows(&self) -> impl Iterator<Item = CourseRow> + '_ {
        self.courses.iter().map(move |c| CourseRow::new(self, c))
    }
}

/// A single (student, course) line as stored in the backing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRow {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub course_code: String,
    pub mark: Mark,
}

impl CourseRow {
    pub fn new(student: &Student, course: &CourseRecord) -> Self {
        Self {
            student_id: student.id.clone(),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            course_code: course.course_code.clone(),
            mark: course.mark,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Trim a text field and make sure the delimited file format can hold it.
///
/// The backing file has no escaping, so commas and line breaks are refused.
pub fn clean_field(field: &'static str, value: &str) -> RegistryResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::InvalidField {
            field,
            reason: "must not be empty".into(),
        });
    }
    if trimmed.contains([',', '\n', '\r']) {
        return Err(RegistryError::InvalidField {
            field,
            reason: format!("'{trimmed}' contains a comma or line break"),
        });
    }
    Ok(trimmed.to_string())
}
