//! The in-memory record store.
//!
//! The store is loaded in full from its [`Storage`] when opened, and every
//! successful `add`/`edit`/`delete` rewrites the whole backing content
//! before returning. If that write fails the in-memory change is kept and
//! the error is returned; memory and storage then differ until the next
//! successful save.

use std::path::PathBuf;

use crate::codec;
use crate::error::{RegistryError, RegistryResult};
use crate::model::{clean_field, CourseRecord, CourseRow, Mark, Student};
use crate::storage::{FileStorage, Storage};

/// What `edit` did to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// An existing course mark was overwritten.
    Updated { previous: Mark },
    /// The student was not enrolled in the course, so a record was appended.
    Enrolled,
}

/// Student records keyed by id, in insertion order, synced to a backing store.
pub struct RecordStore {
    students: Vec<Student>,
    storage: Box<dyn Storage>,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("storage", &self.storage.describe())
            .field("students", &self.students.len())
            .finish()
    }
}

impl RecordStore {
    /// Load every record from `storage`.
    ///
    /// Missing content yields an empty store; it is created on first save.
    pub fn open(storage: impl Storage + 'static) -> RegistryResult<Self> {
        let students = match storage.read()? {
            Some(content) => codec::decode(&content)?,
            None => {
                tracing::debug!(source = %storage.describe(), "no backing content yet");
                Vec::new()
            }
        };

        tracing::debug!(
            source = %storage.describe(),
            students = students.len(),
            "loaded record store"
        );

        Ok(Self {
            students,
            storage: Box::new(storage),
        })
    }

    /// Load from a flat file on disk.
    pub fn open_file(path: impl Into<PathBuf>) -> RegistryResult<Self> {
        Self::open(FileStorage::new(path))
    }

    /// Rewrite the whole backing content from memory.
    pub fn save(&mut self) -> RegistryResult<()> {
        let content = self.to_file_format();
        self.storage.write(&content)?;
        tracing::debug!(
            dest = %self.storage.describe(),
            rows = self.rows().count(),
            "saved record store"
        );
        Ok(())
    }

    /// The exact text [`save`](Self::save) writes.
    pub fn to_file_format(&self) -> String {
        codec::encode(&self.students)
    }

    /// Add a new student enrolled in a single course.
    pub fn add(
        &mut self,
        id: &str,
        first_name: &str,
        last_name: &str,
        course_code: &str,
        mark: Mark,
    ) -> RegistryResult<()> {
        let id = clean_field("student id", id)?;
        if self.contains(&id) {
            return Err(RegistryError::DuplicateKey(id));
        }
        let student = Student {
            first_name: clean_field("first name", first_name)?,
            last_name: clean_field("last name", last_name)?,
            courses: vec![CourseRecord {
                course_code: clean_field("course code", course_code)?,
                mark,
            }],
            id,
        };

        tracing::info!(id = %student.id, name = %student.full_name(), "adding student");
        self.students.push(student);
        self.save()
    }

    /// Set the mark for `course_code`, enrolling the student if needed.
    pub fn edit(&mut self, id: &str, course_code: &str, mark: Mark) -> RegistryResult<EditOutcome> {
        let course_code = clean_field("course code", course_code)?;
        let student = self
            .students
            .iter_mut()
            .find(|s| s.id == id.trim())
            .ok_or_else(|| RegistryError::NotFound(id.trim().to_string()))?;

        let outcome = match student
            .courses
            .iter_mut()
            .find(|c| c.course_code == course_code)
        {
            Some(course) => {
                let previous = course.mark;
                course.mark = mark;
                EditOutcome::Updated { previous }
            }
            None => {
                student.courses.push(CourseRecord {
                    course_code: course_code.clone(),
                    mark,
                });
                EditOutcome::Enrolled
            }
        };

        tracing::info!(id = %student.id, course = %course_code, %mark, ?outcome, "edited student");
        self.save()?;
        Ok(outcome)
    }

    /// Remove a student and all of their courses.
    pub fn delete(&mut self, id: &str) -> RegistryResult<Student> {
        let pos = self
            .students
            .iter()
            .position(|s| s.id == id.trim())
            .ok_or_else(|| RegistryError::NotFound(id.trim().to_string()))?;
        let removed = self.students.remove(pos);

        tracing::info!(id = %removed.id, courses = removed.courses.len(), "deleted student");
        self.save()?;
        Ok(removed)
    }

    pub fn get(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id.trim())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Students in insertion order.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    /// One row per (student, course), in storage order.
    pub fn rows(&self) -> impl Iterator<Item = CourseRow> + '_ {
        self.students.iter().flat_map(|s| s.rows())
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
