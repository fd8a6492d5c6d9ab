//! Delimited text codec for the backing file.
//!
//! Format: one header line, then `id,first_name,last_name,course_code,mark`
//! per line. There is no quoting or escaping; fields are trimmed.

use crate::error::{RegistryError, RegistryResult};
use crate::model::{clean_field, CourseRecord, Mark, Student};

/// Header written as the first line of every saved file.
pub const HEADER: &str = "Student_id,student_first_name,student_last_name,course_code,mark";

const FIELD_COUNT: usize = 5;

/// Decode the contents of a backing file into students, in first-seen order.
///
/// The first line is always treated as a header and skipped. Blank lines are
/// ignored. Any malformed line fails the whole decode.
pub fn decode(content: &str) -> RegistryResult<Vec<Student>> {
    let mut students: Vec<Student> = Vec::new();

    for (idx, raw) in content.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
        if fields.len() != FIELD_COUNT {
            return Err(RegistryError::Parse {
                line: line_no,
                reason: format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
            });
        }

        let parse_err = |e: RegistryError| RegistryError::Parse {
            line: line_no,
            reason: e.to_string(),
        };
        let id = clean_field("id", fields[0]).map_err(parse_err)?;
        let first_name = clean_field("first name", fields[1]).map_err(parse_err)?;
        let last_name = clean_field("last name", fields[2]).map_err(parse_err)?;
        let course_code = clean_field("course code", fields[3]).map_err(parse_err)?;
        let mark = fields[4].parse::<Mark>().map_err(parse_err)?;

        let course = CourseRecord { course_code, mark };

        match students.iter_mut().find(|s| s.id == id) {
            Some(existing) => {
                if existing.first_name != first_name || existing.last_name != last_name {
                    tracing::warn!(
                        line = line_no,
                        id = %id,
                        "name '{first_name} {last_name}' differs from '{}', keeping the first",
                        existing.full_name()
                    );
                }
                existing.courses.push(course);
            }
            None => students.push(Student {
                id,
                first_name,
                last_name,
                courses: vec![course],
            }),
        }
    }

    Ok(students)
}

/// Encode students into the backing file format, header first.
pub fn encode(students: &[Student]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + students.len() * 32);
    out.push_str(HEADER);
    out.push('\n');

    for student in students {
        for course in &student.courses {
            out.push_str(&format!(
                "{},{},{},{},{}\n",
                student.id, student.first_name, student.last_name, course.course_code, course.mark
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Student_id,student_first_name,student_last_name,course_code,mark
1001,Jane,Doe,MCR3U,85
1002,John,Smith,MCR3U,72
1001,Jane,Doe,ICS3U,91
";

    #[test]
    fn decode_groups_by_id_in_first_seen_order() {
        let students = decode(SAMPLE).unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].id, "1001");
        assert_eq!(students[0].courses.len(), 2);
        assert_eq!(students[0].courses[1].course_code, "ICS3U");
        assert_eq!(students[0].courses[1].mark.value(), 91);
        assert_eq!(students[1].full_name(), "John Smith");
    }

    #[test]
    fn encode_reproduces_decoded_file() {
        let students = decode(SAMPLE).unwrap();
        let encoded = encode(&students);
        // Rows regroup by student, so compare against the grouped order.
        let expected = "\
Student_id,student_first_name,student_last_name,course_code,mark
1001,Jane,Doe,MCR3U,85
1001,Jane,Doe,ICS3U,91
1002,John,Smith,MCR3U,72
";
        assert_eq!(encoded, expected);
        assert_eq!(decode(&encoded).unwrap(), students);
    }

    #[test]
    fn header_is_skipped_whatever_it_says() {
        let students = decode("anything\n7,A,B,C,1\n").unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, "7");
    }

    #[test]
    fn trims_fields_and_skips_blank_lines() {
        let content = "h\n 1001 , Jane ,Doe, MCR3U , 85 \r\n\n   \n";
        let students = decode(content).unwrap();
        assert_eq!(students[0].id, "1001");
        assert_eq!(students[0].first_name, "Jane");
        assert_eq!(students[0].courses[0].mark.value(), 85);
    }

    #[test]
    fn empty_input_is_empty_store() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode(HEADER).unwrap().is_empty());
    }

    #[test]
    fn wrong_field_count_reports_line() {
        let err = decode("h\n1,A,B,C,1\n2,A,B,C\n").unwrap_err();
        match err {
            RegistryError::Parse { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("found 4"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_and_out_of_range_marks_fail() {
        assert!(matches!(
            decode("h\n1,A,B,C,abc\n"),
            Err(RegistryError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            decode("h\n1,A,B,C,150\n"),
            Err(RegistryError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn first_seen_name_wins() {
        let students = decode("h\n1,Jane,Doe,A,50\n1,Janet,Doe,B,60\n").unwrap();
        assert_eq!(students[0].first_name, "Jane");
        assert_eq!(students[0].courses.len(), 2);
    }

    #[test]
    fn empty_text_fields_fail_with_line() {
        match decode("h\n1,A,B,C,50\n,A,B,C,50\n").unwrap_err() {
            RegistryError::Parse { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("id"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            decode("h\n1,A,  ,C,50\n"),
            Err(RegistryError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            decode("h\n1,A,B,,50\n"),
            Err(RegistryError::Parse { line: 2, .. })
        ));
    }
}
