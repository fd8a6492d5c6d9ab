//! JSON export of reports.

use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty-printed JSON for any report value.
pub fn to_json<R: Serialize + ?Sized>(report: &R) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_core::{MemoryStorage, RecordStore};

    #[test]
    fn missing_student_is_null() {
        let store = RecordStore::open(MemoryStorage::new()).unwrap();
        assert_eq!(to_json(&store.individual_report("1")).unwrap(), "null");
    }

    #[test]
    fn top_marks_export() {
        let store = RecordStore::open(MemoryStorage::with_content(
            "h\n1,A,B,X,70\n2,C,D,X,70\n",
        ))
        .unwrap();
        let json = to_json(&store.report_top_mark_in_each_course()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["courses"][0]["student_id"], "1");
        assert_eq!(value["courses"][0]["mark"], 70);
    }
}
