use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::roster::RosterStore;

use super::files::{read_records, write_records, LoadReport};
use super::record::{expect_fields, join_fields, parse_number, RecordError};

pub const RESULTS_HEADER: &str = "student_id,course_code,score";

/// Apply every result row in `path` on top of the current roster. Rows for
/// unknown students or with out-of-range scores are skipped; a later row for
/// the same course overwrites an earlier one.
pub fn load_results(store: &mut RosterStore, path: &Path) -> Result<LoadReport> {
    let report = read_records(path, RESULTS_HEADER, |line| apply_result(store, line))?;
    info!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped,
        "loaded results"
    );
    Ok(report)
}

/// Write one row per recorded grade, students in roster order and courses in
/// code order.
pub fn save_results(store: &RosterStore, path: &Path) -> Result<usize> {
    let rows = store.students().flat_map(|student| {
        student.grades().iter().map(move |(code, score)| {
            let score = score.to_string();
            join_fields([student.id(), code.as_str(), score.as_str()])
        })
    });
    let written = write_records(path, RESULTS_HEADER, rows)?;
    info!(path = %path.display(), written, "saved results");
    Ok(written)
}

fn apply_result(store: &mut RosterStore, line: &str) -> Result<(), RecordError> {
    let [student_id, course_code, score] = expect_fields::<3>(line)?;
    let score = parse_number("score", &score)?;
    store.add_result(&student_id, &course_code, score)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;

    #[test]
    fn test_apply_result_routes_through_store_checks() {
        let mut store = RosterStore::new();
        store.add_by_fields("S1", "Ada", 3.0).unwrap();

        apply_result(&mut store, "S1,C1,88.5").unwrap();
        assert_eq!(store.get("S1").and_then(|s| s.grade("C1")), Some(88.5));

        assert!(matches!(
            apply_result(&mut store, "S9,C1,50"),
            Err(RecordError::Rejected(RosterError::NotFound(_)))
        ));
        assert!(matches!(
            apply_result(&mut store, "S1,C2,101"),
            Err(RecordError::Rejected(RosterError::InvalidRange { .. }))
        ));
        assert!(matches!(
            apply_result(&mut store, "S1,C3"),
            Err(RecordError::FieldCount { expected: 3, found: 2 })
        ));
    }
}
