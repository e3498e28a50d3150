use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::models::Student;
use crate::roster::RosterStore;

use super::files::{read_records, write_records, LoadReport};
use super::record::{expect_fields, join_fields, parse_number, RecordError};

pub const STUDENTS_HEADER: &str = "id,name,gpa";

/// Replace the roster with the students in `path`, keeping file order.
/// Malformed rows, out-of-range GPAs, and repeated ids are skipped.
pub fn load_students(store: &mut RosterStore, path: &Path) -> Result<LoadReport> {
    let mut students = Vec::new();
    let mut report = read_records(path, STUDENTS_HEADER, |line| {
        students.push(parse_student(line)?);
        Ok(())
    })?;

    let rejected = store.replace_all(students);
    for err in &rejected {
        warn!(path = %path.display(), error = %err, "skipping student");
    }
    report.loaded -= rejected.len();
    report.skipped += rejected.len();

    info!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped,
        "loaded students"
    );
    Ok(report)
}

/// Write every student in roster order. Grades go to the results file.
pub fn save_students(store: &RosterStore, path: &Path) -> Result<usize> {
    let rows = store.students().map(|student| {
        let gpa = student.gpa().to_string();
        join_fields([student.id(), student.name(), gpa.as_str()])
    });
    let written = write_records(path, STUDENTS_HEADER, rows)?;
    info!(path = %path.display(), written, "saved students");
    Ok(written)
}

fn parse_student(line: &str) -> Result<Student, RecordError> {
    let [id, name, gpa] = expect_fields::<3>(line)?;
    let gpa = parse_number("gpa", &gpa)?;
    Ok(Student::new(id, name, gpa)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_student_keeps_text_verbatim() {
        let student = parse_student("S1,\" Ada Lovelace \", 3.75").unwrap();
        assert_eq!(student.id(), "S1");
        assert_eq!(student.name(), " Ada Lovelace ");
        assert_eq!(student.gpa(), 3.75);

        let unnamed = parse_student("S2,,1.0").unwrap();
        assert_eq!(unnamed.name(), "");
    }

    #[test]
    fn test_parse_student_rejects_bad_rows() {
        assert!(matches!(
            parse_student("S1,Ada"),
            Err(RecordError::FieldCount { expected: 3, found: 2 })
        ));
        assert!(matches!(
            parse_student("S1,Ada,high"),
            Err(RecordError::Number { field: "gpa", .. })
        ));
        assert!(matches!(
            parse_student("S1,Ada,9.9"),
            Err(RecordError::Rejected(RosterError::InvalidRange { .. }))
        ));
    }
}
