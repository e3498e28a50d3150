//! Behaviour of the roster store through its public API: membership, range
//! checks, search, sorting, and the aggregate queries.

use pretty_assertions::assert_eq;
use student_roster_manager::{Course, RangeField, RosterError, RosterStore, Student};

fn roster(entries: &[(&str, &str, f64)]) -> RosterStore {
    let mut store = RosterStore::new();
    for (id, name, gpa) in entries {
        store.add_by_fields(*id, *name, *gpa).unwrap();
    }
    store
}

fn ids(store: &RosterStore) -> Vec<String> {
    store.students().map(|s| s.id().to_string()).collect()
}

#[test]
fn test_distinct_adds_are_all_findable() {
    let entries = [
        ("S07", "Tolu", 3.1),
        ("S02", "Amara", 4.0),
        ("S11", "Chidi", 2.2),
        ("S05", "Bisi", 4.9),
        ("S01", "Eze", 0.0),
    ];
    let mut store = roster(&entries);
    assert_eq!(store.len(), entries.len());

    for (id, name, _) in entries {
        assert_eq!(store.linear_search(id).map(Student::name), Some(name));
        assert_eq!(store.binary_search(id).map(Student::name), Some(name));
    }
}

#[test]
fn test_duplicate_add_leaves_roster_unchanged() {
    let mut store = roster(&[("S1", "Ada", 3.0)]);

    let err = store.add_by_fields("S1", "Impostor", 4.0).unwrap_err();

    assert_eq!(err, RosterError::DuplicateId("S1".to_string()));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("S1").map(Student::name), Some("Ada"));
}

#[test]
fn test_add_by_fields_rejects_out_of_range_gpa() {
    let mut store = RosterStore::new();
    let err = store.add_by_fields("S1", "Ada", 5.5).unwrap_err();
    assert!(matches!(
        err,
        RosterError::InvalidRange {
            field: RangeField::Gpa,
            ..
        }
    ));
    assert!(store.is_empty());
}

#[test]
fn test_update_gpa_out_of_range_keeps_old_value() {
    let mut store = roster(&[("S1", "Ada", 3.0)]);

    for bad in [-0.1, 5.01, f64::NAN, f64::INFINITY] {
        let err = store.update_gpa("S1", bad).unwrap_err();
        assert!(matches!(err, RosterError::InvalidRange { .. }));
        assert_eq!(store.get("S1").map(Student::gpa), Some(3.0));
    }

    store.update_gpa("S1", 4.25).unwrap();
    assert_eq!(store.get("S1").map(Student::gpa), Some(4.25));
}

#[test]
fn test_update_gpa_unknown_id() {
    let mut store = RosterStore::new();
    assert_eq!(
        store.update_gpa("S9", 3.0),
        Err(RosterError::NotFound("S9".to_string()))
    );
}

#[test]
fn test_rename_keeps_identity() {
    let mut store = roster(&[("S1", "Ada", 3.0)]);
    store.rename("S1", "Ada Lovelace").unwrap();
    assert_eq!(store.get("S1").map(Student::name), Some("Ada Lovelace"));
    assert_eq!(
        store.rename("S2", "Nobody"),
        Err(RosterError::NotFound("S2".to_string()))
    );
}

#[test]
fn test_remove_absent_id_is_noop() {
    let mut store = roster(&[("S1", "Ada", 3.0), ("S2", "Bo", 2.0)]);

    assert!(store.remove("S9").is_none());

    assert_eq!(ids(&store), vec!["S1", "S2"]);
}

#[test]
fn test_remove_discards_grades() {
    let mut store = roster(&[("S1", "Ada", 3.0), ("S2", "Bo", 2.0)]);
    store.add_result("S1", "C1", 90.0).unwrap();
    store.add_result("S2", "C1", 70.0).unwrap();

    let removed = store.remove("S1").unwrap();

    assert_eq!(removed.grade("C1"), Some(90.0));
    assert!(store.linear_search("S1").is_none());
    assert_eq!(store.class_average("C1"), Ok(70.0));

    // The id is free again.
    store.add_by_fields("S1", "Ada", 3.0).unwrap();
    assert!(store.get("S1").unwrap().grades().is_empty());
}

#[test]
fn test_add_result_checks() {
    let mut store = roster(&[("S1", "Ada", 3.0)]);

    assert_eq!(
        store.add_result("S2", "C1", 50.0),
        Err(RosterError::NotFound("S2".to_string()))
    );
    assert!(matches!(
        store.add_result("S1", "C1", 100.5),
        Err(RosterError::InvalidRange {
            field: RangeField::Score,
            ..
        })
    ));
    assert!(store.get("S1").unwrap().grades().is_empty());

    store.add_result("S1", "C1", 40.0).unwrap();
    store
        .record_course_result("S1", &Course::new("C1", "Intro", 3), 65.0)
        .unwrap();
    assert_eq!(store.get("S1").and_then(|s| s.grade("C1")), Some(65.0));
}

#[test]
fn test_sort_by_id_then_binary_search() {
    let mut store = roster(&[
        ("M", "m", 1.0),
        ("C", "c", 1.0),
        ("X", "x", 1.0),
        ("A", "a", 1.0),
        ("Q", "q", 1.0),
    ]);

    store.sort_by_id_ascending();
    let sorted = ids(&store);
    assert!(sorted.windows(2).all(|pair| pair[0] < pair[1]));

    for id in ["A", "C", "M", "Q", "X"] {
        assert!(store.binary_search(id).is_some(), "{id} should be found");
    }
    for id in ["B", "Z", "", "a", "MM"] {
        assert!(store.binary_search(id).is_none(), "{id} should be absent");
    }
}

#[test]
fn test_binary_search_reorders_roster() {
    let mut store = roster(&[("S3", "c", 1.0), ("S1", "a", 1.0), ("S2", "b", 1.0)]);

    assert_eq!(store.linear_search("S2").map(Student::name), Some("b"));
    assert_eq!(ids(&store), vec!["S3", "S1", "S2"]);

    assert_eq!(store.binary_search("S2").map(Student::name), Some("b"));
    assert_eq!(ids(&store), vec!["S1", "S2", "S3"]);
}

#[test]
fn test_sort_by_gpa_descending_puts_max_first_and_is_stable() {
    let mut store = roster(&[
        ("S1", "a", 3.2),
        ("S2", "b", 4.7),
        ("S3", "c", 3.2),
        ("S4", "d", 4.7),
        ("S5", "e", 1.0),
    ]);

    store.sort_by_gpa_descending();

    assert_eq!(ids(&store), vec!["S2", "S4", "S1", "S3", "S5"]);
    let max = store.students().map(Student::gpa).fold(f64::MIN, f64::max);
    assert_eq!(store.students().next().map(Student::gpa), Some(max));
}

#[test]
fn test_negative_zero_gpa_is_stored_as_zero() {
    let mut store = roster(&[("S1", "A", -0.0), ("S2", "B", 0.0)]);

    store.sort_by_gpa_descending();

    assert_eq!(ids(&store), vec!["S1", "S2"]);
    assert_eq!(store.top_performer_by_gpa().map(Student::id), Some("S1"));
    assert!(store.get("S1").unwrap().gpa().is_sign_positive());

    store.update_gpa("S2", -0.0).unwrap();
    assert!(store.get("S2").unwrap().gpa().is_sign_positive());
}

#[test]
fn test_contains_tracks_membership() {
    let mut store = roster(&[("S1", "Ada", 3.0)]);
    assert!(store.contains("S1"));
    assert!(!store.contains("S2"));

    store.remove("S1");
    assert!(!store.contains("S1"));
}

#[test]
fn test_sort_by_name_then_lookup_still_works() {
    let mut store = roster(&[("S1", "Zara", 3.0), ("S2", "Abe", 2.0), ("S3", "Mo", 1.0)]);

    store.sort_by_name();

    assert_eq!(ids(&store), vec!["S2", "S3", "S1"]);
    assert_eq!(store.get("S1").map(Student::name), Some("Zara"));
    store.update_gpa("S3", 2.5).unwrap();
    assert_eq!(store.students().nth(1).map(Student::gpa), Some(2.5));
}

#[test]
fn test_class_average_excludes_students_without_course() {
    let mut store = roster(&[
        ("S1", "a", 1.0),
        ("S2", "b", 1.0),
        ("S3", "c", 1.0),
        ("S4", "d", 1.0),
    ]);
    store.add_result("S1", "X", 70.0).unwrap();
    store.add_result("S2", "X", 80.0).unwrap();
    store.add_result("S3", "X", 90.0).unwrap();
    store.add_result("S4", "Y", 10.0).unwrap();

    assert_eq!(store.class_average("X"), Ok(80.0));
    assert_eq!(
        store.class_average("Z"),
        Err(RosterError::NoData("Z".to_string()))
    );
}

#[test]
fn test_top_performer_scenario() {
    let mut store = RosterStore::new();
    store.add(Student::new("S1", "A", 3.0).unwrap()).unwrap();
    store.add(Student::new("S2", "B", 4.5).unwrap()).unwrap();

    assert_eq!(store.top_performer_by_gpa().map(Student::id), Some("S2"));

    store.add_result("S1", "C1", 90.0).unwrap();
    store.add_result("S2", "C1", 80.0).unwrap();

    assert_eq!(store.class_average("C1"), Ok(85.0));
    assert_eq!(
        store.top_performer_by_average_score().map(Student::id),
        Some("S1")
    );
}

#[test]
fn test_empty_roster_analytics() {
    let store = RosterStore::new();

    assert!(store.top_performer_by_gpa().is_none());
    assert!(store.top_performer_by_average_score().is_none());
    assert_eq!(
        store.class_average("C1"),
        Err(RosterError::NoData("C1".to_string()))
    );
}
