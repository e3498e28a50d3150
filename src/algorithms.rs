//! Stateless search and sort routines over a sequence of students.
//!
//! Everything here is generic over `S: Borrow<Student>` so the same functions
//! work on owned `Vec<Student>` values and on the borrowed views the roster
//! store builds from its arena. None of them touch anything but the slice they
//! are handed.

use std::borrow::Borrow;

use crate::models::Student;

/// Scan front to back and return the first student whose id matches. Takes
/// any sequence, so callers can search without collecting first.
pub fn linear_search_by_id<S, I>(students: I, id: &str) -> Option<S>
where
    I: IntoIterator<Item = S>,
    S: Borrow<Student>,
{
    students.into_iter().find(|student| student.borrow().id() == id)
}

/// Binary search by id. `students` must already be sorted ascending by id; the
/// precondition is not re-checked and an unsorted slice gives an unreliable
/// answer.
pub fn binary_search_by_id<'a, S: Borrow<Student>>(students: &'a [S], id: &str) -> Option<&'a S> {
    students
        .binary_search_by(|student| student.borrow().id().cmp(id))
        .ok()
        .map(|idx| &students[idx])
}

/// Ascending lexicographic order on name. Equal names keep their relative
/// order.
pub fn sort_by_name<S: Borrow<Student>>(students: &mut [S]) {
    students.sort_by(|a, b| a.borrow().name().cmp(b.borrow().name()));
}

/// Highest GPA first. Equal GPAs keep their relative order.
pub fn sort_by_gpa_descending<S: Borrow<Student>>(students: &mut [S]) {
    students.sort_by(|a, b| b.borrow().gpa().total_cmp(&a.borrow().gpa()));
}

/// Ascending id order, the precondition for [`binary_search_by_id`].
pub fn sort_by_id_ascending<S: Borrow<Student>>(students: &mut [S]) {
    students.sort_by(|a, b| a.borrow().id().cmp(b.borrow().id()));
}
