use std::collections::HashMap;

use crate::algorithms;
use crate::error::{RosterError, Result};
use crate::models::{Course, Student};

/// Stable position of a student inside the arena. Handles survive reordering;
/// a freed handle is only reused by a later insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Handle(usize);

/// Authoritative owner of the roster.
///
/// Students live in `slots`; `order` lists their handles in display order and
/// `index` maps each id to its handle. Sorting only permutes `order`, so the
/// id lookup never has to be rebuilt. Every insert goes through `insert` and
/// every removal through `remove`, which keep the three structures in step.
#[derive(Debug, Default)]
pub struct RosterStore {
    slots: Vec<Option<Student>>,
    free: Vec<Handle>,
    order: Vec<Handle>,
    index: HashMap<String, Handle>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Students in their current display order.
    pub fn students(&self) -> impl Iterator<Item = &Student> + '_ {
        self.order.iter().filter_map(|&handle| self.slot(handle))
    }

    /// Point lookup through the id index. Does not reorder anything.
    pub fn get(&self, id: &str) -> Option<&Student> {
        self.index.get(id).and_then(|&handle| self.slot(handle))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Append `student` to the end of the roster.
    pub fn add(&mut self, student: Student) -> Result<()> {
        if self.contains(student.id()) {
            return Err(RosterError::DuplicateId(student.id().to_string()));
        }
        self.insert(student);
        Ok(())
    }

    /// Build a student from its fields and add it.
    pub fn add_by_fields(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        gpa: f64,
    ) -> Result<()> {
        self.add(Student::new(id, name, gpa)?)
    }

    pub fn update_gpa(&mut self, id: &str, gpa: f64) -> Result<()> {
        self.student_mut(id)?.set_gpa(gpa)
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<()> {
        self.student_mut(id)?.set_name(name);
        Ok(())
    }

    /// Drop the student and all of its grades. Removing an unknown id is a
    /// no-op and returns `None`.
    pub fn remove(&mut self, id: &str) -> Option<Student> {
        let handle = self.index.remove(id)?;
        self.order.retain(|&h| h != handle);
        let student = self.slots.get_mut(handle.0).and_then(Option::take);
        self.free.push(handle);
        student
    }

    /// Record or overwrite `course_code` for the student.
    pub fn add_result(&mut self, student_id: &str, course_code: &str, score: f64) -> Result<()> {
        self.student_mut(student_id)?.set_grade(course_code, score)
    }

    /// Same as [`RosterStore::add_result`], taking the course details a form
    /// collects. Only the course code is kept.
    pub fn record_course_result(
        &mut self,
        student_id: &str,
        course: &Course,
        score: f64,
    ) -> Result<()> {
        self.add_result(student_id, &course.code, score)
    }

    pub fn linear_search(&self, id: &str) -> Option<&Student> {
        algorithms::linear_search_by_id(self.students(), id)
    }

    /// Binary search by id.
    ///
    /// The roster is sorted by id first and stays in that order afterwards, so
    /// callers displaying the roster will see it reordered.
    pub fn binary_search(&mut self, id: &str) -> Option<&Student> {
        let found = self.reorder(|view| {
            algorithms::sort_by_id_ascending(view);
            algorithms::binary_search_by_id(view, id).is_some()
        });
        if found {
            self.get(id)
        } else {
            None
        }
    }

    pub fn sort_by_name(&mut self) {
        self.reorder(|view| algorithms::sort_by_name(view));
    }

    pub fn sort_by_gpa_descending(&mut self) {
        self.reorder(|view| algorithms::sort_by_gpa_descending(view));
    }

    pub fn sort_by_id_ascending(&mut self) {
        self.reorder(|view| algorithms::sort_by_id_ascending(view));
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.order.clear();
        self.index.clear();
    }

    /// Replace the whole roster with `students`, in the given order. Records
    /// that cannot be added are skipped and their errors returned so a loader
    /// can report them without aborting the batch.
    pub fn replace_all<I>(&mut self, students: I) -> Vec<RosterError>
    where
        I: IntoIterator<Item = Student>,
    {
        self.clear();
        students
            .into_iter()
            .filter_map(|student| self.add(student).err())
            .collect()
    }

    fn insert(&mut self, student: Student) {
        let id = student.id().to_string();
        let handle = match self.free.pop() {
            Some(handle) => {
                self.slots[handle.0] = Some(student);
                handle
            }
            None => {
                self.slots.push(Some(student));
                Handle(self.slots.len() - 1)
            }
        };
        self.order.push(handle);
        self.index.insert(id, handle);
    }

    fn slot(&self, handle: Handle) -> Option<&Student> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    fn student_mut(&mut self, id: &str) -> Result<&mut Student> {
        let handle = *self
            .index
            .get(id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))?;
        self.slots
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))
    }

    /// Run `f` over a borrowed view of the roster in display order and adopt
    /// whatever order it leaves the view in.
    fn reorder<R>(&mut self, f: impl FnOnce(&mut [&Student]) -> R) -> R {
        let mut view: Vec<&Student> = self.students().collect();
        let outcome = f(&mut view);
        let order: Vec<Handle> = view
            .iter()
            .filter_map(|student| self.index.get(student.id()).copied())
            .collect();
        self.order = order;
        outcome
    }
}
