//! Aggregate queries over the roster.

use crate::error::{RosterError, Result};
use crate::models::Student;

use super::store::RosterStore;

/// Ranking value for a student without any grades. It sits below every real
/// average so such students only win when nobody has grades.
pub const NO_GRADES_AVERAGE: f64 = -1.0;

impl RosterStore {
    /// Mean score for `course_code` across the students who took it. Students
    /// without the course are left out rather than counted as zero.
    pub fn class_average(&self, course_code: &str) -> Result<f64> {
        let (total, count) = self
            .students()
            .filter_map(|student| student.grade(course_code))
            .fold((0.0, 0usize), |(total, count), score| (total + score, count + 1));

        if count == 0 {
            return Err(RosterError::NoData(course_code.to_string()));
        }
        Ok(total / count as f64)
    }

    /// Student with the highest GPA; the earliest one wins a tie.
    pub fn top_performer_by_gpa(&self) -> Option<&Student> {
        first_max_by_key(self.students(), Student::gpa)
    }

    /// Student with the highest mean score; the earliest one wins a tie.
    pub fn top_performer_by_average_score(&self) -> Option<&Student> {
        first_max_by_key(self.students(), |student| {
            student.average_score().unwrap_or(NO_GRADES_AVERAGE)
        })
    }
}

/// Like `Iterator::max_by`, but keeps the first of several equal maxima.
fn first_max_by_key<'a, I, F>(students: I, key: F) -> Option<&'a Student>
where
    I: Iterator<Item = &'a Student>,
    F: Fn(&Student) -> f64,
{
    students
        .fold(None, |best: Option<(&'a Student, f64)>, student| {
            let value = key(student);
            match best {
                Some((_, best_value)) if best_value >= value => best,
                _ => Some((student, value)),
            }
        })
        .map(|(student, _)| student)
}
