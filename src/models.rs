//! Domain records handed between the roster core, the storage layer, and the
//! TUI. Fields stay private so the range invariants on GPA and scores can only
//! be reached through the checked constructors and setters below.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{check_range, RangeField, Result};

#[derive(Debug, Clone, PartialEq)]
/// A single student on the roster.
pub struct Student {
    /// Unique, immutable identity.
    id: String,
    name: String,
    /// Always inside `0.0..=5.0`.
    gpa: f64,
    /// Course code to score. A sorted map keeps table rows and saved files in
    /// a stable order; the roster itself attaches no meaning to that order.
    grades: BTreeMap<String, f64>,
}

impl Student {
    /// Build a student with no grades. Fails with `InvalidRange` when the GPA
    /// is outside `0.0..=5.0`.
    pub fn new(id: impl Into<String>, name: impl Into<String>, gpa: f64) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            gpa: check_range(RangeField::Gpa, gpa)?,
            grades: BTreeMap::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gpa(&self) -> f64 {
        self.gpa
    }

    pub fn grades(&self) -> &BTreeMap<String, f64> {
        &self.grades
    }

    pub fn grade(&self, course_code: &str) -> Option<f64> {
        self.grades.get(course_code).copied()
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the GPA, leaving the old value untouched if the new one is out
    /// of range.
    pub(crate) fn set_gpa(&mut self, gpa: f64) -> Result<()> {
        self.gpa = check_range(RangeField::Gpa, gpa)?;
        Ok(())
    }

    /// Record or overwrite the score for `course_code`.
    pub fn set_grade(&mut self, course_code: impl Into<String>, score: f64) -> Result<()> {
        let score = check_range(RangeField::Score, score)?;
        self.grades.insert(course_code.into(), score);
        Ok(())
    }

    /// Mean of every recorded score, or `None` when the student has no grades.
    pub fn average_score(&self) -> Option<f64> {
        if self.grades.is_empty() {
            return None;
        }
        let total: f64 = self.grades.values().sum();
        Some(total / self.grades.len() as f64)
    }
}

impl fmt::Display for Student {
    /// `S1 - Ada Lovelace | GPA: 4.50`, the one-line form used in dialogs and
    /// the summary panel.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} | GPA: {:.2}", self.id, self.name, self.gpa)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Course details supplied when recording a result. Only the code is stored on
/// the student; name and credits are carried for the caller's benefit.
pub struct Course {
    pub code: String,
    pub name: String,
    pub credits: u32,
}

impl Course {
    pub fn new(code: impl Into<String>, name: impl Into<String>, credits: u32) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            credits,
        }
    }
}
