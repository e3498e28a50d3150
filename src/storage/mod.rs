//! Flat-file persistence split across logical submodules. Students and their
//! grades live in two comma-separated files; the roster core never sees text.

mod files;
mod record;
mod results;
mod students;

use anyhow::Result;

use crate::config::Config;
use crate::roster::RosterStore;

pub use files::LoadReport;
pub use record::RecordError;
pub use results::{load_results, save_results, RESULTS_HEADER};
pub use students::{load_students, save_students, STUDENTS_HEADER};

/// Per-file outcome of [`load_roster`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterLoad {
    pub students: LoadReport,
    pub results: LoadReport,
}

impl RosterLoad {
    pub fn skipped(&self) -> usize {
        self.students.skipped + self.results.skipped
    }
}

/// Replace `store` with the students file, then layer the results file on top.
pub fn load_roster(store: &mut RosterStore, config: &Config) -> Result<RosterLoad> {
    let students = load_students(store, &config.students_file)?;
    let results = load_results(store, &config.results_file)?;
    Ok(RosterLoad { students, results })
}

/// Write both files, returning the number of student rows and result rows.
pub fn save_roster(store: &RosterStore, config: &Config) -> Result<(usize, usize)> {
    config.ensure_data_dir()?;
    let students = save_students(store, &config.students_file)?;
    let results = save_results(store, &config.results_file)?;
    Ok((students, results))
}
