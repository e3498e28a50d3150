//! Core library surface for the Student Roster Manager.
//!
//! The roster core (`models`, `algorithms`, `roster`, `error`) has no I/O and
//! never logs. `storage`, `config`, `logging` and `ui` are the collaborators
//! the `bin` target wires around it.
pub mod algorithms;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod roster;
pub mod storage;
pub mod ui;

/// Typed failures of the roster core.
pub use error::{RangeField, RosterError};

/// The domain types other layers manipulate.
pub use models::{Course, Student};

pub use roster::RosterStore;

pub use config::Config;
pub use logging::init_logging;
pub use storage::{load_roster, save_roster};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
