//! Ratatui front-end: a roster table with modal forms for every roster
//! operation. All parsing of typed text and all user-facing wording lives
//! here; the roster only ever sees typed values.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
