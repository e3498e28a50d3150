//! In-memory roster split across logical submodules.

mod analytics;
mod store;

pub use analytics::NO_GRADES_AVERAGE;
pub use store::RosterStore;
