//! Binary entry point that glues the flat-file roster to the TUI: resolve the
//! data directory, start logging, load the roster, and drive the Ratatui event
//! loop until the user exits.
use student_roster_manager::{init_logging, load_roster, run_app, App, Config, RosterStore};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    config.ensure_data_dir()?;
    init_logging(&config)?;

    let mut roster = RosterStore::new();
    let load = load_roster(&mut roster, &config)?;
    if load.skipped() > 0 {
        warn!(skipped = load.skipped(), "some records could not be loaded");
    }
    info!(students = roster.len(), data_dir = %config.data_dir.display(), "roster ready");

    let mut app = App::new(config, roster, load);
    run_app(&mut app)
}
