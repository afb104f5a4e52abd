//! Interactive launcher: search box, result list, details pane and a
//! dialog for choosing the history database.
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::App;
use terminal::TerminalManager;

use crate::config::PreferenceStore;
use crate::launch::Launcher;
use crate::session::Session;

/// Run the interactive TUI until the user quits
pub fn run_interactive(
    session: Session,
    launcher: Launcher,
    preferences: Box<dyn PreferenceStore>,
) -> Result<()> {
    let mut manager = TerminalManager::new()?;
    let mut app = App::new(session, launcher, preferences);

    let result = app.run(manager.terminal_mut());

    manager.restore()?;
    result
}
