//! TUI application state and event handling.
//!
//! - **Fuzzy search**: every keystroke re-ranks the session's entries
//! - **Background reads**: history reads run on a worker thread and come back
//!   over a channel, tagged with the ticket they were started under
//! - **Location dialog**: verifies a new database path before saving it
//! - **Status messages**: transient feedback for launches, copies and errors
//! - **Dirty state tracking**: redraw only when state changes (or every 100ms)

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::warn;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::{ClipboardProvider, copy_uri, copy_uri_with};
use crate::config::{PreferenceStore, Verification};
use crate::launch::Launcher;
use crate::models::ClassifiedEntry;
use crate::session::{RefreshOutcome, RefreshTicket, Session};
use crate::store::ReadError;
use crate::utils::sanitize_for_display;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;

/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;

/// Maximum search query length (bytes)
const MAX_QUERY_LEN: usize = 256;

/// Maximum location input length in the dialog (bytes)
const MAX_LOCATION_LEN: usize = 4096;

/// Rows moved by PageUp/PageDown
const PAGE_SIZE: isize = 10;

type RefreshResult = (RefreshTicket, Result<Vec<ClassifiedEntry>, ReadError>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Database location editor
#[derive(Debug, Clone, Default)]
pub struct LocationDialog {
    pub input: String,
    /// Why the last submitted location was rejected
    pub diagnostic: Option<String>,
}

pub struct App {
    session: Session,
    launcher: Launcher,
    preferences: Box<dyn PreferenceStore>,
    // `None` uses the system clipboard
    clipboard: Option<Box<dyn ClipboardProvider>>,
    search_query: String,
    // Positions into the session's entries, best match first
    results: Vec<usize>,
    selected_idx: usize,
    should_quit: bool,
    dialog: Option<LocationDialog>,
    status_message: Option<StatusMessage>,
    refresh_tx: Sender<RefreshResult>,
    refresh_rx: Receiver<RefreshResult>,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    /// Build the app and start loading the session's location, if any.
    /// Without a location the dialog opens straight away.
    pub fn new(session: Session, launcher: Launcher, preferences: Box<dyn PreferenceStore>) -> Self {
        let (refresh_tx, refresh_rx) = mpsc::channel();
        let mut app = Self {
            session,
            launcher,
            preferences,
            clipboard: None,
            search_query: String::new(),
            results: Vec::new(),
            selected_idx: 0,
            should_quit: false,
            dialog: None,
            status_message: None,
            refresh_tx,
            refresh_rx,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        };

        app.recompute_results();
        if app.session.location().is_some() {
            app.start_refresh();
        } else {
            app.open_dialog();
        }
        app
    }

    /// Use `provider` instead of the system clipboard
    pub fn with_clipboard(mut self, provider: Box<dyn ClipboardProvider>) -> Self {
        self.clipboard = Some(provider);
        self
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Error, STATUS_ERROR_DURATION_MS);
    }

    fn set_success(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Success, STATUS_SUCCESS_DURATION_MS);
    }

    fn check_and_clear_expired_status(&mut self) {
        let expired =
            self.status_message.as_ref().is_some_and(|msg| Instant::now() >= msg.expires_at);
        if expired {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();
            self.drain_refresh_results();

            // Periodic redraw also picks up terminal resizes
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100)
            {
                terminal.draw(|f| render_ui(f, &self.render_state()))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn render_state(&self) -> RenderState<'_> {
        let entries = self.session.entries();
        RenderState {
            search_query: &self.search_query,
            results: self.results.iter().filter_map(|&pos| entries.get(pos)).collect(),
            selected_idx: self.selected_idx,
            total_count: entries.len(),
            session_status: self.session.status(),
            location: self.session.location(),
            dialog: self.dialog.as_ref(),
            status_message: self.status_message.as_ref(),
        }
    }

    fn selected_entry(&self) -> Option<&ClassifiedEntry> {
        self.results.get(self.selected_idx).and_then(|&pos| self.session.entries().get(pos))
    }

    /// Read the current location on a worker thread
    fn start_refresh(&mut self) {
        let Some(ticket) = self.session.begin_refresh() else {
            self.set_error("✗ No database location configured (Ctrl+O to set one)");
            return;
        };
        self.needs_redraw = true;

        let tx = self.refresh_tx.clone();
        let worker_ticket = ticket.clone();
        let spawned = thread::Builder::new().name("history-reader".to_string()).spawn(move || {
            let result = worker_ticket.fetch();
            // Receiver gone means the app already exited
            let _ = tx.send((worker_ticket, result));
        });

        if let Err(e) = spawned {
            warn!(error = %e, "Failed to spawn reader thread, reading inline");
            let result = ticket.fetch();
            self.apply_refresh(ticket, result);
        }
    }

    fn drain_refresh_results(&mut self) {
        while let Ok((ticket, result)) = self.refresh_rx.try_recv() {
            self.apply_refresh(ticket, result);
        }
    }

    fn apply_refresh(&mut self, ticket: RefreshTicket, result: Result<Vec<ClassifiedEntry>, ReadError>) {
        match self.session.complete_refresh(ticket, result) {
            RefreshOutcome::Applied { .. } => {
                self.recompute_results();
                self.needs_redraw = true;
            }
            RefreshOutcome::Failed { reason } => {
                self.recompute_results();
                self.set_error(format!("✗ {}", reason));
            }
            RefreshOutcome::Stale => {}
        }
    }

    fn recompute_results(&mut self) {
        self.results = self.session.search(&self.search_query).into_iter().map(|hit| hit.position).collect();
        self.selected_idx = 0;
        self.needs_redraw = true;
    }

    fn handle_action(&mut self, action: Action) {
        if self.dialog.is_some() {
            self.handle_dialog_action(action);
            return;
        }

        let total = self.results.len();
        match action {
            Action::Quit => self.should_quit = true,
            Action::Cancel => {
                if self.search_query.is_empty() {
                    self.should_quit = true;
                } else {
                    self.search_query.clear();
                    self.recompute_results();
                }
            }
            Action::MoveUp => self.move_selection(-1, total),
            Action::MoveDown => self.move_selection(1, total),
            Action::PageUp => self.move_selection(-PAGE_SIZE, total),
            Action::PageDown => self.move_selection(PAGE_SIZE, total),
            Action::Submit => self.launch_selected(),
            Action::CopyToClipboard => self.copy_selected(),
            Action::OpenSettings => self.open_dialog(),
            Action::Refresh => self.start_refresh(),
            Action::Input(c) => self.update_search(c),
            Action::DeleteChar => self.delete_char(),
            Action::Paste(text) => {
                for c in sanitize_for_display(&text).chars() {
                    self.update_search(c);
                }
            }
            Action::None => {}
        }
    }

    fn handle_dialog_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Cancel => {
                self.dialog = None;
                self.needs_redraw = true;
            }
            Action::Submit => self.submit_dialog(),
            Action::Input(c) => self.edit_dialog(|input| {
                if input.len() < MAX_LOCATION_LEN {
                    input.push(c);
                }
            }),
            Action::Paste(text) => self.edit_dialog(|input| {
                let pasted = sanitize_for_display(&text);
                let room = MAX_LOCATION_LEN.saturating_sub(input.len());
                input.extend(pasted.chars().scan(0, |used, c| {
                    *used += c.len_utf8();
                    (*used <= room).then_some(c)
                }));
            }),
            Action::DeleteChar => self.edit_dialog(|input| {
                input.pop();
            }),
            _ => {}
        }
    }

    fn edit_dialog(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some(dialog) = self.dialog.as_mut() {
            edit(&mut dialog.input);
            dialog.diagnostic = None;
            self.needs_redraw = true;
        }
    }

    fn open_dialog(&mut self) {
        let input = self
            .session
            .location()
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        self.dialog = Some(LocationDialog { input, diagnostic: None });
        self.needs_redraw = true;
    }

    /// Verify the dialog input; save and reload only if it checks out
    fn submit_dialog(&mut self) {
        let Some(input) = self.dialog.as_ref().map(|dialog| dialog.input.clone()) else {
            return;
        };

        let diagnostic = match self.session.apply_location(&input, self.preferences.as_mut()) {
            Ok(Verification::Valid { entry_count }) => {
                self.dialog = None;
                self.start_refresh();
                self.set_success(format!("✓ Location saved ({} folders)", entry_count));
                return;
            }
            Ok(Verification::Invalid { reason }) => reason,
            Err(e) => format!("Could not save location: {:#}", e),
        };

        if let Some(dialog) = self.dialog.as_mut() {
            dialog.diagnostic = Some(diagnostic);
        }
        self.needs_redraw = true;
    }

    fn launch_selected(&mut self) {
        let Some(entry) = self.selected_entry() else {
            self.set_error("✗ No folder selected");
            return;
        };
        let uri = entry.folder_uri.clone();
        let name = sanitize_for_display(entry.display_name());

        match self.launcher.launch(&uri) {
            Ok(()) => self.set_success(format!("✓ Opening {}", name)),
            Err(e) => self.set_error(format!("✗ {}", e)),
        }
    }

    fn copy_selected(&mut self) {
        let Some(uri) = self.selected_entry().map(|entry| entry.folder_uri.clone()) else {
            self.set_error("✗ No folder selected");
            return;
        };

        let result = match self.clipboard.as_mut() {
            Some(provider) => copy_uri_with(&uri, provider.as_mut()),
            None => copy_uri(&uri),
        };
        match result {
            Ok(()) => self.set_success("✓ Copied folder URI"),
            Err(e) => self.set_error(format!("✗ Clipboard error: {}", e)),
        }
    }

    fn move_selection(&mut self, delta: isize, total: usize) {
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = self.selected_idx.saturating_add_signed(delta);
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    fn update_search(&mut self, c: char) {
        if self.search_query.len() < MAX_QUERY_LEN {
            self.search_query.push(c);
            self.recompute_results();
        }
    }

    fn delete_char(&mut self) {
        if self.search_query.pop().is_some() {
            self.recompute_results();
        }
    }
}
