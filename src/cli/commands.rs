use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::config::{
    DATABASE_PATH_KEY, JsonPreferenceStore, PreferenceStore, Verification, resolve_location,
    verify, verify_input,
};
use crate::launch::{DEFAULT_EDITOR, Launcher, open_external_link};
use crate::logging::{self, LogTarget};
use crate::models::{ClassifiedEntry, ConnectionKind};
use crate::session::{Session, SessionStatus};
use crate::tui::run_interactive;
use crate::utils::{format_path_with_tilde, sanitize_for_display};

#[derive(Parser)]
#[command(name = "recent-workspaces")]
#[command(version)]
#[command(about = "Search and reopen recently used VS Code folders", long_about = None)]
pub struct Cli {
    /// History database to read for this run (not saved)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<String>,

    /// Editor command used to open folders
    #[arg(long, global = true, env = "RECENT_WORKSPACES_EDITOR", default_value = DEFAULT_EDITOR)]
    pub editor: String,

    /// Preferences file [default: <config dir>/recent-workspaces/preferences.json]
    #[arg(long, global = true, env = "RECENT_WORKSPACES_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List recent folders, most recent first
    List {
        /// Fuzzy filter on folder names
        #[arg(short, long)]
        query: Option<String>,
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open the best match for QUERY in the editor
    Open { query: String },
    /// Check whether PATH is a readable history database
    Verify { path: String },
    /// Show or change the saved database location
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Show statistics about the history
    Stats,
    /// Open a web link in the default browser
    Link { url: String },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the saved and effective database locations
    Show,
    /// Verify PATH and save it as the database location
    Set { path: String },
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let target = if cli.command.is_some() { LogTarget::Stderr } else { LogTarget::File };
    let _log_guard = logging::init(target, cli.verbose);

    let preferences = open_preferences(cli.config.as_deref())?;
    let location = resolve_location(cli.db.as_deref(), &preferences)?;
    debug!(location = ?location, "Resolved database location");

    match cli.command {
        None => {
            run_interactive(Session::new(location), Launcher::new(cli.editor), Box::new(preferences))?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::List { query, json }) => {
            list_entries(location, query.as_deref().unwrap_or(""), json)
        }
        Some(Commands::Open { query }) => open_best_match(location, &query, &cli.editor),
        Some(Commands::Verify { path }) => Ok(print_verification(&verify_input(&path))),
        Some(Commands::Config(ConfigCommand::Show)) => show_config(&preferences, location.as_deref()),
        Some(Commands::Config(ConfigCommand::Set { path })) => set_location(preferences, &path),
        Some(Commands::Stats) => show_stats(location),
        Some(Commands::Link { url }) => {
            open_external_link(&url)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open_preferences(path: Option<&Path>) -> Result<JsonPreferenceStore> {
    match path {
        Some(path) => Ok(JsonPreferenceStore::at(path)),
        None => JsonPreferenceStore::open_default(),
    }
}

/// Load entries for a one-shot command; unlike the TUI, read failures are fatal
fn load_session(location: Option<PathBuf>) -> Result<Session> {
    let session = Session::load(location);
    match session.status() {
        SessionStatus::NotConfigured => bail!(
            "No history database configured. Pass --db <PATH> or run `recent-workspaces config set <PATH>`"
        ),
        SessionStatus::Failed(reason) => bail!("Failed to read history: {}", reason),
        SessionStatus::Loading | SessionStatus::Ready => Ok(session),
    }
}

fn entry_row(entry: &ClassifiedEntry) -> String {
    let name = sanitize_for_display(entry.display_name());
    let uri = sanitize_for_display(&entry.folder_uri);
    format!("{:<32} {:<14} {}", name, entry.kind(), uri)
}

fn list_entries(location: Option<PathBuf>, query: &str, json: bool) -> Result<ExitCode> {
    let session = load_session(location)?;
    let entries = session.filter(query);

    if json {
        let output = serde_json::to_string_pretty(&entries).context("Failed to serialize entries")?;
        println!("{}", output);
    } else {
        for entry in &entries {
            println!("{}", entry_row(entry));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn open_best_match(location: Option<PathBuf>, query: &str, editor: &str) -> Result<ExitCode> {
    let session = load_session(location)?;
    let Some(entry) = session.filter(query).into_iter().next() else {
        bail!("No folder matches '{}'", query);
    };

    Launcher::new(editor).launch(&entry.folder_uri)?;
    println!("Opening {} ({})", sanitize_for_display(entry.display_name()), entry.kind());
    Ok(ExitCode::SUCCESS)
}

fn print_verification(verification: &Verification) -> ExitCode {
    println!("{}", verification);
    if verification.is_valid() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn show_config(preferences: &JsonPreferenceStore, effective: Option<&Path>) -> Result<ExitCode> {
    let saved = preferences.get(DATABASE_PATH_KEY)?;

    println!("Preferences file: {}", format_path_with_tilde(preferences.path()));
    println!("Saved location:   {}", saved.as_deref().unwrap_or("not set"));
    match effective {
        Some(path) => {
            println!("In use:           {}", format_path_with_tilde(path));
            println!("Status:           {}", verify(path));
        }
        None => println!("In use:           not configured"),
    }

    Ok(ExitCode::SUCCESS)
}

fn set_location(mut preferences: JsonPreferenceStore, raw: &str) -> Result<ExitCode> {
    let mut session = Session::new(None);
    let verification = session.apply_location(raw, &mut preferences)?;

    match verification {
        Verification::Valid { entry_count } => {
            let saved = session.location().map(format_path_with_tilde).unwrap_or_default();
            println!("Saved {} ({} folders)", saved, entry_count);
            Ok(ExitCode::SUCCESS)
        }
        Verification::Invalid { reason } => {
            eprintln!("Not saved: {}", reason);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn show_stats(location: Option<PathBuf>) -> Result<ExitCode> {
    let session = load_session(location)?;
    let entries = session.entries();

    println!("Recent Folder Statistics");
    println!("========================");
    println!("Total folders: {}", entries.len());
    for kind in ConnectionKind::ALL {
        let count = entries.iter().filter(|entry| entry.kind() == kind).count();
        println!("  {}: {}", kind, count);
    }
    let unnamed = entries.iter().filter(|entry| entry.folder_name.is_empty()).count();
    if unnamed > 0 {
        println!("  Unnamed: {}", unnamed);
    }
    println!();
    if let Some(location) = session.location() {
        println!("Database: {}", format_path_with_tilde(location));
    }

    Ok(ExitCode::SUCCESS)
}
