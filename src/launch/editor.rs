use std::io;
use std::process::{Command, Stdio};
use std::thread;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Editor command used when none is configured
pub const DEFAULT_EDITOR: &str = "code";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no folder to open")]
    EmptyTarget,
    #[error("no editor command configured")]
    EmptyEditor,
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Starts a process without waiting on it (allows mocking in tests)
pub trait ProcessSpawner {
    fn spawn_detached(&mut self, program: &str, args: &[String]) -> io::Result<()>;
}

/// Real spawner using `std::process`
#[derive(Debug, Default)]
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn spawn_detached(&mut self, program: &str, args: &[String]) -> io::Result<()> {
        let mut command = Command::new(program);
        command.args(args).stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
        detach(&mut command);

        let mut child = command.spawn()?;
        let pid = child.id();
        debug!(pid, program, "Spawned editor process");

        // Reap in the background so exited shims do not linger as zombies
        thread::Builder::new().name("editor-reaper".to_string()).spawn(move || {
            match child.wait() {
                Ok(status) => debug!(pid, %status, "Editor process exited"),
                Err(e) => warn!(pid, error = %e, "Failed to reap editor process"),
            }
        })?;
        Ok(())
    }
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_command: &mut Command) {}

/// Opens folder URIs in the external editor
pub struct Launcher {
    editor: String,
    spawner: Box<dyn ProcessSpawner>,
}

impl Launcher {
    /// `editor` may carry extra arguments, e.g. `"codium --reuse-window"`
    pub fn new(editor: impl Into<String>) -> Self {
        Self::with_spawner(editor, Box::new(SystemSpawner))
    }

    pub fn with_spawner(editor: impl Into<String>, spawner: Box<dyn ProcessSpawner>) -> Self {
        Self { editor: editor.into(), spawner }
    }

    pub fn editor(&self) -> &str {
        &self.editor
    }

    /// Program and arguments that open `folder_uri`.
    ///
    /// On Windows the editor shim is a batch file, so it goes through `cmd /C`.
    pub fn command_for(&self, folder_uri: &str) -> Result<(String, Vec<String>), LaunchError> {
        let mut parts = self.editor.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(LaunchError::EmptyEditor)?;

        let mut args: Vec<String> = parts.collect();
        args.push("--folder-uri".to_string());
        args.push(folder_uri.to_string());

        if cfg!(windows) {
            let mut wrapped = vec!["/C".to_string(), program];
            wrapped.extend(args);
            Ok(("cmd".to_string(), wrapped))
        } else {
            Ok((program, args))
        }
    }

    /// Start the editor on `folder_uri`.
    ///
    /// Only spawning is checked: once the process has started, whatever the
    /// editor does with the folder is not observed.
    pub fn launch(&mut self, folder_uri: &str) -> Result<(), LaunchError> {
        let folder_uri = folder_uri.trim();
        if folder_uri.is_empty() {
            return Err(LaunchError::EmptyTarget);
        }

        let (program, args) = self.command_for(folder_uri)?;
        self.spawner
            .spawn_detached(&program, &args)
            .map_err(|source| LaunchError::Spawn { program: program.clone(), source })?;

        info!(folder_uri, editor = %self.editor, "Opened folder in editor");
        Ok(())
    }
}
