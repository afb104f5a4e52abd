use std::fmt;

use serde::Serialize;

use super::history::WorkspaceIdentity;

pub const DEV_CONTAINER_PREFIX: &str = "vscode-remote://dev-container";
pub const WSL_PREFIX: &str = "vscode-remote://wsl";
pub const SSH_PREFIX: &str = "vscode-remote://ssh-remote";
pub const REMOTE_SCHEME_PREFIX: &str = "vscode-remote://";

/// A folder entry ready for display and search.
///
/// Built once per refresh by the classifier and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedEntry {
    pub folder_uri: String,
    pub folder_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_authority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceIdentity>,
    pub is_dev_container: bool,
    #[serde(rename = "isWSL")]
    pub is_wsl: bool,
    #[serde(rename = "isSSH")]
    pub is_ssh: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConnectionKind {
    Local,
    DevContainer,
    Wsl,
    Ssh,
    OtherRemote,
}

impl ConnectionKind {
    pub const ALL: [ConnectionKind; 5] = [
        ConnectionKind::Local,
        ConnectionKind::DevContainer,
        ConnectionKind::Wsl,
        ConnectionKind::Ssh,
        ConnectionKind::OtherRemote,
    ];

    /// Suffix shown after the folder name in lists (empty for local folders)
    pub fn badge(self) -> &'static str {
        match self {
            ConnectionKind::Local => "",
            ConnectionKind::DevContainer => "Dev Container",
            ConnectionKind::Wsl => "WSL",
            ConnectionKind::Ssh => "Remote SSH",
            ConnectionKind::OtherRemote => "Remote",
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionKind::Local => f.pad("Local"),
            other => f.pad(other.badge()),
        }
    }
}

impl ClassifiedEntry {
    /// Collapse the independent flags into a single kind for display.
    ///
    /// If more than one flag is set the first in dev-container, WSL, SSH
    /// order wins.
    pub fn kind(&self) -> ConnectionKind {
        if self.is_dev_container {
            ConnectionKind::DevContainer
        } else if self.is_wsl {
            ConnectionKind::Wsl
        } else if self.is_ssh {
            ConnectionKind::Ssh
        } else if self.folder_uri.starts_with(REMOTE_SCHEME_PREFIX) {
            ConnectionKind::OtherRemote
        } else {
            ConnectionKind::Local
        }
    }

    /// Name for list rows; falls back to the raw URI when no basename could be derived
    pub fn display_name(&self) -> &str {
        if self.folder_name.is_empty() { &self.folder_uri } else { &self.folder_name }
    }
}
