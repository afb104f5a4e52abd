use serde::{Deserialize, Serialize};

/// Decoded value of the editor's recently-opened list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    pub entries: Vec<EntryDescriptor>,
}

impl RawDocument {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One item of the recently-opened list as the editor stores it.
///
/// Every field is optional: the list mixes folders, single files and
/// multi-root workspaces. Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDescriptor {
    #[serde(
        rename = "folderUri",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub folder_uri: Option<String>,
    #[serde(
        rename = "fileUri",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_uri: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,
    #[serde(
        rename = "remoteAuthority",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub remote_authority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceIdentity>,
}

impl EntryDescriptor {
    /// A descriptor is shown in the launcher only when it names a folder
    pub fn is_folder(&self) -> bool {
        self.folder_uri.as_deref().is_some_and(|uri| !uri.is_empty())
    }
}

/// Multi-root workspace identity (`.code-workspace` file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceIdentity {
    pub id: String,
    #[serde(rename = "configPath", default, skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
}
