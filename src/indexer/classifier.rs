use percent_encoding::percent_decode_str;
use url::Url;

use crate::models::entry::{DEV_CONTAINER_PREFIX, SSH_PREFIX, WSL_PREFIX};
use crate::models::{ClassifiedEntry, EntryDescriptor, RawDocument};

/// Keep the folder entries of `document` and derive their display data.
///
/// File-only and empty descriptors are dropped. Output order matches the
/// stored order.
pub fn classify(document: &RawDocument) -> Vec<ClassifiedEntry> {
    document.entries.iter().filter_map(classify_entry).collect()
}

/// Classify one descriptor, or `None` if it does not name a folder
pub fn classify_entry(descriptor: &EntryDescriptor) -> Option<ClassifiedEntry> {
    let folder_uri = descriptor.folder_uri.as_deref().filter(|uri| !uri.is_empty())?;

    Some(ClassifiedEntry {
        folder_uri: folder_uri.to_string(),
        folder_name: folder_name_from_uri(folder_uri),
        label: descriptor.label.clone(),
        remote_authority: descriptor.remote_authority.clone(),
        workspace: descriptor.workspace.clone(),
        is_dev_container: folder_uri.starts_with(DEV_CONTAINER_PREFIX),
        is_wsl: folder_uri.starts_with(WSL_PREFIX),
        is_ssh: folder_uri.starts_with(SSH_PREFIX),
    })
}

/// Last non-empty segment of the URI's decoded path.
///
/// Returns an empty string when the URI does not parse or its path is not
/// valid UTF-8 once decoded.
///
/// # Examples
///
/// ```
/// use recent_workspaces::indexer::folder_name_from_uri;
///
/// assert_eq!(folder_name_from_uri("file:///Users/b/my%20proj"), "my proj");
/// assert_eq!(folder_name_from_uri("vscode-remote://wsl+ubuntu/home/a/"), "a");
/// assert_eq!(folder_name_from_uri("not a uri"), "");
/// ```
pub fn folder_name_from_uri(uri: &str) -> String {
    let Ok(parsed) = Url::parse(uri) else {
        return String::new();
    };
    let Ok(decoded) = percent_decode_str(parsed.path()).decode_utf8() else {
        return String::new();
    };

    decoded.split(['/', '\\']).rev().find(|segment| !segment.is_empty()).unwrap_or_default().to_string()
}
