use std::path::{Path, PathBuf};

use url::Url;

/// Abbreviates the home directory as `~` for display
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use recent_workspaces::utils::format_path_with_tilde;
///
/// assert_eq!(format_path_with_tilde(Path::new("/opt/tools")), "/opt/tools");
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, dirs::home_dir().as_deref())
}

pub(crate) fn format_path_with_tilde_internal(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", std::path::MAIN_SEPARATOR, rest.display());
    }
    path.display().to_string()
}

/// Local filesystem path of a `file://` folder URI.
///
/// Remote URIs have no local path and yield `None`.
pub fn local_path_from_uri(uri: &str) -> Option<PathBuf> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}
