//! Copying folder URIs to the system clipboard.

use anyhow::{Context, Result, bail};
use arboard::Clipboard;
use tracing::debug;

/// Folder URIs longer than this are refused
const MAX_URI_LEN: usize = 64 * 1024;

/// Clipboard backend (allows mocking in tests)
pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via arboard, opened lazily per copy
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Clipboard is not available")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_uri(uri: &str) -> Result<&str> {
    let uri = uri.trim();
    if uri.is_empty() {
        bail!("Nothing to copy: entry has no folder URI");
    }
    if uri.len() > MAX_URI_LEN {
        bail!("Folder URI too large to copy ({} bytes, max {})", uri.len(), MAX_URI_LEN);
    }
    if uri.chars().any(char::is_control) {
        bail!("Folder URI contains control characters");
    }
    Ok(uri)
}

/// Copy `uri` using `provider`
pub fn copy_uri_with(uri: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    let uri = validate_uri(uri)?;
    provider.set_text(uri)?;
    debug!(uri, "Copied folder URI");
    Ok(())
}

/// Copy a folder URI to the system clipboard.
///
/// # Errors
/// Returns error if:
/// - The URI is empty, oversized or contains control characters
/// - No clipboard is available (headless sessions, missing X11/Wayland)
pub fn copy_uri(uri: &str) -> Result<()> {
    // Validate before touching the clipboard so input errors win in headless CI
    validate_uri(uri)?;
    let mut clipboard = SystemClipboard::new()?;
    copy_uri_with(uri, &mut clipboard)
}
