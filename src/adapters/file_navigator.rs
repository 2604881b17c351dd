//! File-backed navigator adapter.
//!
//! The terminal client has no address bar, so the location is persisted to a
//! small file instead. Restarting the client plays the part of a page reload:
//! the stored `chat_id` brings back the same conversation.

use std::path::{Path, PathBuf};

use crate::state::Location;
use crate::traits::Navigator;

/// Base of the locations written by the terminal client.
pub const TERMINAL_LOCATION_BASE: &str = "synapse://chat";

/// A [`Navigator`] that persists its location to a file.
#[derive(Debug, Clone)]
pub struct FileNavigator {
    path: PathBuf,
    location: Location,
}

impl FileNavigator {
    /// Open the navigator at `path`, reading any previously stored location.
    ///
    /// A missing or unreadable file yields a location without a `chat_id`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = match std::fs::read_to_string(&path) {
            Ok(raw) if !raw.trim().is_empty() => Location::parse(raw.trim()),
            Ok(_) => Location::parse(TERMINAL_LOCATION_BASE),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read location file {}: {}", path.display(), e);
                }
                Location::parse(TERMINAL_LOCATION_BASE)
            }
        };
        Self { path, location }
    }

    /// Default location file: `<data_dir>/synapse/location`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("synapse").join("location"))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current location string.
    pub fn location(&self) -> String {
        self.location.to_string()
    }
}

impl Navigator for FileNavigator {
    fn chat_id(&self) -> Option<String> {
        self.location.chat_id().map(str::to_string)
    }

    fn set_chat_id(&mut self, chat_id: Option<&str>) -> std::io::Result<()> {
        self.location = self.location.clone().with_chat_id(chat_id);
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, self.location.to_string())
    }
}
