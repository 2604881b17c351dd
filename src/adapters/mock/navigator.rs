//! In-memory navigator for testing.

use crate::state::Location;
use crate::traits::Navigator;

/// A [`Navigator`] over a location string held in memory.
///
/// Every rewrite is appended to `history`, like `history.replaceState`
/// calls observed from a page.
#[derive(Debug, Clone)]
pub struct MemoryNavigator {
    location: String,
    pub history: Vec<String>,
}

impl MemoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            location: initial.into(),
            history: Vec::new(),
        }
    }

    /// The current location string.
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryNavigator {
    fn chat_id(&self) -> Option<String> {
        Location::parse(&self.location).chat_id().map(str::to_string)
    }

    fn set_chat_id(&mut self, chat_id: Option<&str>) -> std::io::Result<()> {
        self.location = Location::parse(&self.location)
            .with_chat_id(chat_id)
            .to_string();
        self.history.push(self.location.clone());
        Ok(())
    }
}
