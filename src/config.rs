//! Client configuration.
//!
//! Use the builder methods to customize behavior; [`ClientConfig::from_env`]
//! layers environment overrides on top of the defaults.
//!
//! ```ignore
//! use synapse_chat::config::ClientConfig;
//!
//! let config = ClientConfig::from_env().with_api_base_url("http://10.0.0.2:8000");
//! ```

use std::time::Duration;

use crate::api::DEFAULT_BASE_URL;

pub const ENV_API_URL: &str = "SYNAPSE_API_URL";
pub const ENV_SPACER_GAP: &str = "SYNAPSE_SPACER_GAP";
pub const ENV_RESET_ON_NEW_CHAT: &str = "SYNAPSE_RESET_ON_NEW_CHAT";

/// Runtime settings for [`crate::app::ChatApp`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL (default: http://localhost:8000)
    pub api_base_url: String,
    /// Space left above the spacer, in view units (default: 120)
    pub spacer_gap: u32,
    /// How long the spacer takes to collapse after a reply (default: 300ms)
    pub spacer_collapse: Duration,
    /// Delay before refreshing the sidebar after a reply (default: 500ms)
    pub list_refresh_delay: Duration,
    /// Ask the backend to forget a conversation when starting a new one
    pub reset_on_new_chat: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            spacer_gap: 120,
            spacer_collapse: Duration::from_millis(300),
            list_refresh_delay: Duration::from_millis(500),
            reset_on_new_chat: true,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_spacer_gap(mut self, gap: u32) -> Self {
        self.spacer_gap = gap;
        self
    }

    pub fn with_spacer_collapse(mut self, duration: Duration) -> Self {
        self.spacer_collapse = duration;
        self
    }

    pub fn with_list_refresh_delay(mut self, delay: Duration) -> Self {
        self.list_refresh_delay = delay;
        self
    }

    pub fn with_reset_on_new_chat(mut self, reset: bool) -> Self {
        self.reset_on_new_chat = reset;
        self
    }

    /// Defaults with any `SYNAPSE_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    fn apply_env(mut self, get: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = get(ENV_API_URL) {
            let url = url.trim();
            if url.starts_with("http://") || url.starts_with("https://") {
                self.api_base_url = url.to_string();
            } else {
                tracing::warn!("Ignoring {}={:?}: not an http(s) URL", ENV_API_URL, url);
            }
        }

        if let Some(gap) = get(ENV_SPACER_GAP) {
            match gap.trim().parse::<u32>() {
                Ok(gap) => self.spacer_gap = gap,
                Err(e) => tracing::warn!("Ignoring {}={:?}: {}", ENV_SPACER_GAP, gap, e),
            }
        }

        if let Some(flag) = get(ENV_RESET_ON_NEW_CHAT) {
            match parse_flag(&flag) {
                Some(reset) => self.reset_on_new_chat = reset,
                None => tracing::warn!("Ignoring {}={:?}", ENV_RESET_ON_NEW_CHAT, flag),
            }
        }

        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
