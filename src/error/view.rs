//! View-related error types.

use thiserror::Error;

/// Failures reported by a [`crate::traits::ChatView`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// The element an operation targets does not exist.
    #[error("View target not found: {target}")]
    MissingTarget { target: String },

    /// Drawing to the underlying surface failed.
    #[error("Failed to render {component}: {message}")]
    RenderFailed { component: String, message: String },
}

impl ViewError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ViewError::MissingTarget { .. } => "E_VIEW_TARGET",
            ViewError::RenderFailed { .. } => "E_VIEW_RENDER",
        }
    }
}
