//! Unified error type for the chat client.

use thiserror::Error;

use super::category::ErrorCategory;
use super::network::NetworkError;
use super::stream::StreamError;
use super::view::ViewError;

/// Unified error type for the chat client.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The request could not be made or the server rejected it.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The streamed body failed part way through.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// The view could not apply an update.
    #[error(transparent)]
    View(#[from] ViewError),

    /// A JSON payload did not have the expected shape.
    #[error("Malformed response from {endpoint}: {source}")]
    Json {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// A send was attempted while a reply is still in flight.
    #[error("A reply is still streaming")]
    SendInProgress,

    /// Local IO failed (attachments, location file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChatError {
    /// Wrap a JSON decoding failure for `endpoint`.
    pub fn json(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        ChatError::Json {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::Network(err) if err.is_server_side() => ErrorCategory::Server,
            ChatError::Network(NetworkError::HttpStatus { .. }) => ErrorCategory::Client,
            ChatError::Network(_) => ErrorCategory::Network,
            ChatError::Stream(StreamError::ConnectionLost { .. }) => ErrorCategory::Network,
            ChatError::Stream(StreamError::Decode { .. }) => ErrorCategory::Client,
            ChatError::View(_) => ErrorCategory::System,
            ChatError::Json { .. } => ErrorCategory::Client,
            ChatError::SendInProgress => ErrorCategory::User,
            ChatError::Io(_) => ErrorCategory::System,
        }
    }

    /// True for failures of the request or its streamed body.
    pub fn is_transport(&self) -> bool {
        matches!(self, ChatError::Network(_) | ChatError::Stream(_))
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Network(err) => err.error_code(),
            ChatError::Stream(err) => err.error_code(),
            ChatError::View(err) => err.error_code(),
            ChatError::Json { .. } => "E_JSON",
            ChatError::SendInProgress => "E_BUSY",
            ChatError::Io(_) => "E_IO",
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Network(err) => err.user_message(),
            ChatError::Stream(_) => "The reply was interrupted.".to_string(),
            ChatError::View(err) => err.to_string(),
            ChatError::Json { .. } => {
                "Received an invalid response from the chat server.".to_string()
            }
            ChatError::SendInProgress => {
                "Please wait for the current response to complete before sending another message."
                    .to_string()
            }
            ChatError::Io(err) => format!("File error: {}", err),
        }
    }
}

/// Type alias for results using [`ChatError`].
pub type ChatResult<T> = Result<T, ChatError>;
