//! Streaming-related error types.

use thiserror::Error;

use crate::traits::HttpError;

/// Failures while consuming a streamed response body.
#[derive(Debug, Clone, Error)]
pub enum StreamError {
    /// The body stopped with a transport error after streaming began.
    #[error("Stream connection lost: {message}")]
    ConnectionLost { message: String },

    /// The body could not be decoded as text.
    #[error("Failed to decode stream: {message}")]
    Decode { message: String },
}

impl StreamError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionLost { .. } => "E_STREAM_CONN",
            StreamError::Decode { .. } => "E_STREAM_DECODE",
        }
    }
}

impl From<HttpError> for StreamError {
    fn from(err: HttpError) -> Self {
        StreamError::ConnectionLost {
            message: err.to_string(),
        }
    }
}
