//! Network-related error types.
//!
//! Errors raised while talking to the chat backend over HTTP.

use thiserror::Error;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    /// Connection to the server failed.
    #[error("Connection failed to '{url}': {message}")]
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    #[error("{operation} timed out: {message}")]
    Timeout { operation: String, message: String },

    /// HTTP status error (non-2xx response).
    #[error("HTTP {status} error: {message}")]
    HttpStatus { status: u16, message: String },

    /// The URL could not be used.
    #[error("Invalid URL '{url}'")]
    InvalidUrl { url: String },

    /// The body could not be interpreted.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Generic network error.
    #[error("Network error: {message}")]
    Other { message: String },
}

impl NetworkError {
    /// Classify a transport error raised while requesting `url`.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(message) => NetworkError::Timeout {
                operation: format!("request to {}", url),
                message,
            },
            HttpError::ServerError { status, message } => {
                NetworkError::HttpStatus { status, message }
            }
            HttpError::InvalidUrl(_) => NetworkError::InvalidUrl {
                url: url.to_string(),
            },
            HttpError::Io(message) | HttpError::Other(message) => NetworkError::Other { message },
        }
    }

    /// True when the backend answered with an error status.
    pub fn is_server_side(&self) -> bool {
        matches!(self, NetworkError::HttpStatus { status, .. } if *status >= 500)
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to reach the chat server. Is it running?".to_string()
            }
            NetworkError::Timeout { .. } => {
                "The chat server took too long to answer.".to_string()
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                404 => "That conversation no longer exists.".to_string(),
                500..=599 => "The chat server is having trouble. Please try again later.".to_string(),
                _ => format!("The chat server returned an error (HTTP {}).", status),
            },
            NetworkError::InvalidUrl { url } => format!("'{}' is not a usable server address.", url),
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the chat server.".to_string()
            }
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        let err = NetworkError::from_http(
            HttpError::ServerError {
                status: 502,
                message: "bad gateway".to_string(),
            },
            "http://localhost:8000/chat/",
        );
        assert!(matches!(err, NetworkError::HttpStatus { status: 502, .. }));
        assert!(err.is_server_side());
        assert_eq!(err.error_code(), "E_NET_HTTP");
    }

    #[test]
    fn test_from_http_connection_keeps_url() {
        let err = NetworkError::from_http(
            HttpError::ConnectionFailed("refused".to_string()),
            "http://localhost:1/all-chats",
        );
        match err {
            NetworkError::ConnectionFailed { url, message } => {
                assert_eq!(url, "http://localhost:1/all-chats");
                assert_eq!(message, "refused");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_not_found_message() {
        let err = NetworkError::HttpStatus {
            status: 404,
            message: "Chat not found".to_string(),
        };
        assert!(!err.is_server_side());
        assert_eq!(err.user_message(), "That conversation no longer exists.");
        assert_eq!(err.to_string(), "HTTP 404 error: Chat not found");
    }
}
