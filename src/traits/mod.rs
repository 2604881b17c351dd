//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, streaming, multipart)
//! - [`ChatView`] - the view-update interface driven by the controller
//! - [`Navigator`] - the navigable location holding the active chat id

pub mod http;
pub mod navigator;
pub mod view;

pub use http::{ByteStream, FormPart, Headers, HttpClient, HttpError, MultipartForm, Response};
pub use navigator::Navigator;
pub use view::{ChatView, NodeId};
