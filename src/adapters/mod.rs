//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileNavigator`] - location persisted to a file
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - configurable HTTP responses
//! - [`mock::RecordingView`] - in-memory chat surface
//! - [`mock::MemoryNavigator`] - in-memory location

pub mod file_navigator;
pub mod mock;
pub mod reqwest_http;

pub use file_navigator::FileNavigator;
pub use mock::{MemoryNavigator, MockHttpClient, RecordingView};
pub use reqwest_http::ReqwestHttpClient;
