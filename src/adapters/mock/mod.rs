//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`RecordingView`] - in-memory chat surface with a call log
//! - [`MemoryNavigator`] - location string held in memory

pub mod http;
pub mod navigator;
pub mod view;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use navigator::MemoryNavigator;
pub use view::{Bubble, RecordingView, ViewEvent};
