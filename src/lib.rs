//! Synapse - a streaming chat client.
//!
//! The library holds everything except process setup, so integration tests
//! can drive the controller against mock transports and views.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod state;
pub mod stream;
pub mod terminal;
pub mod traits;
