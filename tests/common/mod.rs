//! Shared fixtures for controller tests.

#![allow(dead_code)]

use std::time::Duration;

use synapse_chat::adapters::mock::{MemoryNavigator, MockHttpClient, RecordingView};
use synapse_chat::app::ChatApp;
use synapse_chat::config::ClientConfig;
use synapse_chat::render::PlainFormatter;

pub const BASE: &str = "http://api";

pub type TestApp = ChatApp<MockHttpClient, RecordingView, MemoryNavigator>;

pub fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

/// No delays, so scenarios run instantly.
pub fn test_config() -> ClientConfig {
    ClientConfig::new()
        .with_api_base_url(BASE)
        .with_spacer_collapse(Duration::ZERO)
        .with_list_refresh_delay(Duration::ZERO)
}

pub fn app(http: &MockHttpClient) -> TestApp {
    app_with(http, RecordingView::new(), MemoryNavigator::new("/"), test_config())
}

pub fn app_with(
    http: &MockHttpClient,
    view: RecordingView,
    navigator: MemoryNavigator,
    config: ClientConfig,
) -> TestApp {
    ChatApp::new(http.clone(), view, navigator, Box::new(PlainFormatter), config)
}

/// `GET /all-chats` body for `(id, title)` pairs.
pub fn chat_list(chats: &[(&str, &str)]) -> serde_json::Value {
    let chats: Vec<serde_json::Value> = chats
        .iter()
        .map(|(id, title)| serde_json::json!({"id": id, "title": title}))
        .collect();
    serde_json::json!({ "status": "success", "chats": chats })
}
