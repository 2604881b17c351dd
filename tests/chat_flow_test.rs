//! Controller scenarios: the send flow, sidebar sync, selection, new chat.

mod common;

use bytes::Bytes;
use common::{app, app_with, chat_list, test_config, url};
use synapse_chat::adapters::mock::{
    MemoryNavigator, MockHttpClient, MockResponse, RecordingView, ViewEvent,
};
use synapse_chat::app::{UiEvent, NO_CONVERSATIONS};
use synapse_chat::error::ChatError;
use synapse_chat::models::{Attachment, Role};
use synapse_chat::render::APOLOGY;
use synapse_chat::state::SendPhase;
use synapse_chat::traits::{FormPart, HttpError, Navigator, Response};

fn stream(chunks: &[&[u8]]) -> MockResponse {
    MockResponse::Stream(chunks.iter().map(|c| Bytes::copy_from_slice(c)).collect())
}

fn sent_chat_id(http: &MockHttpClient) -> Vec<String> {
    http.requests_to("/chat/")
        .iter()
        .map(|r| {
            let body: serde_json::Value =
                serde_json::from_str(r.body.as_deref().unwrap()).unwrap();
            body["chat_id"].as_str().unwrap().to_string()
        })
        .collect()
}

#[tokio::test]
async fn test_hello_streams_progressively() {
    let http = MockHttpClient::new();
    http.set_response(&url("/chat/"), stream(&[b"Hi", b" there"]));
    http.set_json(&url("/all-chats"), chat_list(&[("older", "Older chat")]));
    let mut app = app(&http);

    app.handle(UiEvent::Send("Hello".to_string())).await.unwrap();

    let view = app.view();
    assert_eq!(view.contents_of(Role::User), vec!["Hello"]);
    assert_eq!(view.contents_of(Role::Assistant), vec!["Hi there"]);
    assert_eq!(view.content_history(1), vec!["", "Hi", "Hi there"]);
    assert!(!view.welcome_visible);
    assert_eq!(app.session().phase, SendPhase::Done);

    let ids = sent_chat_id(&http);
    assert_eq!(ids.len(), 1);
    assert_eq!(app.navigator().chat_id(), Some(ids[0].clone()));
    // Refreshed after the reply
    assert_eq!(app.view().chat_items, vec!["older"]);
}

#[tokio::test]
async fn test_id_is_stable_across_sends() {
    let http = MockHttpClient::new();
    http.set_response(&url("/chat/"), stream(&[b"ok"]));
    http.set_json(&url("/all-chats"), chat_list(&[("x", "X")]));
    let mut app = app(&http);

    app.handle(UiEvent::Send("one".to_string())).await.unwrap();
    app.handle(UiEvent::Send("two".to_string())).await.unwrap();

    let ids = sent_chat_id(&http);
    assert_eq!(ids.len(), 2);
    assert_eq!(ids[0], ids[1]);
}

#[tokio::test]
async fn test_split_multibyte_character_renders_once_complete() {
    let http = MockHttpClient::new();
    http.set_response(&url("/chat/"), stream(&[b"caf", &[0xC3], &[0xA9, b'!']]));
    http.set_json(&url("/all-chats"), chat_list(&[("x", "X")]));
    let mut app = app(&http);

    app.handle(UiEvent::Send("coffee?".to_string())).await.unwrap();

    let history = app.view().content_history(1);
    assert_eq!(history, vec!["", "caf", "café!"]);
    assert!(history.iter().all(|c| !c.contains('\u{FFFD}')));
}

#[tokio::test]
async fn test_spacer_tracks_reply_and_is_removed() {
    let http = MockHttpClient::new();
    http.set_response(
        &url("/chat/"),
        stream(&[b"one", b"\ntwo", b"\nthree", b"\nfour", b"\nfive"]),
    );
    http.set_json(&url("/all-chats"), chat_list(&[("x", "X")]));
    // 100 tall, 20 per line, gap 20: the spacer starts at 80
    let view = RecordingView::with_dimensions(100, 20);
    let mut app = app_with(
        &http,
        view,
        MemoryNavigator::new("/"),
        test_config().with_spacer_gap(20),
    );

    app.handle(UiEvent::Send("count".to_string())).await.unwrap();

    let view = app.view();
    assert_eq!(view.spacer_heights(), vec![80, 60, 40, 20, 0]);
    assert_eq!(view.spacer, None);
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let http = MockHttpClient::new();
    let mut app = app(&http);

    app.handle(UiEvent::Send("   \n".to_string())).await.unwrap();

    assert!(http.get_requests().is_empty());
    assert!(app.view().bubbles.is_empty());
    assert_eq!(app.session().phase, SendPhase::Idle);
}

#[tokio::test]
async fn test_send_while_busy_is_rejected() {
    let http = MockHttpClient::new();
    let mut app = app(&http);
    app.session_mut().phase.begin_send().unwrap();

    let result = app.handle(UiEvent::Send("again".to_string())).await;

    assert!(matches!(result, Err(ChatError::SendInProgress)));
    assert!(http.get_requests().is_empty());
    assert!(app.view().bubbles.is_empty());
}

#[tokio::test]
async fn test_server_error_shows_apology() {
    let http = MockHttpClient::new();
    http.set_response(
        &url("/chat/"),
        MockResponse::Success(Response::new(500, Bytes::from("boom"))),
    );
    http.set_json(&url("/all-chats"), chat_list(&[("x", "X")]));
    let mut app = app(&http);

    app.handle(UiEvent::Send("Hello".to_string())).await.unwrap();

    assert_eq!(app.view().contents_of(Role::Assistant), vec![APOLOGY]);
    assert_eq!(app.session().phase, SendPhase::Failed);
    assert_eq!(app.view().spacer, None);
}

#[tokio::test]
async fn test_broken_stream_replaces_partial_reply() {
    let http = MockHttpClient::new();
    http.set_response(
        &url("/chat/"),
        MockResponse::BrokenStream(
            vec![Bytes::from("Partial")],
            HttpError::Io("connection reset".to_string()),
        ),
    );
    http.set_json(&url("/all-chats"), chat_list(&[("x", "X")]));
    let mut app = app(&http);

    app.handle(UiEvent::Send("Hello".to_string())).await.unwrap();

    assert_eq!(app.view().content_history(1), vec!["", "Partial", APOLOGY]);
    assert_eq!(app.session().phase, SendPhase::Failed);

    // A failed send does not block the next one.
    http.set_response(&url("/chat/"), stream(&[b"Recovered"]));
    app.handle(UiEvent::Send("retry".to_string())).await.unwrap();
    assert_eq!(app.session().phase, SendPhase::Done);
}

#[tokio::test]
async fn test_attachment_goes_multipart_and_indicator_clears_on_failure() {
    let http = MockHttpClient::new();
    http.set_response(
        &url("/chat/upload-and-query"),
        MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
    );
    http.set_json(&url("/all-chats"), chat_list(&[("x", "X")]));
    let mut app = app(&http);

    let file = Attachment::new("notes.txt", "text/plain", Bytes::from("remember milk"));
    app.handle(UiEvent::Attach(file)).await.unwrap();
    assert_eq!(app.view().attachment.as_deref(), Some("notes.txt"));

    app.handle(UiEvent::Send("summarize".to_string())).await.unwrap();

    assert_eq!(app.view().attachment, None);
    assert!(app.session().pending_attachment().is_none());
    assert_eq!(app.view().contents_of(Role::Assistant), vec![APOLOGY]);
    assert!(http.requests_to("/chat/").is_empty());

    let uploads = http.requests_to("/chat/upload-and-query");
    assert_eq!(uploads.len(), 1);
    let form = uploads[0].form.as_ref().unwrap();
    assert_eq!(form.text_value("message"), Some("summarize"));
    assert_eq!(
        form.text_value("chat_id").map(str::to_string),
        app.navigator().chat_id()
    );
    match form.file_part("file") {
        Some(FormPart::File { file_name, bytes, .. }) => {
            assert_eq!(file_name, "notes.txt");
            assert_eq!(bytes, &Bytes::from("remember milk"));
        }
        other => panic!("expected file part, got {:?}", other),
    }
}

#[tokio::test]
async fn test_attach_replaces_and_detach_clears() {
    let http = MockHttpClient::new();
    let mut app = app(&http);

    app.handle(UiEvent::Attach(Attachment::new("a.txt", "text/plain", Bytes::new())))
        .await
        .unwrap();
    app.handle(UiEvent::Attach(Attachment::new("b.pdf", "application/pdf", Bytes::new())))
        .await
        .unwrap();
    assert_eq!(app.view().attachment.as_deref(), Some("b.pdf"));
    assert_eq!(
        app.session().pending_attachment().map(|a| a.file_name.as_str()),
        Some("b.pdf")
    );

    app.handle(UiEvent::RemoveAttachment).await.unwrap();
    assert_eq!(app.view().attachment, None);
    assert!(app.session().pending_attachment().is_none());
}

#[tokio::test]
async fn test_empty_chat_list_shows_banner_and_fresh_conversation() {
    let http = MockHttpClient::new();
    http.set_json(&url("/all-chats"), serde_json::json!({"chats": []}));
    let mut app = app(&http);

    app.init().await.unwrap();

    assert_eq!(app.view().banner.as_deref(), Some(NO_CONVERSATIONS));
    assert!(app.view().chat_items.is_empty());
    assert!(app.view().welcome_visible);
    assert!(app.session().chat_id().is_none());
    assert_eq!(app.navigator().chat_id(), None);
}

#[tokio::test]
async fn test_failed_first_send_survives_empty_list() {
    let http = MockHttpClient::new();
    http.set_response(
        &url("/chat/"),
        MockResponse::Success(Response::new(500, Bytes::from("boom"))),
    );
    http.set_json(&url("/all-chats"), serde_json::json!({"chats": []}));
    let mut app = app(&http);
    app.init().await.unwrap();

    app.handle(UiEvent::Send("Hello".to_string())).await.unwrap();

    let view = app.view();
    assert_eq!(view.contents_of(Role::User), vec!["Hello"]);
    assert_eq!(view.contents_of(Role::Assistant), vec![APOLOGY]);
    assert_eq!(view.banner.as_deref(), Some(NO_CONVERSATIONS));
    assert!(!view.welcome_visible);

    let ids = sent_chat_id(&http);
    assert_eq!(app.navigator().chat_id(), Some(ids[0].clone()));

    // Resending continues the same conversation.
    http.set_response(&url("/chat/"), stream(&[b"ok"]));
    app.handle(UiEvent::Send("Hello again".to_string()))
        .await
        .unwrap();
    let ids = sent_chat_id(&http);
    assert_eq!(ids[0], ids[1]);
}

#[tokio::test]
async fn test_first_reply_survives_unlisted_chat() {
    let http = MockHttpClient::new();
    http.set_response(&url("/chat/"), stream(&[b"Hi", b" there"]));
    http.set_json(&url("/all-chats"), serde_json::json!({"chats": []}));
    let mut app = app(&http);

    app.handle(UiEvent::Send("Hello".to_string())).await.unwrap();

    let view = app.view();
    assert_eq!(view.bubbles.len(), 2);
    assert_eq!(view.contents_of(Role::Assistant), vec!["Hi there"]);
    assert!(!view.welcome_visible);
    assert!(!view.events.contains(&ViewEvent::MessagesCleared));
    assert_eq!(view.banner.as_deref(), Some(NO_CONVERSATIONS));
    assert_eq!(app.session().phase, SendPhase::Done);
    assert_eq!(
        app.session().chat_id().map(|id| id.to_string()),
        Some(sent_chat_id(&http)[0].clone())
    );
}

#[tokio::test]
async fn test_reply_survives_malformed_list() {
    let http = MockHttpClient::new();
    http.set_response(&url("/chat/"), stream(&[b"Hi"]));
    http.set_response(
        &url("/all-chats"),
        MockResponse::Success(Response::new(200, Bytes::from("<html>"))),
    );
    let mut app = app(&http);

    app.handle(UiEvent::Send("Hello".to_string())).await.unwrap();

    assert_eq!(app.view().contents_of(Role::User), vec!["Hello"]);
    assert_eq!(app.view().contents_of(Role::Assistant), vec!["Hi"]);
    assert_eq!(app.navigator().chat_id(), Some(sent_chat_id(&http)[0].clone()));
}

#[tokio::test]
async fn test_apology_survives_malformed_list() {
    let http = MockHttpClient::new();
    http.set_response(
        &url("/chat/"),
        MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
    );
    http.set_response(
        &url("/all-chats"),
        MockResponse::Success(Response::new(200, Bytes::from("not json"))),
    );
    let mut app = app(&http);

    app.handle(UiEvent::Send("Hello".to_string())).await.unwrap();

    assert_eq!(app.view().contents_of(Role::Assistant), vec![APOLOGY]);
    assert_eq!(app.session().phase, SendPhase::Failed);
    assert!(app.session().chat_id().is_some());
}

#[tokio::test]
async fn test_send_trims_surrounding_whitespace() {
    let http = MockHttpClient::new();
    http.set_response(&url("/chat/"), stream(&[b"ok"]));
    http.set_json(&url("/all-chats"), chat_list(&[("x", "X")]));
    let mut app = app(&http);

    app.handle(UiEvent::Send("  Hello there \n".to_string()))
        .await
        .unwrap();

    assert_eq!(app.view().contents_of(Role::User), vec!["Hello there"]);
    let requests = http.requests_to("/chat/");
    let body: serde_json::Value =
        serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["message"], "Hello there");
}

#[tokio::test]
async fn test_select_chat_loads_history_and_marks_active() {
    let http = MockHttpClient::new();
    http.set_json(
        &url("/all-chats"),
        chat_list(&[("abc-123", "Project notes"), ("def-456", "Other")]),
    );
    http.set_json(
        &url("/chat/abc-123"),
        serde_json::json!({
            "id": "abc-123",
            "chat_title": "Project notes",
            "messages": [
                {"role": "user", "content": "What is in the doc?"},
                {"role": "assistant", "content": null, "tool_calls": [{"id": "t1"}]},
                {"role": "tool", "content": "raw search output"},
                {"role": "assistant", "content": "It covers **two** topics."}
            ]
        }),
    );
    let mut app = app(&http);
    app.init().await.unwrap();

    app.handle(UiEvent::SelectChat("abc-123".to_string()))
        .await
        .unwrap();

    let view = app.view();
    assert_eq!(view.title.as_deref(), Some("Project notes"));
    assert_eq!(view.active.as_deref(), Some("abc-123"));
    let roles: Vec<Role> = view.bubbles.iter().map(|b| b.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant]);
    assert_eq!(
        view.contents_of(Role::Assistant),
        vec!["It covers **two** topics."]
    );
    assert!(!view.welcome_visible);
    assert_eq!(app.navigator().location(), "/?chat_id=abc-123");
}

#[tokio::test]
async fn test_select_untitled_chat() {
    let http = MockHttpClient::new();
    http.set_json(&url("/all-chats"), chat_list(&[("n1", "")]));
    http.set_json(
        &url("/chat/n1"),
        serde_json::json!({"id": "n1", "chat_title": null, "messages": [
            {"role": "user", "content": "hi"}
        ]}),
    );
    let mut app = app(&http);
    app.init().await.unwrap();

    app.handle(UiEvent::SelectChat("n1".to_string())).await.unwrap();

    assert_eq!(app.view().title.as_deref(), Some("Untitled chat"));
}

#[tokio::test]
async fn test_select_missing_chat_returns_error() {
    let http = MockHttpClient::new();
    http.set_response(
        &url("/chat/gone"),
        MockResponse::Success(Response::new(404, Bytes::from("not found"))),
    );
    let mut app = app(&http);

    let result = app.handle(UiEvent::SelectChat("gone".to_string())).await;

    assert!(matches!(result, Err(ChatError::Network(_))));
    assert!(app.session().chat_id().is_none());
}

#[tokio::test]
async fn test_malformed_list_is_returned() {
    let http = MockHttpClient::new();
    http.set_response(
        &url("/all-chats"),
        MockResponse::Success(Response::new(200, Bytes::from("<html>"))),
    );
    let mut app = app(&http);

    let result = app.handle(UiEvent::RefreshChats).await;

    assert!(matches!(result, Err(ChatError::Json { .. })));
}

#[tokio::test]
async fn test_init_restores_chat_from_location() {
    let http = MockHttpClient::new();
    http.set_json(&url("/all-chats"), chat_list(&[("abc-123", "Saved")]));
    http.set_json(
        &url("/chat/abc-123"),
        serde_json::json!({"id": "abc-123", "chat_title": "Saved", "messages": [
            {"role": "user", "content": "earlier"},
            {"role": "assistant", "content": "reply"}
        ]}),
    );
    let mut app = app_with(
        &http,
        RecordingView::new(),
        MemoryNavigator::new("/?chat_id=abc-123"),
        test_config(),
    );

    app.init().await.unwrap();

    assert_eq!(app.view().bubbles.len(), 2);
    assert_eq!(app.view().title.as_deref(), Some("Saved"));
    assert_eq!(app.view().active.as_deref(), Some("abc-123"));
}

#[tokio::test]
async fn test_init_with_unsaved_chat_keeps_id() {
    let http = MockHttpClient::new();
    http.set_json(&url("/all-chats"), chat_list(&[("other", "Other")]));
    http.set_response(
        &url("/chat/fresh"),
        MockResponse::Success(Response::new(404, Bytes::new())),
    );
    http.set_response(&url("/chat/"), stream(&[b"hi"]));
    let mut app = app_with(
        &http,
        RecordingView::new(),
        MemoryNavigator::new("/?chat_id=fresh"),
        test_config(),
    );

    app.init().await.unwrap();
    assert!(app.view().welcome_visible);
    assert_eq!(app.session().chat_id().map(|id| id.as_str()), Some("fresh"));

    app.handle(UiEvent::Send("continue".to_string())).await.unwrap();
    assert_eq!(sent_chat_id(&http), vec!["fresh"]);
}

#[tokio::test]
async fn test_init_with_unsaved_chat_and_empty_list_keeps_id() {
    let http = MockHttpClient::new();
    http.set_json(&url("/all-chats"), serde_json::json!({"chats": []}));
    http.set_response(
        &url("/chat/fresh"),
        MockResponse::Success(Response::new(404, Bytes::new())),
    );
    let mut app = app_with(
        &http,
        RecordingView::new(),
        MemoryNavigator::new("/?chat_id=fresh"),
        test_config(),
    );

    app.init().await.unwrap();

    assert_eq!(app.view().banner.as_deref(), Some(NO_CONVERSATIONS));
    assert!(app.view().welcome_visible);
    assert_eq!(app.session().chat_id().map(|id| id.as_str()), Some("fresh"));
    assert_eq!(app.navigator().chat_id().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_new_chat_resets_and_shows_welcome() {
    let http = MockHttpClient::new();
    http.set_response(&url("/chat/"), stream(&[b"Hi"]));
    http.set_json(&url("/all-chats"), chat_list(&[("x", "X")]));
    http.set_json(&url("/reset"), serde_json::json!({"status": "ok"}));
    let mut app = app(&http);

    app.handle(UiEvent::Send("Hello".to_string())).await.unwrap();
    let old_id = app.navigator().chat_id().unwrap();

    app.handle(UiEvent::NewChat).await.unwrap();

    let resets = http.requests_to("/reset");
    assert_eq!(resets.len(), 1);
    let body: serde_json::Value =
        serde_json::from_str(resets[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({"chat_id": old_id}));

    assert!(app.view().bubbles.is_empty());
    assert!(app.view().welcome_visible);
    assert_eq!(app.navigator().chat_id(), None);

    app.handle(UiEvent::Send("Fresh start".to_string()))
        .await
        .unwrap();
    let ids = sent_chat_id(&http);
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn test_new_chat_without_reset() {
    let http = MockHttpClient::new();
    http.set_json(&url("/all-chats"), chat_list(&[("abc", "A")]));
    http.set_json(
        &url("/chat/abc"),
        serde_json::json!({"id": "abc", "chat_title": "A", "messages": []}),
    );
    let mut app = app_with(
        &http,
        RecordingView::new(),
        MemoryNavigator::new("/"),
        test_config().with_reset_on_new_chat(false),
    );
    app.handle(UiEvent::SelectChat("abc".to_string())).await.unwrap();

    app.handle(UiEvent::NewChat).await.unwrap();

    assert!(http.requests_to("/reset").is_empty());
    assert!(app.session().chat_id().is_none());
}

#[tokio::test]
async fn test_failed_reset_does_not_block_new_chat() {
    let http = MockHttpClient::new();
    http.set_json(
        &url("/chat/abc"),
        serde_json::json!({"id": "abc", "chat_title": "A", "messages": []}),
    );
    http.set_response(
        &url("/reset"),
        MockResponse::Error(HttpError::Timeout("slow".to_string())),
    );
    let mut app = app(&http);
    app.handle(UiEvent::SelectChat("abc".to_string())).await.unwrap();

    app.handle(UiEvent::NewChat).await.unwrap();

    assert_eq!(http.requests_to("/reset").len(), 1);
    assert!(app.view().welcome_visible);
    assert!(app.session().chat_id().is_none());
}
