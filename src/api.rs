//! Chat backend API client.
//!
//! Builds the requests the chat UI makes and maps transport failures into
//! [`ChatError`]. Every call is a single attempt.

use crate::error::{ChatError, ChatResult, NetworkError};
use crate::models::{
    Attachment, ChatDetail, ChatListResponse, ChatRequest, ChatSummary, ResetRequest,
};
use crate::traits::{ByteStream, Headers, HttpClient, MultipartForm, Response};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client for the chat backend.
pub struct ChatApiClient<C: HttpClient> {
    /// Base URL for the API, without trailing slash
    base_url: String,
    http: C,
}

impl<C: HttpClient> ChatApiClient<C> {
    pub fn new(base_url: impl Into<String>, http: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// URL of the plain streaming chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}/chat/", self.base_url)
    }

    /// URL of the upload-and-query endpoint.
    pub fn upload_url(&self) -> String {
        format!("{}/chat/upload-and-query", self.base_url)
    }

    /// Send a user message and return the streamed reply body.
    ///
    /// Without an attachment this posts JSON to `/chat/`; with one it posts a
    /// multipart form to `/chat/upload-and-query`. A non-2xx status is an
    /// error; nothing is retried.
    pub async fn stream_chat(
        &self,
        chat_id: &str,
        message: &str,
        attachment: Option<Attachment>,
    ) -> ChatResult<ByteStream> {
        match attachment {
            None => {
                let url = self.chat_url();
                let body = serde_json::to_string(&ChatRequest::new(chat_id, message))
                    .map_err(|e| ChatError::json("/chat/", e))?;
                tracing::debug!(%chat_id, "POST {}", url);
                self.http
                    .post_stream(&url, &body, &Headers::new())
                    .await
                    .map_err(|e| NetworkError::from_http(e, &url).into())
            }
            Some(file) => {
                let url = self.upload_url();
                tracing::debug!(%chat_id, file = %file.file_name, bytes = file.size(), "POST {}", url);
                let form = MultipartForm::new()
                    .text("chat_id", chat_id)
                    .text("message", message)
                    .file("file", file.file_name, file.mime_type, file.bytes);
                self.http
                    .post_multipart_stream(&url, form, &Headers::new())
                    .await
                    .map_err(|e| NetworkError::from_http(e, &url).into())
            }
        }
    }

    /// Fetch every conversation for the sidebar.
    pub async fn fetch_chats(&self) -> ChatResult<Vec<ChatSummary>> {
        let url = format!("{}/all-chats", self.base_url);
        let response = self.get_ok(&url).await?;
        let list: ChatListResponse = response
            .json()
            .map_err(|e| ChatError::json("/all-chats", e))?;
        Ok(list.chats)
    }

    /// Fetch one conversation with its full message history.
    pub async fn fetch_chat(&self, chat_id: &str) -> ChatResult<ChatDetail> {
        let url = format!("{}/chat/{}", self.base_url, urlencoding::encode(chat_id));
        let response = self.get_ok(&url).await?;
        response
            .json()
            .map_err(|e| ChatError::json(format!("/chat/{}", chat_id), e))
    }

    /// Ask the backend to drop its memory of a conversation.
    ///
    /// Best effort: failures are logged and swallowed.
    pub async fn reset(&self, chat_id: &str) {
        let url = format!("{}/reset", self.base_url);
        let body = match serde_json::to_string(&ResetRequest {
            chat_id: chat_id.to_string(),
        }) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to encode reset request: {}", e);
                return;
            }
        };
        match self.http.post(&url, &body, &Headers::new()).await {
            Ok(response) if response.is_success() => {
                tracing::debug!(%chat_id, "Reset conversation memory");
            }
            Ok(response) => {
                tracing::warn!(%chat_id, status = response.status, "Reset rejected");
            }
            Err(e) => {
                tracing::warn!(%chat_id, "Reset failed: {}", e);
            }
        }
    }

    async fn get_ok(&self, url: &str) -> ChatResult<Response> {
        let response = self
            .http
            .get(url, &Headers::new())
            .await
            .map_err(|e| NetworkError::from_http(e, url))?;
        if !response.is_success() {
            return Err(NetworkError::HttpStatus {
                status: response.status,
                message: response.text().unwrap_or_default(),
            }
            .into());
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::{FormPart, HttpError};
    use bytes::Bytes;
    use futures_util::StreamExt;

    fn client() -> (ChatApiClient<MockHttpClient>, MockHttpClient) {
        let http = MockHttpClient::new();
        (ChatApiClient::new("http://api/", http.clone()), http)
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let (api, _) = client();
        assert_eq!(api.base_url(), "http://api");
        assert_eq!(api.chat_url(), "http://api/chat/");
        assert_eq!(api.upload_url(), "http://api/chat/upload-and-query");
    }

    #[tokio::test]
    async fn test_stream_chat_posts_json() {
        let (api, http) = client();
        http.set_response("http://api/chat/", MockResponse::Stream(vec![Bytes::from("ok")]));

        let mut body = api.stream_chat("c1", "Hello", None).await.unwrap();
        assert_eq!(body.next().await.unwrap().unwrap(), Bytes::from("ok"));

        let requests = http.get_requests();
        assert_eq!(requests.len(), 1);
        let sent: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, serde_json::json!({"chat_id": "c1", "message": "Hello"}));
    }

    #[tokio::test]
    async fn test_stream_chat_with_attachment_uses_multipart() {
        let (api, http) = client();
        http.set_response(
            "http://api/chat/upload-and-query",
            MockResponse::Stream(vec![]),
        );

        let file = Attachment::new("doc.pdf", "application/pdf", Bytes::from_static(b"%PDF"));
        api.stream_chat("c1", "summarize", Some(file)).await.unwrap();

        let requests = http.requests_to("/chat/upload-and-query");
        assert_eq!(requests.len(), 1);
        let form = requests[0].form.as_ref().unwrap();
        assert_eq!(form.text_value("chat_id"), Some("c1"));
        assert_eq!(form.text_value("message"), Some("summarize"));
        match form.file_part("file") {
            Some(FormPart::File { file_name, mime_type, .. }) => {
                assert_eq!(file_name, "doc.pdf");
                assert_eq!(mime_type, "application/pdf");
            }
            other => panic!("expected file part, got {:?}", other),
        }
        assert!(http.requests_to("/chat/").is_empty());
    }

    #[tokio::test]
    async fn test_stream_chat_error_status() {
        let (api, http) = client();
        http.set_response(
            "http://api/chat/",
            MockResponse::Error(HttpError::ServerError {
                status: 500,
                message: "boom".to_string(),
            }),
        );

        let err = api.stream_chat("c1", "Hello", None).await.err().unwrap();
        assert!(err.is_transport());
        assert!(matches!(
            err,
            ChatError::Network(NetworkError::HttpStatus { status: 500, .. })
        ));
        // Single attempt.
        assert_eq!(http.get_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_chats() {
        let (api, http) = client();
        http.set_json(
            "http://api/all-chats",
            serde_json::json!({"status": "ok", "chats": [{"id": "a", "title": "First"}]}),
        );

        let chats = api.fetch_chats().await.unwrap();
        assert_eq!(chats, vec![ChatSummary::new("a", "First")]);
    }

    #[tokio::test]
    async fn test_fetch_chats_malformed() {
        let (api, http) = client();
        http.set_response(
            "http://api/all-chats",
            MockResponse::Success(Response::new(200, Bytes::from("<html>"))),
        );

        assert!(matches!(api.fetch_chats().await, Err(ChatError::Json { .. })));
    }

    #[tokio::test]
    async fn test_fetch_chat_not_found() {
        let (api, http) = client();
        http.set_response(
            "http://api/chat/missing",
            MockResponse::Success(Response::new(404, Bytes::from(r#"{"detail":"Chat not found"}"#))),
        );

        let err = api.fetch_chat("missing").await.err().unwrap();
        assert!(matches!(
            err,
            ChatError::Network(NetworkError::HttpStatus { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_reset_swallows_errors() {
        let (api, http) = client();
        http.set_response(
            "http://api/reset",
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );

        api.reset("c1").await;

        let requests = http.requests_to("/reset");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"chat_id":"c1"}"#));
    }
}
