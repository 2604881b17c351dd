//! Mock HTTP client for testing.
//!
//! Returns predefined responses, chunk sequences or errors and records every
//! request for later verification.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, MultipartForm, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET or POST)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// String body (JSON posts)
    pub body: Option<String>,
    /// Multipart body (uploads)
    pub form: Option<MultipartForm>,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a buffered response
    Success(Response),
    /// Fail the request
    Error(HttpError),
    /// Stream these chunks, then end
    Stream(Vec<Bytes>),
    /// Stream these chunks, then fail mid-body
    BrokenStream(Vec<Bytes>, HttpError),
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use synapse_chat::adapters::mock::{MockHttpClient, MockResponse};
/// use bytes::Bytes;
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://api/chat/",
///     MockResponse::Stream(vec![Bytes::from("Hi"), Bytes::from(" there")]),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL (exact, then prefix match)
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Convenience: a 200 response with a JSON body.
    pub fn set_json(&self, url: &str, body: serde_json::Value) {
        self.set_response(
            url,
            MockResponse::Success(Response::new(200, Bytes::from(body.to_string()))),
        );
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests whose URL ends with `suffix`.
    pub fn requests_to(&self, suffix: &str) -> Vec<RecordedRequest> {
        self.get_requests()
            .into_iter()
            .filter(|r| r.url.ends_with(suffix))
            .collect()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        body: Option<String>,
        form: Option<MultipartForm>,
    ) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
            form,
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        // Longest prefix wins so "/chat/" does not shadow "/chat/abc".
        let prefix_match = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone());
        if prefix_match.is_some() {
            return prefix_match;
        }

        self.default_response.lock().unwrap().clone()
    }

    fn buffered(&self, url: &str) -> Result<Response, HttpError> {
        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Stream(_)) | Some(MockResponse::BrokenStream(..)) => Err(
                HttpError::Other("Stream response on non-stream request".to_string()),
            ),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }

    fn streamed(&self, url: &str) -> Result<ByteStream, HttpError> {
        match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => {
                Ok(Box::pin(futures::stream::iter(chunks.into_iter().map(Ok))))
            }
            Some(MockResponse::BrokenStream(chunks, err)) => {
                let items = chunks
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(err)));
                Ok(Box::pin(futures::stream::iter(items)))
            }
            Some(MockResponse::Success(response)) if response.is_success() => {
                Ok(Box::pin(futures::stream::iter(vec![Ok(response.body)])))
            }
            Some(MockResponse::Success(response)) => Err(HttpError::ServerError {
                status: response.status,
                message: response.text().unwrap_or_default(),
            }),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None, None);
        self.buffered(url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()), None);
        self.buffered(url)
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()), None);
        self.streamed(url)
    }

    async fn post_multipart_stream(
        &self,
        url: &str,
        form: MultipartForm,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record_request("POST", url, headers, None, Some(form));
        self.streamed(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.set_json("http://api/all-chats", serde_json::json!({"chats": []}));

        let response = client.get("http://api/all-chats", &Headers::new()).await.unwrap();

        assert_eq!(response.status, 200);
        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
    }

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let client = MockHttpClient::new();
        client.set_json("http://api/chat/", serde_json::json!({"which": "short"}));
        client.set_json("http://api/chat/abc", serde_json::json!({"which": "long"}));

        let response = client.get("http://api/chat/abc-123", &Headers::new()).await.unwrap();
        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body["which"], "long");
    }

    #[tokio::test]
    async fn test_post_stream_with_chunks() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://api/chat/",
            MockResponse::Stream(vec![Bytes::from("Hi"), Bytes::from(" there")]),
        );

        let mut stream = client
            .post_stream("http://api/chat/", "{}", &Headers::new())
            .await
            .unwrap();

        let mut chunks = Vec::new();
        while let Some(result) = stream.next().await {
            chunks.push(result.unwrap());
        }
        assert_eq!(chunks, vec![Bytes::from("Hi"), Bytes::from(" there")]);
    }

    #[tokio::test]
    async fn test_broken_stream_ends_with_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://api/chat/",
            MockResponse::BrokenStream(vec![Bytes::from("Hi")], HttpError::Io("reset".to_string())),
        );

        let mut stream = client
            .post_stream("http://api/chat/", "{}", &Headers::new())
            .await
            .unwrap();

        assert!(stream.next().await.unwrap().is_ok());
        assert!(matches!(stream.next().await, Some(Err(HttpError::Io(_)))));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_error_status_on_stream() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://api/chat/",
            MockResponse::Success(Response::new(500, Bytes::from("boom"))),
        );

        let result = client.post_stream("http://api/chat/", "{}", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::ServerError { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_multipart_is_recorded() {
        let client = MockHttpClient::new();
        client.set_response("http://api/chat/upload-and-query", MockResponse::Stream(vec![]));

        let form = MultipartForm::new().text("message", "summarize");
        let _ = client
            .post_multipart_stream("http://api/chat/upload-and-query", form, &Headers::new())
            .await
            .unwrap();

        let requests = client.requests_to("/upload-and-query");
        assert_eq!(requests.len(), 1);
        assert!(requests[0].body.is_none());
        assert_eq!(
            requests[0].form.as_ref().and_then(|f| f.text_value("message")),
            Some("summarize")
        );
    }
}
