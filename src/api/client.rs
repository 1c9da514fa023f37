use crate::api::types::{ErrorResponse, NotesResponse, QuizQuestion, QuizResponse, TextRequest};
use crate::config::Config;
use crate::error::BackendError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub const SUMMARIZE_PATH: &str = "/api/summarize";
pub const GENERATE_QUIZ_PATH: &str = "/api/generate-quiz";

/// The summarization/quiz service as seen by the controller.
#[async_trait]
pub trait StudyBackend: Send + Sync {
    /// Structured notes (Markdown) for `text`.
    async fn summarize(&self, text: &str) -> Result<String, BackendError>;

    /// Quiz questions for `text`. An empty list is a valid answer.
    async fn generate_quiz(&self, text: &str) -> Result<Vec<QuizQuestion>, BackendError>;
}

/// `StudyBackend` over HTTP+JSON.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    summarize_url: String,
    quiz_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            summarize_url: config.endpoint(SUMMARIZE_PATH),
            quiz_url: config.endpoint(GENERATE_QUIZ_PATH),
        })
    }

    async fn post_text<T: DeserializeOwned>(&self, url: &str, text: &str) -> Result<T, BackendError> {
        debug!(url, chars = text.chars().count(), "POST");
        let response = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&TextRequest { text })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.error);
            warn!(url, status = status.as_u16(), ?message, "backend rejected request");
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[async_trait]
impl StudyBackend for HttpBackend {
    async fn summarize(&self, text: &str) -> Result<String, BackendError> {
        let response: NotesResponse = self.post_text(&self.summarize_url, text).await?;
        Ok(response.notes.unwrap_or_default())
    }

    async fn generate_quiz(&self, text: &str) -> Result<Vec<QuizQuestion>, BackendError> {
        let response: QuizResponse = self.post_text(&self.quiz_url, text).await?;
        Ok(response.quiz.unwrap_or_default())
    }
}

#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use std::sync::Mutex;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(test)]
use std::time::Duration;

/// Scripted backend for tests: each call pops the next result for its
/// endpoint after an optional delay, and records the text it was sent.
#[cfg(test)]
#[derive(Default)]
pub struct MockBackend {
    notes: Mutex<VecDeque<Result<String, BackendError>>>,
    quizzes: Mutex<VecDeque<Result<Vec<QuizQuestion>, BackendError>>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    sent: Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_notes(self, result: Result<String, BackendError>) -> Self {
        self.notes.lock().unwrap().push_back(result);
        self
    }

    pub fn push_quiz(self, result: Result<Vec<QuizQuestion>, BackendError>) -> Self {
        self.quizzes.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    async fn record(&self, text: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(text.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
#[async_trait]
impl StudyBackend for MockBackend {
    async fn summarize(&self, text: &str) -> Result<String, BackendError> {
        self.record(text).await;
        self.notes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted notes".to_string())))
    }

    async fn generate_quiz(&self, text: &str) -> Result<Vec<QuizQuestion>, BackendError> {
        self.record(text).await;
        self.quizzes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted quiz".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// What the one-shot server received.
    struct Captured {
        head: String,
        body: String,
    }

    impl Captured {
        fn request_line(&self) -> &str {
            self.head.lines().next().unwrap_or_default()
        }

        fn header(&self, name: &str) -> Option<String> {
            self.head.lines().skip(1).find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.trim()
                    .eq_ignore_ascii_case(name)
                    .then(|| value.trim().to_string())
            })
        }
    }

    /// Serve exactly one HTTP request with a canned response; yields the raw
    /// request head and body.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            let captured = loop {
                let read = socket.read(&mut buf).await.unwrap();
                if read == 0 {
                    let head = String::from_utf8_lossy(&raw).to_string();
                    break Captured { head, body: String::new() };
                }
                raw.extend_from_slice(&buf[..read]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(split) = text.find("\r\n\r\n") {
                    let head = &text[..split];
                    let length = head
                        .to_ascii_lowercase()
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:").map(str::to_string))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    let request_body = &text[split + 4..];
                    if request_body.len() >= length {
                        break Captured {
                            head: head.to_string(),
                            body: request_body.to_string(),
                        };
                    }
                }
            };
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            captured
        });
        (format!("http://{}", addr), handle)
    }

    fn backend_for(url: String) -> HttpBackend {
        let config = Config {
            backend_url: url,
            ..Config::default()
        };
        HttpBackend::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_summarize_success() {
        let (url, server) = serve_once("200 OK", r#"{"notes": "Summary X"}"#).await;
        let notes = backend_for(url).summarize("Photosynthesis text").await.unwrap();
        assert_eq!(notes, "Summary X");

        let captured = server.await.unwrap();
        assert_eq!(captured.request_line(), "POST /api/summarize HTTP/1.1");
        assert_eq!(
            captured.header("content-type").as_deref(),
            Some("application/json")
        );
        let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(sent["text"], "Photosynthesis text");
    }

    #[tokio::test]
    async fn test_summarize_null_notes_is_empty_success() {
        let (url, _server) = serve_once("200 OK", r#"{"notes": null}"#).await;
        let notes = backend_for(url).summarize("text").await.unwrap();
        assert_eq!(notes, "");
    }

    #[tokio::test]
    async fn test_error_status_carries_backend_message() {
        let (url, _server) = serve_once("400 Bad Request", r#"{"error": "bad input"}"#).await;
        let err = backend_for(url).summarize("x").await.unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 400, .. }));
        assert_eq!(err.server_message(), Some("bad input"));
    }

    #[tokio::test]
    async fn test_error_status_without_json_body() {
        let (url, _server) = serve_once("502 Bad Gateway", "<html>oops</html>").await;
        let err = backend_for(url).generate_quiz("x").await.unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 502, message: None }));
    }

    #[tokio::test]
    async fn test_quiz_success_keeps_order() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"quiz": [{"type": "tf", "question": "q1", "answer": "True"}, {"type": "mcq", "question": "q2", "options": ["a", "b"], "answer": "a"}]}"#,
        )
        .await;
        let quiz = backend_for(url).generate_quiz("text").await.unwrap();
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz[0].question, "q1");
        assert_eq!(quiz[1].question, "q2");

        let captured = server.await.unwrap();
        assert_eq!(captured.request_line(), "POST /api/generate-quiz HTTP/1.1");
        assert_eq!(
            captured.header("content-type").as_deref(),
            Some("application/json")
        );
        let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(sent["text"], "text");
    }

    #[tokio::test]
    async fn test_quiz_missing_field_is_empty() {
        let (url, _server) = serve_once("200 OK", "{}").await;
        let quiz = backend_for(url).generate_quiz("text").await.unwrap();
        assert!(quiz.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let (url, _server) = serve_once("200 OK", "not json").await;
        let err = backend_for(url).summarize("text").await.unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = backend_for(format!("http://{}", addr))
            .summarize("text")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }
}
