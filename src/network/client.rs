//! HTTP client wrapper - executes quiz service calls and normalizes failures

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Instant;

use crate::config::Config;
use crate::error::{QuizError, Result};
use crate::models::{HistoryItem, QuizDetail, QuizId};
use crate::network::QuizApi;
use crate::validate::validate_article_url;

const GENERATE_FALLBACK: &str = "Failed to generate quiz. Please try again.";

/// reqwest-backed implementation of [`QuizApi`]
#[derive(Clone, Debug)]
pub struct ApiGateway {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
    reference_domain: String,
}

impl ApiGateway {
    /// Create a gateway with a client honoring the configured deadline
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| QuizError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        ApiGateway {
            client,
            base_url: config.base_url().to_string(),
            timeout_ms: config.timeout_ms,
            reference_domain: config.reference_domain.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send_error(&self, e: reqwest::Error) -> QuizError {
        if e.is_timeout() {
            QuizError::Timeout(self.timeout_ms)
        } else if e.is_connect() {
            QuizError::Transport(format!("Connection failed: {}", e))
        } else {
            QuizError::Transport(format!("Request failed: {}", e))
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T> {
        resp.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                QuizError::Timeout(self.timeout_ms)
            } else {
                QuizError::Transport(format!("Invalid response body: {}", e))
            }
        })
    }
}

/// Pull a human readable message out of an error body.
///
/// The service answers `{"detail": "..."}`; request validation failures
/// carry a list of objects with a `msg` field instead.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    }
}

#[async_trait]
impl QuizApi for ApiGateway {
    async fn generate_quiz(&self, url: &str) -> Result<QuizDetail> {
        let url = validate_article_url(url, &self.reference_domain)?;
        let start = Instant::now();
        tracing::info!(url = %url, "Generating quiz");

        let resp = self
            .client
            .post(self.endpoint("/generate-quiz"))
            .json(&serde_json::json!({ "url": url.as_str() }))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = resp.status();
        if status.is_client_error() {
            let body = resp.text().await.unwrap_or_default();
            let detail = error_detail(&body).unwrap_or_else(|| String::from(GENERATE_FALLBACK));
            tracing::warn!(status = status.as_u16(), %detail, "Quiz generation rejected");
            return Err(QuizError::Validation(detail));
        }
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Quiz generation failed");
            return Err(QuizError::Transport(format!("Server responded with {}", status)));
        }

        let detail: QuizDetail = self.read_json(resp).await?;
        tracing::info!(
            questions = detail.quiz.len(),
            time_ms = start.elapsed().as_millis() as u64,
            "Quiz generated"
        );
        Ok(detail)
    }

    async fn fetch_history_list(&self) -> Result<Vec<HistoryItem>> {
        let resp = self
            .client
            .get(self.endpoint("/quizzes"))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(QuizError::Transport(format!("Server responded with {}", status)));
        }
        let items: Vec<HistoryItem> = self.read_json(resp).await?;
        tracing::debug!(count = items.len(), "History list fetched");
        Ok(items)
    }

    async fn fetch_quiz_detail(&self, id: QuizId) -> Result<QuizDetail> {
        let resp = self
            .client
            .get(self.endpoint(&format!("/generate-quiz/{}", id)))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        match resp.status() {
            StatusCode::NOT_FOUND => Err(QuizError::NotFound(id)),
            status if status.is_success() => {
                let detail: QuizDetail = self.read_json(resp).await?;
                tracing::debug!(id, "Quiz detail fetched");
                Ok(detail)
            }
            status => Err(QuizError::Transport(format!("Server responded with {}", status))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    const DETAIL_JSON: &str = r#"{
        "id": 5,
        "article": {"title": "Alan Turing", "url": "https://en.wikipedia.org/wiki/Alan_Turing", "summary": "Mathematician"},
        "quiz": {"questions": [
            {"question": "Turing's field?", "options": [{"text": "Maths"}, {"text": "Music"}],
             "correct_answer": "Maths", "explanation": "He was a mathematician.", "difficulty": "easy"}
        ]},
        "related_topics": ["Enigma", "Bletchley Park"]
    }"#;

    fn gateway(base_url: &str, timeout_ms: u64) -> ApiGateway {
        let config = Config {
            api_base_url: base_url.to_string(),
            timeout_ms,
            ..Config::default()
        };
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(config.timeout())
            .build()
            .unwrap();
        ApiGateway::with_client(client, &config)
    }

    /// Read one request (head plus content-length body) and return it
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|l| {
                        let (k, v) = l.split_once(':')?;
                        k.eq_ignore_ascii_case("content-length").then(|| v.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + content_length {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Serve a single canned response and hand back the request it received
    async fn stub(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn test_generate_quiz_posts_url() {
        let (base, server) = stub(200, DETAIL_JSON).await;
        let detail = gateway(&base, 2_000)
            .generate_quiz("https://en.wikipedia.org/wiki/Alan_Turing")
            .await
            .unwrap();

        assert_eq!(detail.id, Some(5));
        assert_eq!(detail.quiz.questions[0].difficulty.as_deref(), Some("easy"));
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /generate-quiz "));
        assert!(request.contains(r#""url":"https://en.wikipedia.org/wiki/Alan_Turing""#));
    }

    #[tokio::test]
    async fn test_generate_quiz_rejects_before_network() {
        // Nothing listens on this port; a network attempt would be a transport error
        let err = gateway("http://127.0.0.1:9", 2_000)
            .generate_quiz("https://example.com/not-wikipedia")
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::Validation(_)));
    }

    #[tokio::test]
    async fn test_generate_quiz_surfaces_remote_detail() {
        let (base, _server) = stub(400, r#"{"detail": "Article too short to generate a quiz"}"#).await;
        let err = gateway(&base, 2_000)
            .generate_quiz("https://en.wikipedia.org/wiki/Stub")
            .await
            .unwrap_err();
        assert_eq!(err, QuizError::Validation("Article too short to generate a quiz".into()));
    }

    #[tokio::test]
    async fn test_generate_quiz_server_error_is_transport() {
        let (base, _server) = stub(500, r#"{"detail": "boom"}"#).await;
        let err = gateway(&base, 2_000)
            .generate_quiz("https://en.wikipedia.org/wiki/Stub")
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::Transport(_)));
    }

    #[tokio::test]
    async fn test_fetch_history_list() {
        let (base, server) = stub(
            200,
            r#"[{"id": 2, "article_id": 1, "article_title": "B", "article_url": "https://en.wikipedia.org/wiki/B", "created_at": "2024-05-02T00:00:00Z"},
                {"id": 1, "article_id": 1, "article_title": "A", "article_url": "https://en.wikipedia.org/wiki/A", "created_at": "2024-05-01T00:00:00Z"}]"#,
        )
        .await;
        let items = gateway(&base, 2_000).fetch_history_list().await.unwrap();
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2, 1]);
        assert!(server.await.unwrap().starts_with("GET /quizzes "));
    }

    #[tokio::test]
    async fn test_fetch_quiz_detail_not_found() {
        let (base, server) = stub(404, r#"{"detail": "Quiz not found"}"#).await;
        let err = gateway(&base, 2_000).fetch_quiz_detail(404).await.unwrap_err();
        assert_eq!(err, QuizError::NotFound(404));
        assert!(server.await.unwrap().starts_with("GET /generate-quiz/404 "));
    }

    #[tokio::test]
    async fn test_malformed_body_is_transport() {
        let (base, _server) = stub(200, r#"{"article": 1}"#).await;
        let err = gateway(&base, 2_000).fetch_quiz_detail(1).await.unwrap_err();
        assert!(matches!(err, QuizError::Transport(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let err = gateway(&base, 200).fetch_history_list().await.unwrap_err();
        assert_eq!(err, QuizError::Timeout(200));
    }

    #[test]
    fn test_error_detail_variants() {
        assert_eq!(error_detail(r#"{"detail": "bad"}"#).as_deref(), Some("bad"));
        assert_eq!(
            error_detail(r#"{"detail": [{"msg": "invalid url"}, {"msg": "too long"}]}"#).as_deref(),
            Some("invalid url; too long")
        );
        assert!(error_detail("not json").is_none());
        assert!(error_detail(r#"{"detail": 3}"#).is_none());
    }
}
