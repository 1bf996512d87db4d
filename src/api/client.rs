use anyhow::Result;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::debug;

use super::types::{ErrorBody, Horse, HorseEnvelope, HorsesEnvelope, LoginResponse};
use crate::notify::SharedNotifier;
use crate::session::SharedSession;
use crate::utils::ApiError;

/// The single chokepoint for outbound API calls.
///
/// Injects the bearer credential read fresh from the session on every
/// request, applies the fixed request timeout, and translates every failure
/// into exactly one notification class before re-raising it. No retry, no
/// backoff: one failed attempt is one reported failure.
#[derive(Clone)]
pub struct ApiGateway {
    client: Client,
    base_url: String,
    session: SharedSession,
    notifier: SharedNotifier,
}

impl ApiGateway {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: SharedSession,
        notifier: SharedNotifier,
    ) -> Result<Self> {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url,
            session,
            notifier,
        })
    }

    /// Authenticate and return the bearer token
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let request = self.request(self.client.post(self.url("login"))).json(
            &serde_json::json!({ "email": email, "password": password }),
        );

        let response = self.send(request).await?;
        let body: LoginResponse = match response.json().await {
            Ok(body) => body,
            Err(_) => return Err(self.report(ApiError::ServerFailure)),
        };

        match body.data.and_then(|d| d.token) {
            Some(token) if body.status => Ok(token),
            _ => Err(self.report(ApiError::InvalidCredentials)),
        }
    }

    /// Fetch the whole catalog; filtering and pagination happen client-side
    pub async fn fetch_horses(&self) -> Result<Vec<Horse>, ApiError> {
        let response = self.send(self.request(self.client.get(self.url("horses")))).await?;
        let envelope: HorsesEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(_) => return Err(self.report(ApiError::ServerFailure)),
        };
        debug!("Fetched {} horses", envelope.data.data.len());
        Ok(envelope.data.data)
    }

    /// Fetch a single record; a reply without a `horse` field is not-found
    pub async fn get_horse(&self, id: u64) -> Result<Horse, ApiError> {
        let url = self.url(&format!("horses/{}", id));
        let response = self.send(self.request(self.client.get(url))).await?;
        let envelope: HorseEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(_) => return Err(self.report(ApiError::ServerFailure)),
        };
        match envelope.horse {
            Some(horse) => Ok(horse),
            None => Err(self.report(ApiError::NotFound)),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer header when a token exists. The token is read fresh
    /// on every request, never cached across requests; without one the
    /// request goes out bare and the server rejects it.
    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        match request.send().await {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) => Err(self.report(classify_response(response).await)),
            Err(e) => Err(self.report(classify_transport(&e))),
        }
    }

    /// Emit the notification for an error and hand it back unchanged
    fn report(&self, err: ApiError) -> ApiError {
        match &err {
            // Field-level errors are displayed individually
            ApiError::ValidationFailure(messages) => {
                for message in messages {
                    self.notifier.error(message);
                }
            }
            other => self.notifier.error(&other.to_string()),
        }
        err
    }
}

/// Map a transport-level failure to its notification class
fn classify_transport(err: &reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::RequestTimeout
    } else if err.is_connect() {
        ApiError::NetworkUnreachable
    } else {
        ApiError::ServerFailure
    }
}

/// Map a server-reported failure to its notification class
async fn classify_response(response: Response) -> ApiError {
    let body: ErrorBody = match response.json().await {
        Ok(body) => body,
        Err(_) => return ApiError::ServerFailure,
    };

    if body.status == Some(false) {
        if body.msg.as_deref() == Some("Invalid credentials") {
            return ApiError::InvalidCredentials;
        }
        let field_errors = body.field_errors();
        if !field_errors.is_empty() {
            return ApiError::ValidationFailure(field_errors);
        }
    }

    ApiError::ServerFailure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoticeBoard;
    use crate::session::Session;
    use crate::store::MemoryStore;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    struct TestServer {
        base_url: String,
        captured: Arc<Mutex<String>>,
        connections: Arc<AtomicUsize>,
    }

    /// Minimal HTTP server: records each request, then either replies with
    /// the canned response or stalls forever (for timeout tests)
    async fn spawn_server(response: Option<String>) -> TestServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let captured = Arc::new(Mutex::new(String::new()));
        let connections = Arc::new(AtomicUsize::new(0));

        let captured_clone = captured.clone();
        let connections_clone = connections.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                connections_clone.fetch_add(1, Ordering::SeqCst);

                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                *captured_clone.lock() = String::from_utf8_lossy(&buf[..n]).to_string();

                match &response {
                    Some(canned) => {
                        let _ = socket.write_all(canned.as_bytes()).await;
                    }
                    None => {
                        // Hold the connection open without answering
                        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
                    }
                }
            }
        });

        TestServer {
            base_url: format!("http://{}/", addr),
            captured,
            connections,
        }
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    fn gateway(base_url: &str, timeout: Duration, token: Option<&str>) -> (ApiGateway, NoticeBoard) {
        let board = NoticeBoard::new();
        let session = Arc::new(Session::new(
            Arc::new(MemoryStore::new()),
            Arc::new(board.clone()),
        ));
        if let Some(token) = token {
            session.login(token);
        }
        let gateway =
            ApiGateway::new(base_url, timeout, session, Arc::new(board.clone())).unwrap();
        (gateway, board)
    }

    #[tokio::test]
    async fn test_timeout_surfaces_without_retry() {
        let server = spawn_server(None).await;
        let (gateway, board) = gateway(&server.base_url, Duration::from_millis(200), None);

        let err = gateway.fetch_horses().await.unwrap_err();
        assert!(matches!(err, ApiError::RequestTimeout));
        assert_eq!(server.connections.load(Ordering::SeqCst), 1);

        let notices = board.snapshot();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].message.contains("took too long"));
    }

    #[tokio::test]
    async fn test_unreachable_server_maps_to_network_error() {
        // Bind and drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let (gateway, _) = gateway(
            &format!("http://{}/", addr),
            Duration::from_secs(2),
            None,
        );
        let err = gateway.fetch_horses().await.unwrap_err();
        assert!(matches!(err, ApiError::NetworkUnreachable));
    }

    #[tokio::test]
    async fn test_bearer_header_reflects_session() {
        let body = r#"{"data": {"data": []}}"#;
        let server = spawn_server(Some(http_response("200 OK", body))).await;
        let (gateway, _) = gateway(&server.base_url, Duration::from_secs(2), Some("tok-123"));

        gateway.fetch_horses().await.unwrap();
        let request = server.captured.lock().clone();
        assert!(request.contains("authorization: Bearer tok-123")
            || request.contains("Authorization: Bearer tok-123"));
    }

    #[tokio::test]
    async fn test_no_bearer_header_without_token() {
        let body = r#"{"data": {"data": []}}"#;
        let server = spawn_server(Some(http_response("200 OK", body))).await;
        let (gateway, _) = gateway(&server.base_url, Duration::from_secs(2), None);

        gateway.fetch_horses().await.unwrap();
        let request = server.captured.lock().to_lowercase();
        assert!(!request.contains("authorization:"));
    }

    #[tokio::test]
    async fn test_login_returns_token_on_success() {
        let body = r#"{"status": true, "data": {"token": "fresh-token"}}"#;
        let server = spawn_server(Some(http_response("200 OK", body))).await;
        let (gateway, _) = gateway(&server.base_url, Duration::from_secs(2), None);

        let token = gateway.login("a@b.c", "secret123").await.unwrap();
        assert_eq!(token, "fresh-token");

        let request = server.captured.lock().clone();
        assert!(request.starts_with("POST /login"));
    }

    #[tokio::test]
    async fn test_rejected_login_maps_to_invalid_credentials() {
        let body = r#"{"status": false, "msg": "Invalid credentials"}"#;
        let server = spawn_server(Some(http_response("401 Unauthorized", body))).await;
        let (gateway, board) = gateway(&server.base_url, Duration::from_secs(2), None);

        let err = gateway.login("a@b.c", "wrong").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredentials));
        assert_eq!(board.snapshot()[0].message, "Invalid credentials");
    }

    #[tokio::test]
    async fn test_field_errors_notify_individually() {
        let body = r#"{"status": false, "data": {"email": ["Email is required"], "password": ["Password is required"]}}"#;
        let server = spawn_server(Some(http_response("422 Unprocessable Entity", body))).await;
        let (gateway, board) = gateway(&server.base_url, Duration::from_secs(2), None);

        let err = gateway.login("", "").await.unwrap_err();
        match err {
            ApiError::ValidationFailure(messages) => assert_eq!(messages.len(), 2),
            other => panic!("expected ValidationFailure, got {:?}", other),
        }
        assert_eq!(board.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_horse_maps_to_not_found() {
        let body = r#"{"horse": null}"#;
        let server = spawn_server(Some(http_response("200 OK", body))).await;
        let (gateway, board) = gateway(&server.base_url, Duration::from_secs(2), Some("tok"));

        let err = gateway.get_horse(42).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        assert!(board.snapshot()[0].message.contains("not found"));

        let request = server.captured.lock().clone();
        assert!(request.starts_with("GET /horses/42"));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_server_failure() {
        let server =
            spawn_server(Some(http_response("500 Internal Server Error", "{}"))).await;
        let (gateway, _) = gateway(&server.base_url, Duration::from_secs(2), Some("tok"));

        let err = gateway.fetch_horses().await.unwrap_err();
        assert!(matches!(err, ApiError::ServerFailure));
    }
}
