//! Typed HTTP client for the notes service.

use crate::error::ApiError;
use crate::models::{CreateNoteRequest, LoginRequest, RegisterRequest};
use crate::{ApiResponse, NotesApi, CLIENT_ID_HEADER};

/// `reqwest` implementation of [`NotesApi`].
#[derive(Clone, Debug)]
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Use a preconfigured `reqwest::Client` (proxy settings, TLS roots).
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        url: String,
    ) -> Result<ApiResponse, ApiError> {
        let resp = request.send().await.map_err(|e| ApiError::Unreachable {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| ApiError::Interrupted {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        tracing::debug!(%url, status, "notes service responded");
        Ok(ApiResponse { status, body })
    }
}

impl NotesApi for HttpClient {
    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint("/login");
        tracing::debug!(user = %request.user, "POST /login");
        self.execute(self.client.post(&url).json(request), url).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint("/register");
        tracing::debug!(user = %request.user, "POST /register");
        self.execute(self.client.post(&url).json(request), url).await
    }

    async fn list_notes(&self, client_id: &str) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint("/notes");
        tracing::debug!(client_id, "GET /notes");
        let request = self.client.get(&url).header(CLIENT_ID_HEADER, client_id);
        self.execute(request, url).await
    }

    async fn create_note(
        &self,
        client_id: &str,
        request: &CreateNoteRequest,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint("/notes");
        tracing::debug!(client_id, "POST /notes");
        let request = self
            .client
            .post(&url)
            .header(CLIENT_ID_HEADER, client_id)
            .json(request);
        self.execute(request, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::body::Bytes;
    use axum::extract::State;
    use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
    use axum::Router;
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    /// One request as the stub server saw it.
    #[derive(Clone, Debug)]
    struct Seen {
        method: Method,
        path: String,
        client_id: Option<String>,
        body: Bytes,
    }

    impl Seen {
        fn json(&self) -> Value {
            serde_json::from_slice(&self.body).unwrap()
        }
    }

    #[derive(Clone)]
    struct Stub {
        status: StatusCode,
        body: &'static str,
        seen: Arc<Mutex<Vec<Seen>>>,
    }

    async fn record(
        State(stub): State<Stub>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
        let client_id = headers
            .get(CLIENT_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        stub.seen.lock().unwrap().push(Seen {
            method,
            path: uri.path().to_string(),
            client_id,
            body,
        });
        (
            stub.status,
            [(header::CONTENT_TYPE, "application/json")],
            stub.body,
        )
    }

    /// Serve every request with `status` and `body`, recording what arrives.
    async fn stub_server(status: StatusCode, body: &'static str) -> (String, Arc<Mutex<Vec<Seen>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(record).with_state(Stub {
            status,
            body,
            seen: seen.clone(),
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/"), seen)
    }

    fn only(seen: &Arc<Mutex<Vec<Seen>>>) -> Seen {
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        seen[0].clone()
    }

    fn client(base_url: &str) -> HttpClient {
        let inner = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpClient::with_client(base_url, inner)
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let api = HttpClient::new("http://localhost:3000/");
        assert_eq!(api.base_url(), "http://localhost:3000");
        assert_eq!(api.endpoint("/notes"), "http://localhost:3000/notes");
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let (base, seen) = stub_server(StatusCode::OK, r#"{"id":"u1"}"#).await;

        let resp = client(&base)
            .login(&LoginRequest {
                user: "ana1".to_string(),
                password: "x".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, r#"{"id":"u1"}"#);

        let request = only(&seen);
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/login");
        assert_eq!(request.json(), json!({"user": "ana1", "password": "x"}));
    }

    #[tokio::test]
    async fn test_error_status_is_not_an_error() {
        let (base, seen) = stub_server(StatusCode::CONFLICT, r#"{"error":"exists"}"#).await;

        let resp = client(&base)
            .register(&RegisterRequest {
                user: "ana1".to_string(),
                password: "x".to_string(),
                name: "Ana".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.status, 409);
        assert_eq!(resp.error_message().as_deref(), Some("exists"));

        let request = only(&seen);
        assert_eq!(request.path, "/register");
        assert_eq!(
            request.json(),
            json!({"user": "ana1", "password": "x", "name": "Ana"})
        );
    }

    #[tokio::test]
    async fn test_list_notes_sends_client_id_header() {
        let (base, seen) = stub_server(StatusCode::OK, r#"{"notes":[]}"#).await;

        let resp = client(&base).list_notes("u1").await.unwrap();
        assert!(resp.is_success());

        let request = only(&seen);
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/notes");
        assert_eq!(request.client_id.as_deref(), Some("u1"));
        assert!(request.body.is_empty());
    }

    #[tokio::test]
    async fn test_create_note_body_and_header() {
        let (base, seen) = stub_server(StatusCode::CREATED, "").await;

        let resp = client(&base)
            .create_note(
                "u1",
                &CreateNoteRequest {
                    text: "buy milk".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(resp.status, 201);

        let request = only(&seen);
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/notes");
        assert_eq!(request.client_id.as_deref(), Some("u1"));
        assert_eq!(request.json(), json!({"text": "buy milk"}));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Grab a free port, then close it so nothing is listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}"))
            .list_notes("u1")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unreachable { .. }));
        assert_eq!(err.url(), format!("http://{addr}/notes"));
    }
}
