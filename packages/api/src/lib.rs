//! # API crate — typed access to the remote notes service
//!
//! This crate is the only place that speaks HTTP. It defines the request and
//! response bodies of the notes service, the [`NotesApi`] trait that the rest of
//! the client programs against, and [`HttpClient`], the `reqwest` implementation.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`error`] | [`ApiError`]: transport failures (no usable response) |
//! | [`http`] | [`HttpClient`], a `reqwest::Client` bound to a configured base URL |
//! | [`models`] | JSON bodies for `/login`, `/register` and `/notes` |
//!
//! ## Endpoints
//!
//! | Method | Path | Request | Success |
//! |--------|------|---------|---------|
//! | POST | `/login` | [`LoginRequest`] | 200 [`IdentityResponse`] |
//! | POST | `/register` | [`RegisterRequest`] | 201 [`IdentityResponse`] |
//! | GET | `/notes` | header [`CLIENT_ID_HEADER`] | 2xx [`NotesResponse`] |
//! | POST | `/notes` | header [`CLIENT_ID_HEADER`], [`CreateNoteRequest`] | 2xx |
//!
//! ## Status codes are data
//!
//! A response with any status is returned as an [`ApiResponse`]; only the absence
//! of a response is an [`ApiError`]. Deciding what a 400 or a 409 means is the job
//! of the `ui` crate, which owns the user-visible messages.

use serde::de::DeserializeOwned;

pub mod error;
pub mod http;
pub mod models;

pub use error::ApiError;
pub use http::HttpClient;
pub use models::{
    CreateNoteRequest, ErrorBody, IdentityResponse, LoginRequest, NotesResponse,
    RegisterRequest,
};
pub use store::{Note, Session};

/// Header carrying the user id on every notes request.
pub const CLIENT_ID_HEADER: &str = "client-id";

/// Status and raw body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Server-provided error text: `error`, falling back to `message`.
    /// Blank or undecodable bodies yield `None`.
    pub fn error_message(&self) -> Option<String> {
        let body: ErrorBody = self.json().ok()?;
        body.error
            .or(body.message)
            .filter(|msg| !msg.trim().is_empty())
    }
}

/// Async trait over the notes service endpoints.
pub trait NotesApi {
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl std::future::Future<Output = Result<ApiResponse, ApiError>>;
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl std::future::Future<Output = Result<ApiResponse, ApiError>>;
    fn list_notes(
        &self,
        client_id: &str,
    ) -> impl std::future::Future<Output = Result<ApiResponse, ApiError>>;
    fn create_note(
        &self,
        client_id: &str,
        request: &CreateNoteRequest,
    ) -> impl std::future::Future<Output = Result<ApiResponse, ApiError>>;
}
