//! Scripted stand-in for the notes service, used by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use api::{
    ApiError, ApiResponse, CreateNoteRequest, LoginRequest, NotesApi, RegisterRequest,
};

use crate::request::RequestTracker;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Register,
    ListNotes,
    CreateNote,
}

#[derive(Clone, Debug)]
pub enum Reply {
    Status(u16, String),
    Delayed(Duration, u16, String),
    Offline,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Self::Status(status, body.to_string())
    }

    pub fn delayed(millis: u64, status: u16, body: &str) -> Self {
        Self::Delayed(Duration::from_millis(millis), status, body.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Login(LoginRequest),
    Register(RegisterRequest),
    ListNotes { client_id: String },
    CreateNote { client_id: String, text: String },
}

#[derive(Default)]
struct FakeInner {
    replies: HashMap<Endpoint, VecDeque<Reply>>,
    calls: Vec<Call>,
    probe: Option<RequestTracker>,
    observed_loading: Vec<bool>,
}

#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<FakeInner>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next call to `endpoint`.
    pub fn reply(&self, endpoint: Endpoint, reply: Reply) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .replies
            .entry(endpoint)
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(
                    (call, endpoint),
                    (Call::Login(_), Endpoint::Login)
                        | (Call::Register(_), Endpoint::Register)
                        | (Call::ListNotes { .. }, Endpoint::ListNotes)
                        | (Call::CreateNote { .. }, Endpoint::CreateNote)
                )
            })
            .count()
    }

    /// Record `tracker.is_loading()` at the moment each request is issued.
    pub fn observe(&self, tracker: RequestTracker) {
        self.inner.lock().unwrap().probe = Some(tracker);
    }

    pub fn observed_loading(&self) -> Vec<bool> {
        self.inner.lock().unwrap().observed_loading.clone()
    }

    fn respond(
        &self,
        endpoint: Endpoint,
        call: Call,
    ) -> impl std::future::Future<Output = Result<ApiResponse, ApiError>> {
        let reply = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(call);
            if let Some(probe) = inner.probe.clone() {
                inner.observed_loading.push(probe.is_loading());
            }
            inner
                .replies
                .get_mut(&endpoint)
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(|| panic!("no reply scripted for {endpoint:?}"))
        };

        async move {
            match reply {
                Reply::Status(status, body) => Ok(ApiResponse::new(status, body)),
                Reply::Delayed(delay, status, body) => {
                    tokio::time::sleep(delay).await;
                    Ok(ApiResponse::new(status, body))
                }
                Reply::Offline => Err(ApiError::Unreachable {
                    url: format!("http://fake/{endpoint:?}"),
                    reason: "connection refused".to_string(),
                }),
            }
        }
    }
}

impl NotesApi for FakeApi {
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl std::future::Future<Output = Result<ApiResponse, ApiError>> {
        self.respond(Endpoint::Login, Call::Login(request.clone()))
    }

    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl std::future::Future<Output = Result<ApiResponse, ApiError>> {
        self.respond(Endpoint::Register, Call::Register(request.clone()))
    }

    fn list_notes(
        &self,
        client_id: &str,
    ) -> impl std::future::Future<Output = Result<ApiResponse, ApiError>> {
        self.respond(
            Endpoint::ListNotes,
            Call::ListNotes {
                client_id: client_id.to_string(),
            },
        )
    }

    fn create_note(
        &self,
        client_id: &str,
        request: &CreateNoteRequest,
    ) -> impl std::future::Future<Output = Result<ApiResponse, ApiError>> {
        self.respond(
            Endpoint::CreateNote,
            Call::CreateNote {
                client_id: client_id.to_string(),
                text: request.text.clone(),
            },
        )
    }
}
