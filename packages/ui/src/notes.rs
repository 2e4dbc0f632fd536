//! # Notes controller — the dashboard's data
//!
//! [`NotesController`] owns everything the dashboard shows: the cached notes,
//! the compose form and the request state. It never patches the cache
//! locally: every successful mutation is followed by a full `GET /notes`, and
//! the cache is only ever replaced by a complete server snapshot.
//!
//! ## Operations
//!
//! | Method | Request | On success | On failure |
//! |--------|---------|------------|------------|
//! | [`list`](NotesController::list) | `GET /notes` | cache replaced | cache kept, error set |
//! | [`create`](NotesController::create) | `POST /notes` then `GET /notes` | compose cleared and hidden | compose kept, error set |
//!
//! `create` rejects blank text before any request is made.
//!
//! Overlapping calls are resolved by [`RequestTracker`] tickets: a response that
//! belongs to an older call is dropped without touching the cache.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use api::{CreateNoteRequest, NotesApi, NotesResponse};
use store::{Note, Session};

use crate::messages::Messages;
use crate::request::{RequestState, RequestTracker, Ticket};

/// Result of a notes operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotesOutcome {
    /// The cache now holds this many notes.
    Synced(usize),
    /// The note was stored; see the request state for the refresh result.
    Created,
    /// Rejected before any request.
    Invalid(String),
    /// The server answered with a non-2xx status or an unreadable body.
    Failure(String),
    /// No response was received.
    Network(String),
    /// A newer call started before this one finished.
    Superseded,
}

impl NotesOutcome {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Invalid(msg) | Self::Failure(msg) | Self::Network(msg) => Some(msg),
            Self::Synced(_) | Self::Created | Self::Superseded => None,
        }
    }
}

/// State of the "new note" form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposeState {
    pub visible: bool,
    pub text: String,
}

#[derive(Debug, Default)]
struct DashboardData {
    notes: Vec<Note>,
    compose: ComposeState,
}

/// Synchronises the local notes cache with the remote store.
#[derive(Clone)]
pub struct NotesController<A: NotesApi> {
    api: A,
    messages: &'static Messages,
    request: RequestTracker,
    data: Arc<Mutex<DashboardData>>,
}

impl<A: NotesApi> NotesController<A> {
    pub fn new(api: A, messages: &'static Messages) -> Self {
        Self {
            api,
            messages,
            request: RequestTracker::new(),
            data: Arc::default(),
        }
    }

    fn data(&self) -> MutexGuard<'_, DashboardData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the cached notes, in server order.
    pub fn notes(&self) -> Vec<Note> {
        self.data().notes.clone()
    }

    pub fn compose(&self) -> ComposeState {
        self.data().compose.clone()
    }

    pub fn request_state(&self) -> RequestState {
        self.request.state()
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.request
    }

    /// Whether the "no notes yet" hint should be shown.
    pub fn shows_empty_hint(&self) -> bool {
        self.data().notes.is_empty() && !self.request.is_loading()
    }

    /// Show or hide the compose form. The text is kept either way.
    pub fn toggle_compose(&self) -> bool {
        let mut data = self.data();
        data.compose.visible = !data.compose.visible;
        data.compose.visible
    }

    pub fn set_compose_text(&self, text: impl Into<String>) {
        self.data().compose.text = text.into();
    }

    /// Replace the cache with the server's current notes.
    pub async fn list(&self, session: &Session) -> NotesOutcome {
        let ticket = self.request.begin();
        let outcome = self.fetch(session, &ticket).await;
        self.settle(ticket, outcome)
    }

    /// Store a new note, then refresh the cache.
    pub async fn create(&self, session: &Session, text: &str) -> NotesOutcome {
        if text.trim().is_empty() {
            self.request.reject(self.messages.empty_note);
            return NotesOutcome::Invalid(self.messages.empty_note.to_string());
        }

        let ticket = self.request.begin();
        let request = CreateNoteRequest {
            text: text.to_string(),
        };

        match self.api.create_note(session.user_id(), &request).await {
            Ok(resp) if resp.is_success() => {}
            Ok(resp) => {
                tracing::debug!(status = resp.status, "create note rejected");
                let outcome = NotesOutcome::Failure(self.messages.note_create_failed.to_string());
                return self.settle(ticket, outcome);
            }
            Err(e) => {
                tracing::error!(url = e.url(), error = %e, "create note request failed");
                let outcome = NotesOutcome::Network(self.messages.note_create_network.to_string());
                return self.settle(ticket, outcome);
            }
        }

        self.data().compose = ComposeState::default();

        // The refresh takes its own, newer ticket. A failed refresh stays
        // visible, but the note itself was created.
        drop(ticket);
        self.list(session).await;
        NotesOutcome::Created
    }

    /// Submit the compose form.
    pub async fn submit_compose(&self, session: &Session) -> NotesOutcome {
        let text = self.data().compose.text.clone();
        self.create(session, &text).await
    }

    /// `GET /notes` under the caller's ticket. Applies the result to the cache
    /// only if the ticket is still current; never touches the request state.
    async fn fetch(&self, session: &Session, ticket: &Ticket) -> NotesOutcome {
        let resp = match self.api.list_notes(session.user_id()).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(url = e.url(), error = %e, "fetch notes request failed");
                return NotesOutcome::Network(self.messages.notes_fetch_network.to_string());
            }
        };

        if !resp.is_success() {
            tracing::debug!(status = resp.status, "fetch notes rejected");
            return NotesOutcome::Failure(self.messages.notes_fetch_failed.to_string());
        }

        let notes = match resp.json::<NotesResponse>() {
            Ok(body) => body.into_notes(),
            Err(e) => {
                tracing::warn!(error = %e, "notes response could not be decoded");
                return NotesOutcome::Failure(self.messages.notes_fetch_failed.to_string());
            }
        };

        if !self.request.is_current(ticket) {
            return NotesOutcome::Superseded;
        }

        let count = notes.len();
        self.data().notes = notes;
        NotesOutcome::Synced(count)
    }

    fn settle(&self, ticket: Ticket, outcome: NotesOutcome) -> NotesOutcome {
        if outcome == NotesOutcome::Superseded {
            return outcome;
        }
        let error = outcome.error_message().map(str::to_string);
        if self.request.finish(ticket, error) {
            outcome
        } else {
            NotesOutcome::Superseded
        }
    }
}
