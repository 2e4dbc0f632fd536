//! Loading and error state for one form or controller.
//!
//! Every attempt takes a [`Ticket`] from [`RequestTracker::begin`]. Only the
//! holder of the newest ticket may settle the state, so when two requests
//! overlap the one issued last wins no matter which response arrives first.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Snapshot of a request's visible state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestState {
    pub loading: bool,
    pub error: Option<String>,
}

/// Proof that an attempt was started. Not `Clone`: each attempt settles once.
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct TrackerInner {
    state: RequestState,
    latest: u64,
}

/// Shared handle to a [`RequestState`]. Clones observe the same state.
#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
    inner: Arc<Mutex<TrackerInner>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TrackerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start an attempt: set `loading`, clear the previous error.
    pub fn begin(&self) -> Ticket {
        let mut inner = self.lock();
        inner.latest += 1;
        inner.state = RequestState {
            loading: true,
            error: None,
        };
        Ticket(inner.latest)
    }

    /// Whether no newer attempt has started since `ticket` was issued.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.lock().latest == ticket.0
    }

    /// Settle an attempt. Returns `false`, leaving the state untouched, if the
    /// ticket has been superseded.
    pub fn finish(&self, ticket: Ticket, error: Option<String>) -> bool {
        let mut inner = self.lock();
        if inner.latest != ticket.0 {
            return false;
        }
        inner.state = RequestState {
            loading: false,
            error,
        };
        true
    }

    /// Show an error without issuing a request (input validation).
    pub fn reject(&self, error: impl Into<String>) {
        self.lock().state.error = Some(error.into());
    }

    pub fn state(&self) -> RequestState {
        self.lock().state.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().state.loading
    }

    pub fn error(&self) -> Option<String> {
        self.lock().state.error.clone()
    }
}
