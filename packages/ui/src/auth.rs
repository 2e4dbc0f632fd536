//! # Auth gateway — sign-in and sign-up
//!
//! [`AuthGateway`] sends the sign-in and sign-up requests, turns the status
//! code of the answer into an [`AuthOutcome`], and on success persists the new
//! [`Session`] through the [`SessionRepository`].
//!
//! ## Status handling
//!
//! | Operation | Success | Expected failure | Anything else |
//! |-----------|---------|------------------|---------------|
//! | [`sign_in`](AuthGateway::sign_in) | 200 `{id}` | 400 `{error}` | generic failure |
//! | [`sign_up`](AuthGateway::sign_up) | 201 `{id}` | 409 `{error}` | generic failure |
//!
//! The expected failures show the server's text; when the body carries none the
//! localized default is used instead. A transport failure yields the network
//! message and is logged.
//!
//! Each form has its own [`RequestTracker`], so the sign-in spinner is unaffected
//! by a pending sign-up and vice versa.

use api::{ApiError, ApiResponse, IdentityResponse, LoginRequest, NotesApi, RegisterRequest};
use store::{KeyValueStore, Session, SessionRepository};

use crate::messages::Messages;
use crate::request::{RequestTracker, Ticket};

/// Result of a sign-in or sign-up attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The server accepted the credentials; the session has been saved.
    Success(Session),
    /// Input was rejected, either by the form or by the server (400/409).
    Validation(String),
    /// The server answered with an unexpected status or body.
    Failure(String),
    /// No response was received.
    Network(String),
    /// A newer attempt on the same form started before this one finished.
    Superseded,
}

impl AuthOutcome {
    /// Message to display, if the outcome is an error.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Validation(msg) | Self::Failure(msg) | Self::Network(msg) => Some(msg),
            Self::Success(_) | Self::Superseded => None,
        }
    }
}

#[derive(Clone, Copy)]
enum Flow {
    SignIn,
    SignUp,
}

impl Flow {
    fn success_status(self) -> u16 {
        match self {
            Self::SignIn => 200,
            Self::SignUp => 201,
        }
    }

    fn expected_failure_status(self) -> u16 {
        match self {
            Self::SignIn => 400,
            Self::SignUp => 409,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::SignIn => "sign-in",
            Self::SignUp => "sign-up",
        }
    }
}

/// Issues authentication requests and populates the session store.
#[derive(Clone)]
pub struct AuthGateway<S: KeyValueStore, A: NotesApi> {
    sessions: SessionRepository<S>,
    api: A,
    messages: &'static Messages,
    sign_in: RequestTracker,
    sign_up: RequestTracker,
}

impl<S: KeyValueStore, A: NotesApi> AuthGateway<S, A> {
    pub fn new(sessions: SessionRepository<S>, api: A, messages: &'static Messages) -> Self {
        Self {
            sessions,
            api,
            messages,
            sign_in: RequestTracker::new(),
            sign_up: RequestTracker::new(),
        }
    }

    /// Loading/error state of the sign-in form.
    pub fn sign_in_state(&self) -> &RequestTracker {
        &self.sign_in
    }

    /// Loading/error state of the sign-up form.
    pub fn sign_up_state(&self) -> &RequestTracker {
        &self.sign_up
    }

    /// Show the "fill in all fields" error on the sign-in form.
    pub fn reject_sign_in(&self) -> AuthOutcome {
        self.reject_incomplete(&self.sign_in)
    }

    /// Show the "fill in all fields" error on the sign-up form.
    pub fn reject_sign_up(&self) -> AuthOutcome {
        self.reject_incomplete(&self.sign_up)
    }

    fn reject_incomplete(&self, tracker: &RequestTracker) -> AuthOutcome {
        tracker.reject(self.messages.missing_fields);
        AuthOutcome::Validation(self.messages.missing_fields.to_string())
    }

    pub async fn sign_in(&self, credentials: &LoginRequest) -> AuthOutcome {
        let ticket = self.sign_in.begin();
        let result = self.api.login(credentials).await;
        let outcome = self.classify(Flow::SignIn, &credentials.user, result);
        self.settle(&self.sign_in, ticket, outcome).await
    }

    pub async fn sign_up(&self, profile: &RegisterRequest) -> AuthOutcome {
        let ticket = self.sign_up.begin();
        let result = self.api.register(profile).await;
        let outcome = self.classify(Flow::SignUp, &profile.user, result);
        self.settle(&self.sign_up, ticket, outcome).await
    }

    fn classify(
        &self,
        flow: Flow,
        user: &str,
        result: Result<ApiResponse, ApiError>,
    ) -> AuthOutcome {
        let generic = match flow {
            Flow::SignIn => self.messages.sign_in_failed,
            Flow::SignUp => self.messages.sign_up_failed,
        };

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(url = e.url(), error = %e, "{} request failed", flow.label());
                return AuthOutcome::Network(self.messages.network_error.to_string());
            }
        };

        if resp.status == flow.success_status() {
            let session = resp
                .json::<IdentityResponse>()
                .map_err(|e| e.to_string())
                .and_then(|identity| {
                    Session::new(identity.id, user).ok_or_else(|| "empty identity".to_string())
                });
            return match session {
                Ok(session) => AuthOutcome::Success(session),
                Err(reason) => {
                    tracing::warn!(%reason, "{} succeeded with a malformed body", flow.label());
                    AuthOutcome::Failure(generic.to_string())
                }
            };
        }

        if resp.status == flow.expected_failure_status() {
            let fallback = match flow {
                Flow::SignIn => self.messages.sign_in_rejected,
                Flow::SignUp => self.messages.sign_up_conflict,
            };
            return AuthOutcome::Validation(
                resp.error_message()
                    .unwrap_or_else(|| fallback.to_string()),
            );
        }

        tracing::debug!(status = resp.status, "{} failed", flow.label());
        AuthOutcome::Failure(generic.to_string())
    }

    async fn settle(
        &self,
        tracker: &RequestTracker,
        ticket: Ticket,
        outcome: AuthOutcome,
    ) -> AuthOutcome {
        if !tracker.is_current(&ticket) {
            return AuthOutcome::Superseded;
        }

        let error = outcome.error_message().map(str::to_string);
        if !tracker.finish(ticket, error) {
            return AuthOutcome::Superseded;
        }

        if let AuthOutcome::Success(session) = &outcome {
            if let Err(e) = self.sessions.save(session).await {
                tracing::warn!(error = %e, "failed to persist session");
            }
        }
        outcome
    }
}
