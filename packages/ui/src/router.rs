//! # View router — which screen is showing
//!
//! [`ViewRouter`] is the root of the client. It owns the session repository,
//! the [`AuthGateway`] and the [`NotesController`], and switches between two
//! views:
//!
//! ```text
//!              restore() = None                 restore() = Some(session)
//!   start ───────────────────► Unauthenticated ◄──────┐      │
//!                               │  ▲  mode toggle     │      │
//!            sign-in/up success │  │ (same state)     │      │
//!                               ▼  │                  │      ▼
//!                           Authenticated ──── logout ┘   Authenticated
//! ```
//!
//! Entering `Authenticated` mounts a fresh dashboard and lists the notes.
//! Logging out clears the persisted identity and drops the dashboard.
//!
//! Auth forms can only be submitted while signed out, and the dashboard is only
//! reachable while signed in ([`ViewRouter::dashboard`] returns `None`
//! otherwise).

use api::NotesApi;
use store::{KeyValueStore, Note, Session, SessionRepository, StoreError};

use crate::auth::{AuthGateway, AuthOutcome};
use crate::forms::{SignInForm, SignUpForm};
use crate::messages::Messages;
use crate::notes::{ComposeState, NotesController, NotesOutcome};
use crate::request::RequestState;

/// Which auth form is in front. Display only: both forms stay mounted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

/// The current screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    Unauthenticated { mode: AuthMode },
    Authenticated { session: Session },
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("already signed in as {0}")]
    AlreadySignedIn(String),
}

/// Root state machine of the client.
pub struct ViewRouter<S: KeyValueStore, A: NotesApi> {
    sessions: SessionRepository<S>,
    gateway: AuthGateway<S, A>,
    notes: NotesController<A>,
    api: A,
    messages: &'static Messages,
    view: View,
}

impl<S, A> ViewRouter<S, A>
where
    S: KeyValueStore + Clone,
    A: NotesApi + Clone,
{
    /// Restore the persisted session and open the matching view. When a session
    /// is found the dashboard mounts and fetches the notes. An unreadable
    /// session is logged and treated as signed out, so `logout` can still
    /// clear it.
    pub async fn start(store: S, api: A, messages: &'static Messages) -> Self {
        let sessions = SessionRepository::new(store);
        let restored = sessions.restore().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "saved session could not be read");
            None
        });

        let mut router = Self {
            gateway: AuthGateway::new(sessions.clone(), api.clone(), messages),
            notes: NotesController::new(api.clone(), messages),
            sessions,
            api,
            messages,
            view: View::Unauthenticated {
                mode: AuthMode::default(),
            },
        };

        if let Some(session) = restored {
            tracing::info!(user = session.name(), "restored session");
            router.enter_dashboard(session).await;
        }
        router
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.view {
            View::Authenticated { session } => Some(session),
            View::Unauthenticated { .. } => None,
        }
    }

    pub fn gateway(&self) -> &AuthGateway<S, A> {
        &self.gateway
    }

    /// Bring a different auth form to the front. No effect while signed in.
    pub fn select_mode(&mut self, mode: AuthMode) {
        if let View::Unauthenticated { mode: current } = &mut self.view {
            *current = mode;
        }
    }

    pub async fn submit_sign_in(&mut self, form: &SignInForm) -> Result<AuthOutcome, RouteError> {
        self.ensure_signed_out()?;
        let outcome = match form.credentials() {
            Some(credentials) => self.gateway.sign_in(&credentials).await,
            None => self.gateway.reject_sign_in(),
        };
        self.after_auth(&outcome).await;
        Ok(outcome)
    }

    pub async fn submit_sign_up(&mut self, form: &SignUpForm) -> Result<AuthOutcome, RouteError> {
        self.ensure_signed_out()?;
        let outcome = match form.profile() {
            Some(profile) => self.gateway.sign_up(&profile).await,
            None => self.gateway.reject_sign_up(),
        };
        self.after_auth(&outcome).await;
        Ok(outcome)
    }

    /// Forget the session, on disk and in memory. Allowed in any state; the
    /// view is reset even if the store could not be cleared.
    pub async fn logout(&mut self) -> Result<(), StoreError> {
        let cleared = self.sessions.clear().await;
        if let Some(session) = self.session() {
            tracing::info!(user = session.name(), "signed out");
        }
        self.notes = NotesController::new(self.api.clone(), self.messages);
        self.view = View::Unauthenticated {
            mode: AuthMode::default(),
        };
        cleared
    }

    /// The dashboard, while signed in.
    pub fn dashboard(&self) -> Option<Dashboard<'_, A>> {
        self.session().map(|session| Dashboard {
            session,
            notes: &self.notes,
        })
    }

    fn ensure_signed_out(&self) -> Result<(), RouteError> {
        match self.session() {
            Some(session) => Err(RouteError::AlreadySignedIn(session.name().to_string())),
            None => Ok(()),
        }
    }

    async fn after_auth(&mut self, outcome: &AuthOutcome) {
        if let AuthOutcome::Success(session) = outcome {
            tracing::info!(user = session.name(), "signed in");
            self.enter_dashboard(session.clone()).await;
        }
    }

    async fn enter_dashboard(&mut self, session: Session) {
        self.notes = NotesController::new(self.api.clone(), self.messages);
        self.view = View::Authenticated { session };
        if let Some(dashboard) = self.dashboard() {
            dashboard.refresh().await;
        }
    }
}

/// The signed-in screen: the session paired with its notes controller.
pub struct Dashboard<'a, A: NotesApi> {
    session: &'a Session,
    notes: &'a NotesController<A>,
}

impl<A: NotesApi> Dashboard<'_, A> {
    pub fn session(&self) -> &Session {
        self.session
    }

    pub fn controller(&self) -> &NotesController<A> {
        self.notes
    }

    pub fn notes(&self) -> Vec<Note> {
        self.notes.notes()
    }

    pub fn request_state(&self) -> RequestState {
        self.notes.request_state()
    }

    pub fn compose(&self) -> ComposeState {
        self.notes.compose()
    }

    pub fn shows_empty_hint(&self) -> bool {
        self.notes.shows_empty_hint()
    }

    pub fn toggle_compose(&self) -> bool {
        self.notes.toggle_compose()
    }

    pub fn set_compose_text(&self, text: impl Into<String>) {
        self.notes.set_compose_text(text);
    }

    pub async fn refresh(&self) -> NotesOutcome {
        self.notes.list(self.session).await
    }

    pub async fn create(&self, text: &str) -> NotesOutcome {
        self.notes.create(self.session, text).await
    }

    pub async fn submit_compose(&self) -> NotesOutcome {
        self.notes.submit_compose(self.session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::EN;
    use crate::testing::{Call, Endpoint, FakeApi, Reply};
    use crate::messages::ES;
    use store::{FileStore, Locale, MemoryStore};

    const TWO_NOTES: &str = r#"{"notes":[{"id":1,"text":"a"},{"id":2,"text":"b"}]}"#;

    async fn signed_out(api: &FakeApi) -> (ViewRouter<MemoryStore, FakeApi>, MemoryStore) {
        let store = MemoryStore::new();
        let router = ViewRouter::start(store.clone(), api.clone(), &EN).await;
        (router, store)
    }

    #[tokio::test]
    async fn test_start_without_session() {
        let api = FakeApi::new();
        let (router, _) = signed_out(&api).await;

        assert_eq!(
            router.view(),
            &View::Unauthenticated {
                mode: AuthMode::SignIn
            }
        );
        assert!(router.dashboard().is_none());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_start_with_saved_session_lists_notes() {
        let api = FakeApi::new();
        api.reply(Endpoint::ListNotes, Reply::json(200, TWO_NOTES));
        let store = MemoryStore::new();
        SessionRepository::new(store.clone())
            .save(&Session::new("u1", "ana1").unwrap())
            .await
            .unwrap();

        let router = ViewRouter::start(store, api.clone(), &EN).await;

        let dashboard = router.dashboard().unwrap();
        assert_eq!(dashboard.session().user_id(), "u1");
        assert_eq!(dashboard.notes().len(), 2);
        assert_eq!(
            api.calls(),
            vec![Call::ListNotes {
                client_id: "u1".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_sign_up_scenario() {
        let api = FakeApi::new();
        api.reply(Endpoint::Register, Reply::json(201, r#"{"id":"u1"}"#))
            .reply(Endpoint::ListNotes, Reply::json(200, r#"{"notes":[]}"#));
        let (mut router, store) = signed_out(&api).await;
        router.select_mode(AuthMode::SignUp);

        let outcome = router
            .submit_sign_up(&SignUpForm::new("Ana", "ana1", "x"))
            .await
            .unwrap();

        let expected = Session::new("u1", "ana1").unwrap();
        assert_eq!(outcome, AuthOutcome::Success(expected.clone()));
        assert_eq!(
            router.view(),
            &View::Authenticated {
                session: expected.clone()
            }
        );
        assert!(router.dashboard().unwrap().shows_empty_hint());

        // Survives a restart
        let restored = SessionRepository::new(store).restore().await.unwrap();
        assert_eq!(restored, Some(expected));
    }

    #[tokio::test]
    async fn test_wrong_password_stays_on_auth_view() {
        let api = FakeApi::new();
        api.reply(Endpoint::Login, Reply::json(400, r#"{"error":"bad credentials"}"#));
        let (mut router, _) = signed_out(&api).await;

        let outcome = router
            .submit_sign_in(&SignInForm::new("ana1", "nope"))
            .await
            .unwrap();

        assert_eq!(outcome.error_message(), Some("bad credentials"));
        assert_eq!(
            router.gateway().sign_in_state().error().as_deref(),
            Some("bad credentials")
        );
        assert!(matches!(router.view(), View::Unauthenticated { .. }));
    }

    #[tokio::test]
    async fn test_incomplete_form_issues_no_request() {
        let api = FakeApi::new();
        let (mut router, _) = signed_out(&api).await;

        let outcome = router
            .submit_sign_in(&SignInForm::new("ana1", ""))
            .await
            .unwrap();
        assert_eq!(outcome, AuthOutcome::Validation(EN.missing_fields.to_string()));

        let outcome = router
            .submit_sign_up(&SignUpForm::new("", "ana1", "x"))
            .await
            .unwrap();
        assert_eq!(outcome, AuthOutcome::Validation(EN.missing_fields.to_string()));
        assert_eq!(
            router.gateway().sign_up_state().error().as_deref(),
            Some(EN.missing_fields)
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mode_toggle_is_display_only() {
        let api = FakeApi::new();
        let (mut router, _) = signed_out(&api).await;
        router.gateway().sign_in_state().reject("keep me");

        router.select_mode(AuthMode::SignUp);
        assert_eq!(
            router.view(),
            &View::Unauthenticated {
                mode: AuthMode::SignUp
            }
        );
        router.select_mode(AuthMode::SignUp);
        router.select_mode(AuthMode::SignIn);

        assert_eq!(
            router.gateway().sign_in_state().error().as_deref(),
            Some("keep me")
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_auth_forms_rejected_while_signed_in() {
        let api = FakeApi::new();
        api.reply(Endpoint::Login, Reply::json(200, r#"{"id":"u1"}"#))
            .reply(Endpoint::ListNotes, Reply::json(200, TWO_NOTES));
        let (mut router, _) = signed_out(&api).await;
        router
            .submit_sign_in(&SignInForm::new("ana1", "x"))
            .await
            .unwrap();

        let err = router
            .submit_sign_in(&SignInForm::new("ana1", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, RouteError::AlreadySignedIn(name) if name == "ana1"));

        // Mode toggles are ignored on the dashboard
        router.select_mode(AuthMode::SignUp);
        assert!(router.dashboard().is_some());
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let api = FakeApi::new();
        api.reply(Endpoint::Login, Reply::json(200, r#"{"id":"u1"}"#))
            .reply(Endpoint::ListNotes, Reply::json(200, TWO_NOTES));
        let (mut router, store) = signed_out(&api).await;
        router
            .submit_sign_in(&SignInForm::new("ana1", "x"))
            .await
            .unwrap();
        assert_eq!(router.dashboard().unwrap().notes().len(), 2);

        router.logout().await.unwrap();

        assert!(router.dashboard().is_none());
        assert!(SessionRepository::new(store.clone())
            .restore()
            .await
            .unwrap()
            .is_none());

        // Logging out again, already signed out, is fine
        router.logout().await.unwrap();
        assert!(matches!(router.view(), View::Unauthenticated { .. }));
    }

    #[tokio::test]
    async fn test_logout_when_signed_out_clears_stale_identity() {
        let api = FakeApi::new();
        let store = MemoryStore::new();
        let repo = SessionRepository::new(store.clone());
        // Half-written record: restore reports nothing, but the key is on disk
        store::KeyValueStore::set(&store, store::repo::USER_ID_KEY, "u1")
            .await
            .unwrap();

        let mut router = ViewRouter::start(store.clone(), api, &EN).await;
        router.logout().await.unwrap();

        assert!(store::KeyValueStore::get(&store, store::repo::USER_ID_KEY)
            .await
            .unwrap()
            .is_none());
        assert!(repo.restore().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_new_sign_in_gets_fresh_dashboard() {
        let api = FakeApi::new();
        api.reply(Endpoint::Login, Reply::json(200, r#"{"id":"u1"}"#))
            .reply(Endpoint::ListNotes, Reply::json(200, TWO_NOTES))
            .reply(Endpoint::Login, Reply::json(200, r#"{"id":"u2"}"#))
            .reply(Endpoint::ListNotes, Reply::json(500, ""));
        let (mut router, _) = signed_out(&api).await;

        router
            .submit_sign_in(&SignInForm::new("ana1", "x"))
            .await
            .unwrap();
        router.dashboard().unwrap().toggle_compose();
        router.logout().await.unwrap();

        router
            .submit_sign_in(&SignInForm::new("bob", "y"))
            .await
            .unwrap();
        let dashboard = router.dashboard().unwrap();

        // Nothing from the previous user leaks through a failed fetch
        assert!(dashboard.notes().is_empty());
        assert_eq!(dashboard.compose(), ComposeState::default());
        assert_eq!(
            dashboard.request_state().error.as_deref(),
            Some(EN.notes_fetch_failed)
        );
    }

    #[tokio::test]
    async fn test_dashboard_create_flow() {
        let api = FakeApi::new();
        api.reply(Endpoint::Login, Reply::json(200, r#"{"id":"u1"}"#))
            .reply(Endpoint::ListNotes, Reply::json(200, r#"{"notes":[]}"#))
            .reply(Endpoint::CreateNote, Reply::json(201, ""))
            .reply(Endpoint::ListNotes, Reply::json(200, r#"{"notes":[{"id":1,"text":"a"}]}"#));
        let (mut router, _) = signed_out(&api).await;
        router
            .submit_sign_in(&SignInForm::new("ana1", "x"))
            .await
            .unwrap();

        let dashboard = router.dashboard().unwrap();
        dashboard.toggle_compose();
        dashboard.set_compose_text("a");
        assert_eq!(dashboard.submit_compose().await, NotesOutcome::Created);

        assert_eq!(dashboard.notes().len(), 1);
        assert!(!dashboard.compose().visible);
        assert_eq!(api.count(Endpoint::ListNotes), 2);
    }

    #[tokio::test]
    async fn test_unreadable_session_starts_signed_out_and_logout_clears_it() {
        let dir = std::env::temp_dir().join(format!("notes_client_router_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(store::repo::USER_ID_KEY), [0xff, 0xfe, 0x00]).unwrap();
        std::fs::write(dir.join(store::repo::USER_NAME_KEY), "ana1").unwrap();
        let api = FakeApi::new();

        let mut router = ViewRouter::start(FileStore::new(dir.clone()), api.clone(), &EN).await;

        assert_eq!(
            router.view(),
            &View::Unauthenticated {
                mode: AuthMode::SignIn
            }
        );
        assert!(api.calls().is_empty());

        router.logout().await.unwrap();
        assert!(!dir.join(store::repo::USER_ID_KEY).exists());
        assert!(!dir.join(store::repo::USER_NAME_KEY).exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_spanish_messages() {
        let api = FakeApi::new();
        api.reply(Endpoint::ListNotes, Reply::json(500, ""));
        let store = MemoryStore::new();
        SessionRepository::new(store.clone())
            .save(&Session::new("u1", "ana1").unwrap())
            .await
            .unwrap();

        let router = ViewRouter::start(store, api, Messages::for_locale(Locale::Es)).await;

        assert_eq!(router.messages().welcome, "Bienvenido");
        assert_eq!(
            router.dashboard().unwrap().request_state().error.as_deref(),
            Some("Error al cargar las notas")
        );
        assert_eq!(ES.missing_fields, "Completa todos los campos");
    }
}
