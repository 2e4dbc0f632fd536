//! This crate contains the client state shared by every frontend.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`router`] | [`ViewRouter`]: unauthenticated/authenticated state machine |
//! | [`auth`] | [`AuthGateway`]: sign-in and sign-up against the notes service |
//! | [`notes`] | [`NotesController`]: list and create notes for the session |
//! | [`request`] | Loading/error state with stale-response protection |
//! | [`forms`] | Auth form input and completeness checks |
//! | [`messages`] | Localized user-visible strings |
//!
//! Nothing here renders. A frontend reads the state (`view()`,
//! `request_state()`, `notes()`) and draws it however it likes.

pub mod auth;
pub mod forms;
pub mod messages;
pub mod notes;
pub mod request;
pub mod router;

mod repo;
pub use repo::{data_dir, make_session_repo, make_store, APP_DIR};

#[cfg(test)]
mod testing;

pub use auth::{AuthGateway, AuthOutcome};
pub use forms::{SignInForm, SignUpForm};
pub use messages::Messages;
pub use notes::{ComposeState, NotesController, NotesOutcome};
pub use request::{RequestState, RequestTracker};
pub use router::{AuthMode, Dashboard, RouteError, View, ViewRouter};
