//! Plain-text rendering of the current view.

use std::fmt::Write;

use api::NotesApi;
use store::KeyValueStore;
use ui::{AuthMode, Dashboard, Messages, View, ViewRouter};

/// Render whatever the router is showing.
pub fn view<S, A>(router: &ViewRouter<S, A>) -> String
where
    S: KeyValueStore + Clone,
    A: NotesApi + Clone,
{
    match (router.view(), router.dashboard()) {
        (_, Some(dashboard)) => render_dashboard(&dashboard, router.messages()),
        (View::Unauthenticated { mode }, None) => {
            let tracker = match mode {
                AuthMode::SignIn => router.gateway().sign_in_state(),
                AuthMode::SignUp => router.gateway().sign_up_state(),
            };
            render_auth(*mode, tracker.error().as_deref())
        }
        (View::Authenticated { .. }, None) => String::new(),
    }
}

fn render_auth(mode: AuthMode, error: Option<&str>) -> String {
    let mut out = String::new();
    match mode {
        AuthMode::SignIn => {
            out.push_str("[ Sign in ]   Sign up\n");
            out.push_str("  signin <user> <password>\n");
        }
        AuthMode::SignUp => {
            out.push_str("  Sign in   [ Sign up ]\n");
            out.push_str("  signup <name> <user> <password>\n");
        }
    }
    if let Some(error) = error {
        let _ = writeln!(out, "! {error}");
    }
    out
}

fn render_dashboard<A: NotesApi>(dashboard: &Dashboard<'_, A>, messages: &Messages) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}, {}", messages.welcome, dashboard.session().name());

    let state = dashboard.request_state();
    if state.loading {
        let _ = writeln!(out, "  {}", messages.loading_notes);
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "! {error}");
    }

    let notes = dashboard.notes();
    if dashboard.shows_empty_hint() {
        let _ = writeln!(out, "  {}", messages.no_notes);
    }
    for note in &notes {
        match note.date_label() {
            Some(date) => {
                let _ = writeln!(out, "- {date}  {}", note.text);
            }
            None => {
                let _ = writeln!(out, "- {}", note.text);
            }
        }
    }

    let compose = dashboard.compose();
    if compose.visible {
        let _ = writeln!(out, "> {}", compose.text);
    }
    out
}
