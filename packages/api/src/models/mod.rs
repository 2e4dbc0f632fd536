//! JSON bodies exchanged with the notes service.

mod auth;
mod notes;

pub use auth::{ErrorBody, IdentityResponse, LoginRequest, RegisterRequest};
pub use notes::{CreateNoteRequest, NotesResponse};
