//! # Sign-in and sign-up bodies
//!
//! `POST /login` takes a [`LoginRequest`] and `POST /register` a
//! [`RegisterRequest`]. Both answer with an [`IdentityResponse`] on success and,
//! for expected failures (400 on login, 409 on register), an [`ErrorBody`] whose
//! text is shown to the user verbatim.
//!
//! The server id may be a JSON string or number; it is normalised to a string
//! with [`store::models::deserialize_id`].

use serde::{Deserialize, Serialize};

/// Credentials for `POST /login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user: String,
    pub password: String,
}

/// Profile for `POST /register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub user: String,
    pub password: String,
    pub name: String,
}

/// Successful sign-in or sign-up.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct IdentityResponse {
    #[serde(deserialize_with = "store::models::deserialize_id")]
    pub id: String,
}

/// Error payload of a rejected request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
