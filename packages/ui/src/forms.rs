//! Sign-in and sign-up form input.
//!
//! The forms own the "every field is filled in" rule; the gateway assumes it
//! receives complete input.

use api::{LoginRequest, RegisterRequest};

/// Input of the sign-in form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub user: String,
    pub password: String,
}

impl SignInForm {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Credentials to submit, or `None` while a field is blank.
    pub fn credentials(&self) -> Option<LoginRequest> {
        if is_blank(&self.user) || is_blank(&self.password) {
            return None;
        }
        Some(LoginRequest {
            user: self.user.clone(),
            password: self.password.clone(),
        })
    }
}

/// Input of the sign-up form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub user: String,
    pub password: String,
}

impl SignUpForm {
    pub fn new(
        name: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    /// Profile to submit, or `None` while a field is blank.
    pub fn profile(&self) -> Option<RegisterRequest> {
        if is_blank(&self.name) || is_blank(&self.user) || is_blank(&self.password) {
            return None;
        }
        Some(RegisterRequest {
            user: self.user.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
        })
    }
}

fn is_blank(field: &str) -> bool {
    field.trim().is_empty()
}
