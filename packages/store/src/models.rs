//! # Domain models for sessions and notes
//!
//! Defines the data structures shared by every layer of the client. [`Note`] is
//! `Serialize + Deserialize` so the API crate can decode it straight from the
//! notes service responses. [`Session`] has no serde impls: it is only built
//! through [`Session::new`], which refuses blank fields.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Session`] | The signed-in identity: the server-assigned `user_id` and the display `name` (the username typed at sign-in). Both fields are non-empty or the session does not exist. |
//! | [`Note`] | A single note as returned by `GET /notes`: optional server `id`, the body `text`, and an optional `created_at` timestamp. |
//!
//! ## Wire leniency
//!
//! The notes service is not strict about its JSON. A note `id` may be a string
//! or a number, and `createdAt` may be an RFC 3339 string or epoch milliseconds.
//! [`deserialize_id`] and the private timestamp helper normalise both, so the rest
//! of the client only ever sees `String` ids and `DateTime<Utc>` dates.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// The signed-in identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    user_id: String,
    name: String,
}

impl Session {
    /// Build a session. Returns `None` if either field is blank, so a partial
    /// session can never be constructed.
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Option<Self> {
        let user_id = user_id.into();
        let name = name.into();
        if user_id.trim().is_empty() || name.trim().is_empty() {
            return None;
        }
        Some(Self { user_id, name })
    }

    /// Server-assigned identity, sent as the `client-id` header.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Display name shown on the dashboard.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A note owned by the remote store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Server-assigned id, absent for notes the server did not number.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    pub text: String,
    #[serde(
        default,
        rename = "createdAt",
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Calendar date of `created_at`, e.g. `"2024-03-01"`.
    pub fn date_label(&self) -> Option<String> {
        self.created_at
            .map(|ts| ts.date_naive().format("%Y-%m-%d").to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::Float(n) => n.to_string(),
        }
    }
}

/// Deserialize an id that may be a JSON string or number into a `String`.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
    Other(serde_json::Value),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawTimestamp::Millis(ms)) => Utc.timestamp_millis_opt(ms).single(),
        Some(RawTimestamp::Text(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|ts| ts.with_timezone(&Utc)),
        Some(RawTimestamp::Other(_)) | None => None,
    })
}
