use serde::{Deserialize, Serialize};

use store::Note;

/// Body of `GET /notes`. A missing or `null` list is empty.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NotesResponse {
    #[serde(default)]
    pub notes: Option<Vec<Note>>,
}

impl NotesResponse {
    pub fn into_notes(self) -> Vec<Note> {
        self.notes.unwrap_or_default()
    }
}

/// Body of `POST /notes`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateNoteRequest {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_keep_server_order() {
        let resp: NotesResponse =
            serde_json::from_str(r#"{"notes":[{"id":1,"text":"a"},{"id":2,"text":"b"}]}"#)
                .unwrap();
        let notes = resp.into_notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "a");
        assert_eq!(notes[1].id.as_deref(), Some("2"));
    }

    #[test]
    fn test_missing_notes_field() {
        let resp: NotesResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(resp.into_notes().is_empty());

        let resp: NotesResponse = serde_json::from_str(r#"{"notes":null}"#).unwrap();
        assert!(resp.into_notes().is_empty());
    }
}
