//! User-visible text, one table per [`Locale`].

use store::Locale;

/// Every message the client can show.
#[derive(Debug, PartialEq, Eq)]
pub struct Messages {
    pub missing_fields: &'static str,
    pub sign_in_rejected: &'static str,
    pub sign_in_failed: &'static str,
    pub sign_up_conflict: &'static str,
    pub sign_up_failed: &'static str,
    pub network_error: &'static str,
    pub empty_note: &'static str,
    pub notes_fetch_failed: &'static str,
    pub notes_fetch_network: &'static str,
    pub note_create_failed: &'static str,
    pub note_create_network: &'static str,
    pub no_notes: &'static str,
    pub loading_notes: &'static str,
    pub welcome: &'static str,
}

pub static EN: Messages = Messages {
    missing_fields: "Please fill in all fields",
    sign_in_rejected: "Incorrect user or password",
    sign_in_failed: "Sign in failed",
    sign_up_conflict: "User already exists",
    sign_up_failed: "Registration failed",
    network_error: "Network error. Please try again.",
    empty_note: "The note text cannot be empty",
    notes_fetch_failed: "Could not load notes",
    notes_fetch_network: "Network error while loading notes",
    note_create_failed: "Could not create the note",
    note_create_network: "Network error while creating the note",
    no_notes: "You have no notes yet. Create your first note!",
    loading_notes: "Loading notes...",
    welcome: "Welcome",
};

pub static ES: Messages = Messages {
    missing_fields: "Completa todos los campos",
    sign_in_rejected: "Usuario o contraseña incorrectos",
    sign_in_failed: "Error al iniciar sesión",
    sign_up_conflict: "Usuario ya existente",
    sign_up_failed: "Error en el registro",
    network_error: "Error de red. Inténtalo de nuevo.",
    empty_note: "El texto de la nota no puede estar vacío",
    notes_fetch_failed: "Error al cargar las notas",
    notes_fetch_network: "Error de red al cargar las notas",
    note_create_failed: "Error al crear la nota",
    note_create_network: "Error de red al crear la nota",
    no_notes: "No tienes notas aún. ¡Crea tu primera nota!",
    loading_notes: "Cargando notas...",
    welcome: "Bienvenido",
};

impl Messages {
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::En => &EN,
            Locale::Es => &ES,
        }
    }
}
