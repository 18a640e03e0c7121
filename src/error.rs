use std::path::PathBuf;

use thiserror::Error;

use crate::navigation::{NavEvent, Screen};

/// Failure reading or writing one of the JSON backing files.
///
/// - `Io` — the file could not be read, written or renamed into place
/// - `Parse` — the file exists but is not the expected JSON shape
///
/// Neither is repaired automatically; the caller decides what to tell the user.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Login failures. The display strings are the messages shown to the user.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please enter username and password")]
    EmptyField,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Credentials matched, but an admin login was requested for a regular account.
    #[error("Not an admin account")]
    NotAdmin,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Registration failures.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Enter username & password")]
    EmptyField,

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Book not found")]
    BookNotFound { genre: String, title: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("Cannot apply {event:?} while on the {} screen", .from.name())]
    InvalidTransition { from: Screen, event: NavEvent },
}
