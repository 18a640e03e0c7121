//! JSON-file persistence for users and books.
//!
//! Both stores rewrite their whole file on save. Writes go to a sibling
//! temporary file first and are renamed into place, so a reader never sees a
//! half-written document. First-run files are hard-linked into place instead,
//! which never replaces a file that already exists. A failed write removes its
//! temp file.

pub mod catalog;
pub mod credentials;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

pub use catalog::{sample_catalog, CatalogStore};
pub use credentials::{default_users, hash_password, CredentialStore};

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn parse_error(path: &Path, source: serde_json::Error) -> StorageError {
    StorageError::Parse {
        path: path.to_path_buf(),
        source,
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let text = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    serde_json::from_str(&text).map_err(|e| parse_error(path, e))
}

/// Serialize `value` as 2-space indented JSON and replace `path` with it.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let tmp = write_temp(path, value)?;
    fs::rename(&tmp, path).map_err(|e| {
        discard(&tmp);
        io_error(path, e)
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Serialize `value` into the sibling temp file of `path` and return its path.
fn write_temp<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf, StorageError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| parse_error(path, e))?;
    let tmp = temp_path(path);
    fs::write(&tmp, text).map_err(|e| {
        discard(&tmp);
        io_error(&tmp, e)
    })?;
    Ok(tmp)
}

/// Best-effort removal of a leftover temp file.
fn discard(tmp: &Path) {
    if let Err(e) = fs::remove_file(tmp) {
        if e.kind() != ErrorKind::NotFound {
            warn!("Could not remove {}: {}", tmp.display(), e);
        }
    }
}

/// Write `value` only if nothing exists at `path` yet. Returns whether it wrote.
fn write_if_absent<T: Serialize>(path: &Path, value: impl FnOnce() -> T) -> Result<bool, StorageError> {
    let exists = path.try_exists().map_err(|e| io_error(path, e))?;
    if exists {
        return Ok(false);
    }
    create_new(path, &value())
}

/// Link a fully written temp file into place. The link fails if `path`
/// appeared in the meantime, and the existing file is left alone.
fn create_new<T: Serialize>(path: &Path, value: &T) -> Result<bool, StorageError> {
    let tmp = write_temp(path, value)?;
    let linked = fs::hard_link(&tmp, path);
    discard(&tmp);
    match linked {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(io_error(path, e)),
    }
}
