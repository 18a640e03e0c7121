use std::path::{Path, PathBuf};

/// Default file name of the credential store.
pub const USERS_FILE: &str = "users.json";
/// Default file name of the catalog store.
pub const BOOKS_FILE: &str = "books.json";
/// Default file name of the application log.
pub const LOG_FILE: &str = "bookshelf.log";

/// Locations of the files the application reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub users_path: PathBuf,
    pub books_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for Config {
    /// Everything lives in the current working directory.
    fn default() -> Self {
        Self {
            users_path: PathBuf::from(USERS_FILE),
            books_path: PathBuf::from(BOOKS_FILE),
            log_path: PathBuf::from(LOG_FILE),
        }
    }
}

impl Config {
    /// Root all files in `dir`, keeping the default file names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            users_path: dir.join(USERS_FILE),
            books_path: dir.join(BOOKS_FILE),
            log_path: dir.join(LOG_FILE),
        }
    }
}
