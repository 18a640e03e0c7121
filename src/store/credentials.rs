use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use sha2::{Digest, Sha256};

use super::{read_json, write_if_absent, write_json};
use crate::error::{AuthError, RegisterError, StorageError};
use crate::models::{UserRecord, UsersFile};

/// Username and password of the account created on first run.
pub const DEFAULT_ADMIN: &str = "admin";

/// Hex-encoded SHA-256 of the UTF-8 password bytes.
///
/// Unsalted: two users with the same password share a digest.
pub fn hash_password(password: &str) -> String {
    Sha256::digest(password.as_bytes())
        .iter()
        .fold(String::with_capacity(64), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
}

/// Contents written to a fresh `users.json`: a single admin/admin account.
pub fn default_users() -> UsersFile {
    UsersFile {
        users: vec![UserRecord {
            username: DEFAULT_ADMIN.to_string(),
            password_hash: hash_password(DEFAULT_ADMIN),
            is_admin: true,
        }],
    }
}

/// Account storage backed by `users.json`.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with the default admin account if it does not exist.
    ///
    /// Returns `true` when the file was created. An existing file is never
    /// touched, even if it is empty or malformed.
    pub fn ensure_default(&self) -> Result<bool, StorageError> {
        let created = write_if_absent(&self.path, default_users)?;
        if created {
            info!("Created {:?} with default admin account", self.path);
        }
        Ok(created)
    }

    /// Read all accounts, creating the default file first if needed.
    pub fn load(&self) -> Result<UsersFile, StorageError> {
        self.ensure_default()?;
        read_json(&self.path)
    }

    /// Overwrite the file with `data`.
    pub fn save(&self, data: &UsersFile) -> Result<(), StorageError> {
        write_json(&self.path, data)?;
        debug!("Saved {} users to {:?}", data.users.len(), self.path);
        Ok(())
    }

    /// Check a username/password pair.
    ///
    /// Both inputs are trimmed. With `require_admin`, a correct login for a
    /// regular account fails with [`AuthError::NotAdmin`] rather than
    /// [`AuthError::InvalidCredentials`].
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
        require_admin: bool,
    ) -> Result<UserRecord, AuthError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::EmptyField);
        }

        let digest = hash_password(password);
        let data = self.load()?;
        let user = data
            .users
            .into_iter()
            .find(|u| u.username == username && u.password_hash == digest)
            .ok_or_else(|| {
                warn!("Failed login for {username:?}");
                AuthError::InvalidCredentials
            })?;

        if require_admin && !user.is_admin {
            warn!("Admin login refused for regular account {username:?}");
            return Err(AuthError::NotAdmin);
        }

        info!("User {username:?} logged in (admin: {})", user.is_admin);
        Ok(user)
    }

    /// Add a regular account and persist it.
    ///
    /// On any error the file is left exactly as it was.
    pub fn register(&self, username: &str, password: &str) -> Result<UserRecord, RegisterError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(RegisterError::EmptyField);
        }

        let mut data = self.load()?;
        if data.contains(username) {
            return Err(RegisterError::DuplicateUsername);
        }

        let user = UserRecord {
            username: username.to_string(),
            password_hash: hash_password(password),
            is_admin: false,
        };
        data.users.push(user.clone());
        self.save(&data)?;

        info!("Registered user {username:?}");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store_in(dir: &tempfile::TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join("users.json"))
    }

    #[test]
    fn hash_is_hex_sha256() {
        assert_eq!(
            hash_password("admin"),
            "8c6976e5b5410415bde908bd4dee15dfb167a9c873fc4bb8a81f6f2ab448a918"
        );
        assert_eq!(hash_password(""), "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
    }

    #[test]
    fn load_creates_default_admin() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let data = store.load().unwrap();
        assert_eq!(data, default_users());
        assert!(store.path().exists());
        assert!(!store.ensure_default().unwrap());
    }

    #[test]
    fn malformed_file_is_not_repaired() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ broken").unwrap();

        assert!(matches!(store.load(), Err(StorageError::Parse { .. })));
        assert!(matches!(
            store.authenticate("admin", "admin", false),
            Err(AuthError::Storage(StorageError::Parse { .. }))
        ));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ broken");
    }

    #[test]
    fn authenticate_distinguishes_failures() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.register("reader", "secret").unwrap();

        assert!(store.authenticate("admin", "admin", true).unwrap().is_admin);
        assert!(matches!(
            store.authenticate("admin", "wrong", false),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            store.authenticate("Admin", "admin", false),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            store.authenticate("reader", "secret", true),
            Err(AuthError::NotAdmin)
        ));
        assert_eq!(
            store.authenticate(" reader ", " secret ", false).unwrap().username,
            "reader"
        );
        assert!(matches!(
            store.authenticate("  ", "secret", false),
            Err(AuthError::EmptyField)
        ));
    }

    #[test]
    fn empty_fields_do_not_touch_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(matches!(store.authenticate("", "", false), Err(AuthError::EmptyField)));
        assert!(matches!(store.register("bob", " "), Err(RegisterError::EmptyField)));
        assert!(!store.path().exists());
    }

    #[test]
    fn duplicate_registration_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.register("bob", "pw").unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        assert!(matches!(store.register("bob", "other"), Err(RegisterError::DuplicateUsername)));
        assert!(matches!(store.register("admin", "x"), Err(RegisterError::DuplicateUsername)));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);

        // Case-sensitive: a differently cased name is a new account.
        let bob = store.register("Bob", "pw").unwrap();
        assert!(!bob.is_admin);
        assert_eq!(store.load().unwrap().users.len(), 3);
    }

    #[test]
    fn save_into_missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("nope").join("users.json"));

        let err = store.save(&default_users()).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert!(!store.path().exists());
    }

    #[test]
    fn register_into_unwritable_target_reports_storage_io() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::create_dir(store.path()).unwrap();

        let err = store.register("carol", "pw").unwrap_err();
        assert!(matches!(err, RegisterError::Storage(StorageError::Io { .. })));
        assert!(store.path().is_dir());
        assert!(!dir.path().join("users.json.tmp").exists());

        let err = store.save(&default_users()).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert!(!dir.path().join("users.json.tmp").exists());
    }

    #[test]
    fn save_of_load_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.register("bob", "pw").unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        store.save(&store.load().unwrap()).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }
}
