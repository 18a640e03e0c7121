use crate::models::UserRecord;

/// Who is logged in. Owned by the [`App`](crate::App) controller and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current_user: Option<String>,
    is_admin: bool,
}

impl Session {
    /// Record a successful login, replacing any previous user.
    pub fn begin(&mut self, user: &UserRecord) {
        self.current_user = Some(user.username.clone());
        self.is_admin = user.is_admin;
    }

    pub fn clear(&mut self) {
        self.current_user = None;
        self.is_admin = false;
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}
