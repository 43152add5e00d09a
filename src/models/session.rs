//! Per-user session record.

use std::collections::BTreeMap;

use super::DirId;

/// A logged-in user's working context.
///
/// The session only points at its current directory; the directory itself is
/// owned by the tree and outlives the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub cwd: DirId,
    /// Environment variables. Carried with the session, no command reads them yet.
    pub env: BTreeMap<String, String>,
}

impl Session {
    pub fn new(username: impl Into<String>, home: DirId) -> Self {
        Self {
            username: username.into(),
            cwd: home,
            env: BTreeMap::new(),
        }
    }
}

/// Login state of a user as seen by the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}
