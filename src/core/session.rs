//! Session table: who is logged in and where they are.

use std::collections::{BTreeSet, HashMap};

use tracing::info;

use crate::core::VirtualFs;
use crate::core::error::{FsError, SessionError};
use crate::models::{DirId, Session, SessionState};

/// Return `/<home_root>/<user>`, creating any missing piece of it.
pub fn ensure_home(fs: &mut VirtualFs, home_root: &str, user: &str) -> Result<DirId, FsError> {
    let homes = fs.create_child_if_absent(fs.root(), home_root)?;
    fs.create_child_if_absent(homes, user)
}

/// Tracks active sessions and every user that has ever logged in.
///
/// Home directories belong to the tree, not to the session: logging out drops
/// the session record and leaves `/home/<user>` in place.
#[derive(Clone, Debug)]
pub struct SessionManager {
    sessions: HashMap<String, Session>,
    known_users: BTreeSet<String>,
    home_root: String,
}

impl SessionManager {
    pub fn new(home_root: impl Into<String>) -> Self {
        Self {
            sessions: HashMap::new(),
            known_users: BTreeSet::new(),
            home_root: home_root.into(),
        }
    }

    /// Name of the directory under `/` that holds home directories.
    pub fn home_root(&self) -> &str {
        &self.home_root
    }

    pub fn state(&self, user: &str) -> SessionState {
        if self.sessions.contains_key(user) {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn get(&self, user: &str) -> Option<&Session> {
        self.sessions.get(user)
    }

    pub fn get_mut(&mut self, user: &str) -> Option<&mut Session> {
        self.sessions.get_mut(user)
    }

    /// Whether `user` has logged in at some point (for `~user` lookups).
    pub fn is_known(&self, user: &str) -> bool {
        self.known_users.contains(user)
    }

    pub fn known_users(&self) -> &BTreeSet<String> {
        &self.known_users
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Open a session whose current directory is the user's home.
    pub fn login(&mut self, fs: &mut VirtualFs, user: &str) -> Result<&Session, SessionError> {
        if self.sessions.contains_key(user) {
            return Err(SessionError::AlreadyLoggedIn(user.to_string()));
        }

        let home = ensure_home(fs, &self.home_root, user).map_err(|source| {
            SessionError::HomeUnavailable {
                user: user.to_string(),
                source,
            }
        })?;
        self.known_users.insert(user.to_string());
        info!(user, home = %fs.absolute_path(home), "session opened");

        Ok(self
            .sessions
            .entry(user.to_string())
            .or_insert_with(|| Session::new(user, home)))
    }

    /// Close a session, returning its final state.
    pub fn logout(&mut self, user: &str) -> Result<Session, SessionError> {
        let session = self
            .sessions
            .remove(user)
            .ok_or_else(|| SessionError::NotLoggedIn(user.to_string()))?;
        info!(user, "session closed");
        Ok(session)
    }
}
