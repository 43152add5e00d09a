//! Path resolution against the namespace and a caller's session.
//!
//! Supports:
//! - Absolute paths: `/home/alice/docs`
//! - Relative paths: `docs`, `../bob`, `./notes`
//! - Home expansion: `~`, `~/docs`, `~bob/docs`
//!
//! `..` is clamped at the root, so `/../..` resolves to `/`.

use tracing::debug;

use crate::core::VirtualFs;
use crate::core::error::FsError;
use crate::core::session::{SessionManager, ensure_home};
use crate::models::DirId;

/// Resolves paths on behalf of one caller.
///
/// Holds the tree mutably because `~` may provision the caller's own home.
pub struct PathResolver<'a> {
    fs: &'a mut VirtualFs,
    sessions: &'a SessionManager,
    caller: &'a str,
    cwd: DirId,
}

impl<'a> PathResolver<'a> {
    pub fn new(
        fs: &'a mut VirtualFs,
        sessions: &'a SessionManager,
        caller: &'a str,
        cwd: DirId,
    ) -> Self {
        Self {
            fs,
            sessions,
            caller,
            cwd,
        }
    }

    pub fn fs(&self) -> &VirtualFs {
        &*self.fs
    }

    pub fn fs_mut(&mut self) -> &mut VirtualFs {
        &mut *self.fs
    }

    pub fn cwd(&self) -> DirId {
        self.cwd
    }

    /// Pick the directory resolution starts from and return the rest of `path`.
    ///
    /// - `/...` starts at the root
    /// - `~` or `~/...` starts at the caller's home
    /// - `~user/...` starts at `user`'s home, which must belong to a known user
    /// - anything else starts at the current directory
    pub fn anchor<'p>(&mut self, path: &'p str) -> Result<(DirId, &'p str), FsError> {
        if let Some(rest) = path.strip_prefix('/') {
            return Ok((self.fs.root(), rest));
        }

        let Some(tilde) = path.strip_prefix('~') else {
            return Ok((self.cwd, path));
        };

        let (user, rest) = tilde.split_once('/').unwrap_or((tilde, ""));
        let home = if user.is_empty() || user == self.caller {
            let user = if user.is_empty() { self.caller } else { user };
            ensure_home(self.fs, self.sessions.home_root(), user)?
        } else if self.sessions.is_known(user) {
            self.fs
                .child_dir(self.fs.root(), self.sessions.home_root())
                .and_then(|homes| self.fs.child_dir(homes, user))
                .ok_or_else(|| FsError::NotFound(format!("~{}", user)))?
        } else {
            debug!(caller = self.caller, user, "unknown user in home expansion");
            return Err(FsError::NotFound(format!("~{}", user)));
        };

        Ok((home, rest))
    }

    /// Walk `segments` from `start`. Every named segment must be a directory.
    fn walk(&self, start: DirId, segments: &str) -> Result<DirId, FsError> {
        let mut current = start;
        for segment in segments.split('/') {
            match segment {
                "" | "." => {}
                ".." => current = self.fs.parent_or_self(current),
                name => {
                    current = self
                        .fs
                        .child_dir(current, name)
                        .ok_or_else(|| FsError::NotFound(name.to_string()))?;
                }
            }
        }
        Ok(current)
    }

    /// Resolve a directory path.
    pub fn resolve_dir(&mut self, path: &str) -> Result<DirId, FsError> {
        let (start, rest) = self.anchor(path)?;
        self.walk(start, rest)
    }

    /// Resolve a file path into its parent directory and file name.
    ///
    /// The parent must already exist; the file itself need not.
    pub fn resolve_file<'p>(&mut self, path: &'p str) -> Result<(DirId, &'p str), FsError> {
        let path = path.trim();
        match path.rsplit_once('/') {
            Some(("", name)) => Ok((self.fs.root(), name)),
            Some((parent, name)) => Ok((self.resolve_dir(parent)?, name)),
            None if path.starts_with('~') => Err(FsError::InvalidName(path.to_string())),
            None => Ok((self.cwd, path)),
        }
    }

    /// Create every missing directory along `path` (as `mkdir` does).
    ///
    /// Stops silently at the first segment blocked by a file; directories
    /// created before that point are kept. Returns the deepest directory
    /// reached.
    pub fn create_dirs(&mut self, path: &str) -> Result<DirId, FsError> {
        let (mut current, rest) = self.anchor(path)?;
        for segment in rest.split('/') {
            match segment {
                "" | "." => {}
                ".." => current = self.fs.parent_or_self(current),
                name => match self.fs.create_child_if_absent(current, name) {
                    Ok(child) => current = child,
                    Err(err) => {
                        debug!(path, %err, "mkdir stopped");
                        break;
                    }
                },
            }
        }
        Ok(current)
    }
}
