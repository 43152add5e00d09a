//! Error types for the shell core.
//!
//! Every variant's `Display` is the exact text shown to the user, so the
//! dispatcher can turn any failure into a reply with `to_string()`:
//!
//! - [`FsError`] - Namespace lookups and name collisions
//! - [`SessionError`] - Login/logout state conflicts
//! - [`RedirectError`] - Malformed `>` / `>>` operators
//! - [`ConfigError`] - Loading [`ShellConfig`](crate::config::ShellConfig)

use thiserror::Error;

/// Namespace errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// A path segment names nothing (or names a file where a directory is required)
    #[error("'{0}' does not exist.")]
    NotFound(String),
    /// A file occupies the name where a directory was requested
    #[error("'{0}' is a file.")]
    NotADirectory(String),
    /// A directory occupies the name where a file was requested
    #[error("'{0}' is a directory.")]
    IsADirectory(String),
    /// A file of that name is already present
    #[error("'{0}' already exists.")]
    AlreadyExists(String),
    /// Empty, `.`, `..` or containing `/` (e.g. the final component of `touch /`)
    #[error("'{0}' is not a valid name.")]
    InvalidName(String),
}

/// Session state conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{0} is already logged in. type 'exit' to quit.")]
    AlreadyLoggedIn(String),
    #[error("{0} is not logged in.")]
    NotLoggedIn(String),
    /// The home directory could not be provisioned because a file holds its name
    #[error("cannot create a home for {user}: {source}")]
    HomeUnavailable {
        user: String,
        #[source]
        source: FsError,
    },
}

/// Redirection syntax errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedirectError {
    #[error("redirection has no target")]
    MissingTarget,
    #[error("redirection has more than one target")]
    MultipleTargets,
}

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid date_format '{0}'")]
    DateFormat(String),
}
