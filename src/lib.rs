//! A small multi-user Unix-like shell over an in-memory filesystem.
//!
//! A host feeds [`Shell::handle`] a user name and a raw command line and gets
//! back a [`CommandResult`]: the reply text and whether to send it. The shell
//! does no I/O of its own.
//!
//! ```
//! use trtlshell::Shell;
//!
//! let shell = Shell::default();
//! assert_eq!(shell.handle("alice", "trtlshell").output, "alice is now logged in.");
//! assert_eq!(shell.handle("alice", "pwd").output, "/home/alice");
//! ```

pub mod config;
pub mod core;
pub mod models;

pub use crate::config::ShellConfig;
pub use crate::core::{CommandResult, Shell};
