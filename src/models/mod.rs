//! Data models for the shell.
//!
//! Contains domain types for:
//! - [`DirId`], [`DirNode`], [`FileNode`], [`FsEntry`] - Namespace tree records
//! - [`Session`], [`SessionState`] - Per-user working context

mod filesystem;
mod session;

pub use filesystem::{DirId, DirNode, FileNode, FsEntry};
pub use session::{Session, SessionState};
