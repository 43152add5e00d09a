//! Core shell logic.
//!
//! This module provides:
//! - [`VirtualFs`] the in-memory namespace tree
//! - [`PathResolver`] absolute, relative and `~` path resolution
//! - [`SessionManager`] login/logout and home provisioning
//! - [`Redirection`] `>` / `>>` handling for `cat` and `echo`
//! - [`Shell`] the entry point that dispatches command lines

pub mod commands;
pub mod error;
mod filesystem;
pub mod redirect;
pub mod resolver;
pub mod session;
mod shell;

pub use commands::CommandResult;
pub use filesystem::VirtualFs;
pub use redirect::{RedirectMode, Redirection};
pub use resolver::PathResolver;
pub use session::SessionManager;
pub use shell::{Shell, ShellState};
