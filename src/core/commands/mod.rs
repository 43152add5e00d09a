//! Command lookup and execution.
//!
//! This module provides:
//! - [`COMMANDS`], a table from command name to argument rule and handler
//! - [`Invocation`], the per-call context every handler receives
//! - [`CommandResult`] for command execution results
//!
//! # Architecture
//!
//! The dispatcher in [`Shell`](crate::core::Shell) tokenizes a line, looks the
//! first token up with [`lookup`], checks the argument count against the
//! entry's [`Arity`], and calls the handler. Handlers never touch a transport;
//! they return a [`CommandResult`].

mod execute;
mod result;

pub use result::CommandResult;

use crate::config::ShellConfig;
use crate::core::resolver::PathResolver;
use crate::core::shell::ShellState;
use crate::models::DirId;

// =============================================================================
// Invocation Context
// =============================================================================

/// Everything a handler may read or change while running one command.
pub struct Invocation<'a> {
    pub state: &'a mut ShellState,
    pub config: &'a ShellConfig,
    /// The authenticated caller
    pub user: &'a str,
    /// Caller's current directory when the command started
    pub cwd: DirId,
}

impl Invocation<'_> {
    /// Resolver bound to the caller and their current directory.
    pub fn resolver(&mut self) -> PathResolver<'_> {
        PathResolver::new(
            &mut self.state.fs,
            &self.state.sessions,
            self.user,
            self.cwd,
        )
    }
}

// =============================================================================
// Command Table
// =============================================================================

/// Accepted number of arguments (tokens after the command name).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Any,
    Exactly(usize),
    AtMost(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Any => true,
            Self::Exactly(n) => count == n,
            Self::AtMost(n) => count <= n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

/// Handler signature: invocation context plus the arguments.
pub type Handler = fn(&mut Invocation<'_>, &[&str]) -> CommandResult;

/// A row of the command table.
#[derive(Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub arity: Arity,
    pub handler: Handler,
}

/// Commands available to an authenticated session.
pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: crate::config::LOGOUT_COMMAND,
        arity: Arity::Any,
        handler: execute::execute_exit,
    },
    CommandSpec {
        name: "pwd",
        arity: Arity::Any,
        handler: execute::execute_pwd,
    },
    CommandSpec {
        name: "cd",
        arity: Arity::Exactly(1),
        handler: execute::execute_cd,
    },
    CommandSpec {
        name: "ls",
        arity: Arity::AtMost(1),
        handler: execute::execute_ls,
    },
    CommandSpec {
        name: "mkdir",
        arity: Arity::Exactly(1),
        handler: execute::execute_mkdir,
    },
    CommandSpec {
        name: "touch",
        arity: Arity::Exactly(1),
        handler: execute::execute_touch,
    },
    CommandSpec {
        name: "cat",
        arity: Arity::AtLeast(1),
        handler: execute::execute_cat,
    },
    CommandSpec {
        name: "echo",
        arity: Arity::Any,
        handler: execute::execute_echo,
    },
    CommandSpec {
        name: "date",
        arity: Arity::Any,
        handler: execute::execute_date,
    },
];

/// Find the table entry for `name`.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// All command names, in table order.
pub fn names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|spec| spec.name)
}
