//! The shell entry point a host talks to.

use parking_lot::Mutex;
use tracing::debug;

use crate::config::ShellConfig;
use crate::core::VirtualFs;
use crate::core::commands::{self, CommandResult, Invocation};
use crate::core::session::SessionManager;
use crate::models::{Session, SessionState};

/// Namespace plus session table: the state every command runs against.
#[derive(Clone, Debug)]
pub struct ShellState {
    pub fs: VirtualFs,
    pub sessions: SessionManager,
}

impl ShellState {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            fs: VirtualFs::new(),
            sessions: SessionManager::new(config.home_root.clone()),
        }
    }

    /// Run one tokenized line for `user`.
    ///
    /// The login trigger is always honoured. Anything else needs an active
    /// session; without one, or for a name not in the table, the line is
    /// ignored without a reply.
    pub fn dispatch(&mut self, config: &ShellConfig, user: &str, tokens: &[&str]) -> CommandResult {
        let Some((&name, args)) = tokens.split_first() else {
            return CommandResult::empty();
        };

        if name == config.login_trigger {
            return match self.sessions.login(&mut self.fs, user) {
                Ok(session) => CommandResult::output(format!("{} is now logged in.", session.username)),
                Err(err) => CommandResult::output(err.to_string()),
            };
        }

        let Some(cwd) = self.sessions.get(user).map(|session| session.cwd) else {
            return CommandResult::empty();
        };

        let Some(spec) = commands::lookup(name) else {
            debug!(user, command = name, "unknown command ignored");
            return CommandResult::empty();
        };

        if !spec.arity.accepts(args.len()) {
            return CommandResult::output(crate::config::usage_message(spec.name));
        }

        debug!(user, command = spec.name, args = args.len(), "dispatching");
        let mut invocation = Invocation {
            state: self,
            config,
            user,
            cwd,
        };
        (spec.handler)(&mut invocation, args)
    }
}

/// A shared shell: one namespace and one session table for every user.
///
/// Each call to [`handle`](Self::handle) holds a single lock for the whole
/// command, so the shell can sit behind an `Arc` and take messages from many
/// host threads.
pub struct Shell {
    config: ShellConfig,
    state: Mutex<ShellState>,
}

impl Shell {
    pub fn new(mut config: ShellConfig) -> Self {
        config.login_trigger = config.login_trigger.to_lowercase();
        let state = ShellState::new(&config);
        Self {
            config,
            state: Mutex::new(state),
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Handle one inbound line from `user`.
    ///
    /// The line is lowercased and split on whitespace before dispatch.
    pub fn handle(&self, user: &str, line: &str) -> CommandResult {
        let line = line.to_lowercase();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        self.state.lock().dispatch(&self.config, user, &tokens)
    }

    /// Reply to a host-level help request.
    pub fn help(&self) -> &str {
        &self.config.help_text
    }

    pub fn session_state(&self, user: &str) -> SessionState {
        self.state.lock().sessions.state(user)
    }

    /// Snapshot of `user`'s session, if logged in.
    pub fn session(&self, user: &str) -> Option<Session> {
        self.state.lock().sessions.get(user).cloned()
    }

    pub fn active_sessions(&self) -> usize {
        self.state.lock().sessions.active_count()
    }

    /// Run `f` against the locked state.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut ShellState) -> R) -> R {
        f(&mut self.state.lock())
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}
