//! Command execution logic.
//!
//! One `execute_*` function per table entry. Each runs to completion against
//! the tree and returns a [`CommandResult`]; failures become reply text.

use std::fmt::Write;

use tracing::debug;

use crate::config::{DEFAULT_DATE_FORMAT, missing_file_message, usage_message};
use crate::core::error::FsError;
use crate::core::redirect::Redirection;
use crate::core::resolver::PathResolver;

use super::{CommandResult, Invocation};

/// Reply for a failed filesystem operation on `path`.
fn fs_failure(command: &str, path: &str, err: FsError) -> CommandResult {
    debug!(command, path, %err, "filesystem operation failed");
    match err {
        FsError::NotFound(_) => CommandResult::output(format!("'{}' does not exist.", path)),
        FsError::InvalidName(_) => CommandResult::output(usage_message(command)),
        other => CommandResult::output(other.to_string()),
    }
}

/// Strip outer spaces, then surrounding double quotes.
fn unquote(text: &str) -> &str {
    text.trim().trim_matches('"')
}

fn read_file(resolver: &mut PathResolver<'_>, path: &str) -> Result<String, FsError> {
    let (dir, name) = resolver.resolve_file(path)?;
    resolver.fs().read_file(dir, name).map(str::to_string)
}

/// Execute `exit` command.
pub(super) fn execute_exit(inv: &mut Invocation<'_>, _args: &[&str]) -> CommandResult {
    match inv.state.sessions.logout(inv.user) {
        Ok(session) => CommandResult::output(format!("{} is now logged out.", session.username)),
        Err(err) => CommandResult::output(err.to_string()),
    }
}

/// Execute `pwd` command.
pub(super) fn execute_pwd(inv: &mut Invocation<'_>, _args: &[&str]) -> CommandResult {
    CommandResult::output(inv.state.fs.absolute_path(inv.cwd))
}

/// Execute `cd` command.
pub(super) fn execute_cd(inv: &mut Invocation<'_>, args: &[&str]) -> CommandResult {
    let path = args[0];
    let target = match inv.resolver().resolve_dir(path) {
        Ok(dir) => dir,
        Err(err) => return fs_failure("cd", path, err),
    };

    match inv.state.sessions.get_mut(inv.user) {
        Some(session) => {
            session.cwd = target;
            CommandResult::empty()
        }
        None => CommandResult::output(usage_message("cd")),
    }
}

/// Execute `ls` command.
pub(super) fn execute_ls(inv: &mut Invocation<'_>, args: &[&str]) -> CommandResult {
    let dir = match args.first() {
        Some(path) => match inv.resolver().resolve_dir(path) {
            Ok(dir) => dir,
            Err(err) => return fs_failure("ls", path, err),
        },
        None => inv.cwd,
    };
    CommandResult::output(inv.state.fs.listing(dir).join("\n"))
}

/// Execute `mkdir` command.
///
/// A file blocking the path ends creation quietly; whatever was created
/// before it stays.
pub(super) fn execute_mkdir(inv: &mut Invocation<'_>, args: &[&str]) -> CommandResult {
    let path = args[0];
    match inv.resolver().create_dirs(path) {
        Ok(_) => CommandResult::empty(),
        Err(err) => fs_failure("mkdir", path, err),
    }
}

/// Execute `touch` command.
///
/// Parent directories must already exist.
pub(super) fn execute_touch(inv: &mut Invocation<'_>, args: &[&str]) -> CommandResult {
    let path = args[0];
    let mut resolver = inv.resolver();
    let result = resolver
        .resolve_file(path)
        .and_then(|(dir, name)| resolver.fs_mut().touch(dir, name));

    match result {
        Ok(()) => CommandResult::empty(),
        Err(err) => fs_failure("touch", path, err),
    }
}

/// Execute `cat` command.
///
/// Without redirection every argument is read in turn; a missing file gets
/// an inline placeholder. With redirection exactly one source is copied to
/// the target.
pub(super) fn execute_cat(inv: &mut Invocation<'_>, args: &[&str]) -> CommandResult {
    let joined = args.join(" ");
    let redirection = match Redirection::parse(&joined) {
        Ok(redirection) => redirection,
        Err(_) => return CommandResult::output(usage_message("cat")),
    };
    let mut resolver = inv.resolver();

    let Some(redirection) = redirection else {
        let contents: Vec<String> = args
            .iter()
            .map(|path| read_file(&mut resolver, path).unwrap_or_else(|_| missing_file_message(path)))
            .collect();
        return CommandResult::output(contents.join("\n"));
    };

    let mut sources = redirection.source.split_whitespace();
    let (Some(source), None) = (sources.next(), sources.next()) else {
        return CommandResult::output(usage_message("cat"));
    };

    let value = match read_file(&mut resolver, source) {
        Ok(value) => value,
        Err(err) => {
            debug!(source, %err, "cat source unreadable");
            return CommandResult::output(missing_file_message(source));
        }
    };

    match redirection.apply(&mut resolver, &value) {
        Ok(()) => CommandResult::empty(),
        Err(err) => fs_failure("cat", redirection.target, err),
    }
}

/// Execute `echo` command.
pub(super) fn execute_echo(inv: &mut Invocation<'_>, args: &[&str]) -> CommandResult {
    let joined = args.join(" ");
    match Redirection::parse(&joined) {
        Ok(None) => CommandResult::output(unquote(&joined)),
        Ok(Some(redirection)) => {
            let value = unquote(redirection.source);
            match redirection.apply(&mut inv.resolver(), value) {
                Ok(()) => CommandResult::empty(),
                Err(err) => fs_failure("echo", redirection.target, err),
            }
        }
        Err(_) => CommandResult::output(usage_message("echo")),
    }
}

/// Execute `date` command.
pub(super) fn execute_date(inv: &mut Invocation<'_>, _args: &[&str]) -> CommandResult {
    let now = chrono::Local::now();
    let mut output = String::new();
    if write!(output, "{}", now.format(&inv.config.date_format)).is_err() {
        output.clear();
        let _ = write!(output, "{}", now.format(DEFAULT_DATE_FORMAT));
    }
    CommandResult::output(output)
}
