//! Output redirection (`>` and `>>`) for text-producing commands.

use crate::core::error::{FsError, RedirectError};
use crate::core::resolver::PathResolver;

/// How redirected output lands in the target file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectMode {
    /// `>`: replace the contents
    Truncate,
    /// `>>`: add on a new line
    Append,
}

/// A command argument string split at its redirection operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redirection<'a> {
    /// Everything before the operator, untrimmed
    pub source: &'a str,
    pub mode: RedirectMode,
    /// Target path, trimmed
    pub target: &'a str,
}

impl<'a> Redirection<'a> {
    /// Split `args` at the first `>`; a second `>` right after it means append.
    ///
    /// Returns `Ok(None)` when there is no operator at all.
    pub fn parse(args: &'a str) -> Result<Option<Self>, RedirectError> {
        let Some(index) = args.find('>') else {
            return Ok(None);
        };

        let source = &args[..index];
        let after = &args[index + 1..];
        let (mode, target) = match after.strip_prefix('>') {
            Some(rest) => (RedirectMode::Append, rest),
            None => (RedirectMode::Truncate, after),
        };

        let target = target.trim();
        if target.is_empty() {
            return Err(RedirectError::MissingTarget);
        }
        if target.contains('>') {
            return Err(RedirectError::MultipleTargets);
        }

        Ok(Some(Self {
            source,
            mode,
            target,
        }))
    }

    /// Write `value` to the target file, resolved for the caller.
    pub fn apply(&self, resolver: &mut PathResolver<'_>, value: &str) -> Result<(), FsError> {
        let (dir, name) = resolver.resolve_file(self.target)?;
        match self.mode {
            RedirectMode::Truncate => resolver.fs_mut().write_file(dir, name, value),
            RedirectMode::Append => resolver.fs_mut().append_file(dir, name, value),
        }
    }
}
