//! Command execution result type.

/// Result of executing a command.
///
/// A command either replies with text or stays silent; `should_reply` tells
/// the host whether to deliver `output` at all. An empty reply is still a
/// reply (e.g. `cat` of an empty file).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Text to deliver
    pub output: String,
    /// Whether the host should send `output`
    pub should_reply: bool,
}

impl CommandResult {
    /// Create a result that replies with `text`.
    pub fn output(text: impl Into<String>) -> Self {
        Self {
            output: text.into(),
            should_reply: true,
        }
    }

    /// Create a silent result (no reply at all).
    pub fn empty() -> Self {
        Self {
            output: String::new(),
            should_reply: false,
        }
    }

    /// Split into `(response_text, should_reply)`.
    pub fn into_parts(self) -> (String, bool) {
        (self.output, self.should_reply)
    }
}
