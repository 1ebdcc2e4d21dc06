//! Command text parsing.

use crate::platform::User;

/// Longest `short_string` before it gets truncated.
const SHORT_STRING_MAX: usize = 30;

/// A command parsed out of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Command name: the text right after the prefix, up to the first
    /// whitespace.
    pub name: String,
    /// Arguments after the name, split on single spaces and trimmed. A run
    /// of spaces leaves empty tokens behind.
    pub args: Vec<String>,
    /// User the first argument resolved to. Only set for commands that
    /// require a user; the reference is then no longer in `args`.
    pub user: Option<User>,
}

impl ParsedCommand {
    /// Compact form for log fields: name and args, cut to 30 characters.
    pub fn short_string(&self) -> String {
        if self.args.is_empty() {
            return self.name.clone();
        }

        let full = format!("{} {}", self.name, self.args.join(" "));
        if full.chars().count() <= SHORT_STRING_MAX {
            return full;
        }

        let mut short: String = full.chars().take(SHORT_STRING_MAX - 3).collect();
        short.push_str("...");
        short
    }

    /// The arguments joined back into free text.
    pub fn rest(&self) -> String {
        self.args.join(" ")
    }
}

/// Parse a message that starts with `prefix` into a command.
///
/// Callers run this only after the gate has checked the prefix. If the
/// prefix is missing anyway, the whole trimmed text is parsed.
pub fn parse(content: &str, prefix: &str) -> ParsedCommand {
    let trimmed = content.trim();
    let body = trimmed.strip_prefix(prefix).unwrap_or(trimmed);

    let Some((name, rest)) = body.split_once(char::is_whitespace) else {
        return ParsedCommand {
            name: body.to_string(),
            ..ParsedCommand::default()
        };
    };

    let args = rest.split(' ').map(|arg| arg.trim().to_string()).collect();

    ParsedCommand {
        name: name.to_string(),
        args,
        user: None,
    }
}
