//! `help`: list the available commands.

use crate::error::HandlerResult;
use crate::handlers::{Command, Context, ParsedCommand};
use crate::platform::InboundMessage;
use async_trait::async_trait;

const USAGE: &str = "help";

/// Lists every registered command with its usage.
pub struct HelpCommand {
    /// (name, usage) pairs, sorted by name.
    entries: Vec<(&'static str, &'static str)>,
}

impl HelpCommand {
    /// Create the help command for the given (name, usage) pairs. Help
    /// adds itself to the list.
    pub fn new(mut entries: Vec<(&'static str, &'static str)>) -> Self {
        entries.push(("help", USAGE));
        entries.sort_unstable_by_key(|(name, _)| *name);
        entries.dedup_by_key(|(name, _)| *name);
        Self { entries }
    }

    /// Help text for the given prefix.
    pub fn render(&self, prefix: &str) -> String {
        let mut lines = vec!["Available commands:".to_string()];
        for (name, usage) in &self.entries {
            let usage = if usage.is_empty() { name } else { usage };
            lines.push(format!("`{prefix}{usage}`"));
        }
        lines.join("\n")
    }
}

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn usage(&self) -> &'static str {
        USAGE
    }

    async fn handle(
        &self,
        _command: &ParsedCommand,
        message: &InboundMessage,
        ctx: &Context,
    ) -> HandlerResult {
        ctx.reply(message, &self.render(ctx.prefix())).await;
        Ok(())
    }
}
