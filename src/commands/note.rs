//! `note`: attach a staff note to a user.

use crate::error::{CommandError, HandlerResult};
use crate::handlers::{Command, Context, ParsedCommand};
use crate::platform::InboundMessage;
use async_trait::async_trait;

/// Records a note. Notes show up in `search` but are not warnings.
pub struct NoteCommand;

#[async_trait]
impl Command for NoteCommand {
    fn name(&self) -> &'static str {
        "note"
    }

    fn requires_user(&self) -> bool {
        true
    }

    fn usage(&self) -> &'static str {
        "note <user> <text>"
    }

    async fn handle(
        &self,
        command: &ParsedCommand,
        message: &InboundMessage,
        ctx: &Context,
    ) -> HandlerResult {
        let user = command.user.as_ref().ok_or(CommandError::MissingUser)?;

        let text = command.rest();
        let text = text.trim();
        if text.is_empty() {
            ctx.reply(message, &format!("Usage: `{}{}`", ctx.prefix(), self.usage()))
                .await;
            return Ok(());
        }

        ctx.db
            .infractions()
            .record_note(user, text, &message.author.name)
            .await?;

        ctx.reply(message, &format!("Noted for {}.", user.name)).await;
        Ok(())
    }
}
