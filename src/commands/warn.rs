//! `warn`: record a warning against a user.

use crate::error::{CommandError, HandlerResult};
use crate::handlers::{Command, Context, ParsedCommand};
use crate::platform::InboundMessage;
use async_trait::async_trait;
use tracing::info;

/// Records a numbered warning, counted for the issuing staff member.
pub struct WarnCommand;

#[async_trait]
impl Command for WarnCommand {
    fn name(&self) -> &'static str {
        "warn"
    }

    fn requires_user(&self) -> bool {
        true
    }

    fn usage(&self) -> &'static str {
        "warn <user> <reason>"
    }

    async fn handle(
        &self,
        command: &ParsedCommand,
        message: &InboundMessage,
        ctx: &Context,
    ) -> HandlerResult {
        let user = command.user.as_ref().ok_or(CommandError::MissingUser)?;

        let reason = command.rest();
        let reason = reason.trim();
        if reason.is_empty() {
            ctx.reply(message, &format!("Usage: `{}{}`", ctx.prefix(), self.usage()))
                .await;
            return Ok(());
        }

        let staff = &message.author.name;
        let warning = ctx
            .db
            .infractions()
            .record_warning(user, reason, staff)
            .await?;

        info!(user = %user.name, number = warning.number, "user warned");
        ctx.reply(
            message,
            &format!("Warned {} (warning #{}).", user.name, warning.number),
        )
        .await;
        Ok(())
    }
}
