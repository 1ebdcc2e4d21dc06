//! `search`: show a user's moderation history.

use crate::db::Infraction;
use crate::error::{CommandError, HandlerResult};
use crate::handlers::{Command, Context, ParsedCommand};
use crate::platform::{InboundMessage, User};
use async_trait::async_trait;

/// Lists every warning and note on record for a user.
pub struct SearchCommand;

impl SearchCommand {
    /// Format a user's history for a reply.
    pub fn render(user: &User, infractions: &[Infraction], blocked: bool) -> String {
        let mut header = if infractions.is_empty() {
            format!("{} has no recorded infractions.", user.name)
        } else {
            format!("History for {} ({}):", user.name, user.id)
        };
        if blocked {
            header.push_str(" They are blocked.");
        }

        let mut lines = vec![header];
        for infraction in infractions {
            let date = chrono::DateTime::from_timestamp(infraction.date, 0)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let kind = if infraction.is_note() {
                "Note".to_string()
            } else {
                format!("Warning #{}", infraction.number)
            };
            lines.push(format!(
                "{kind} ({date}, {}): {}",
                infraction.staff, infraction.message
            ));
        }
        lines.join("\n")
    }
}

#[async_trait]
impl Command for SearchCommand {
    fn name(&self) -> &'static str {
        "search"
    }

    fn requires_user(&self) -> bool {
        true
    }

    fn usage(&self) -> &'static str {
        "search <user>"
    }

    async fn handle(
        &self,
        command: &ParsedCommand,
        message: &InboundMessage,
        ctx: &Context,
    ) -> HandlerResult {
        let user = command.user.as_ref().ok_or(CommandError::MissingUser)?;

        let infractions = ctx.db.infractions().for_user(user.id).await?;
        let blocked = ctx.db.blocks().is_blocked(user.id).await?;

        ctx.reply(message, &Self::render(user, &infractions, blocked))
            .await;
        Ok(())
    }
}
