//! `block` / `unblock`: maintain the block list.

use crate::error::{CommandError, HandlerResult};
use crate::handlers::{Command, Context, ParsedCommand};
use crate::platform::InboundMessage;
use async_trait::async_trait;
use tracing::info;

/// Adds users to, or removes them from, the block list.
pub struct BlockCommand {
    name: &'static str,
    unblock: bool,
}

impl BlockCommand {
    pub fn block() -> Self {
        Self {
            name: "block",
            unblock: false,
        }
    }

    pub fn unblock() -> Self {
        Self {
            name: "unblock",
            unblock: true,
        }
    }
}

#[async_trait]
impl Command for BlockCommand {
    fn name(&self) -> &'static str {
        self.name
    }

    fn requires_user(&self) -> bool {
        true
    }

    fn usage(&self) -> &'static str {
        if self.unblock {
            "unblock <user>"
        } else {
            "block <user>"
        }
    }

    async fn handle(
        &self,
        command: &ParsedCommand,
        message: &InboundMessage,
        ctx: &Context,
    ) -> HandlerResult {
        let user = command.user.as_ref().ok_or(CommandError::MissingUser)?;

        let reply = if self.unblock {
            if ctx.db.blocks().remove(user.id).await? {
                info!(user = %user.name, "user unblocked");
                format!("Unblocked {}.", user.name)
            } else {
                format!("{} is not blocked.", user.name)
            }
        } else if ctx.db.blocks().add(user.id).await? {
            info!(user = %user.name, "user blocked");
            format!("Blocked {}.", user.name)
        } else {
            format!("{} is already blocked.", user.name)
        };

        ctx.reply(message, &reply).await;
        Ok(())
    }
}
