//! Authorization gate.
//!
//! Decides whether a message is a command from someone allowed to send
//! one. Rejections are only logged: a sender who isn't staff must not learn
//! why they were ignored. Any failed lookup rejects the message.

use crate::handlers::core::Context;
use crate::platform::{InboundMessage, PlatformError};
use tracing::{debug, error, trace};

/// Whether `message` should be handled as a command.
///
/// Checks run in a fixed order and stop at the first failure:
/// 1. author is neither this bot nor another bot
/// 2. channel sits in a listening category
/// 3. author holds an admin role in the guild
/// 4. text starts with the command prefix
pub async fn should_process(message: &InboundMessage, ctx: &Context) -> bool {
    let author = &message.author;

    if ctx.platform.self_id() == Some(author.id) || author.bot {
        trace!(user = %author.name, "ignoring message from bot");
        return false;
    }

    match ctx.platform.channel_category(message.channel_id).await {
        Err(e) => {
            error!(error = %e, "ignoring message - failed to retrieve channel info");
            return false;
        }
        Ok(category) if !category.is_some_and(|c| ctx.config.is_listening(c)) => {
            trace!(
                category = ?category.map(|c| c.get()),
                channel = %message.channel_id,
                "ignoring message in non-enabled category"
            );
            return false;
        }
        Ok(_) => {}
    }

    let Some(guild) = message.guild_id else {
        error!(error = %PlatformError::NoGuild, "ignoring message - failed to retrieve member info");
        return false;
    };

    match ctx.platform.member_roles(guild, author.id).await {
        Err(e) => {
            error!(error = %e, "ignoring message - failed to retrieve member info");
            return false;
        }
        Ok(roles) if !ctx.config.has_admin_role(&roles) => {
            debug!(user = %author.name, "ignoring message from non-admin user");
            return false;
        }
        Ok(_) => {}
    }

    if !message.content.trim().starts_with(ctx.prefix()) {
        debug!("ignoring message without bot prefix");
        return false;
    }

    true
}
