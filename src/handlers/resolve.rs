//! User reference resolution.
//!
//! A command's first argument may name a user as a mention (`<@123>`), a
//! raw id (`123`) or a username (`alice`). Ids are tried before names, so
//! a member literally named "123" never shadows user 123.

use super::ParsedCommand;
use crate::handlers::core::Context;
use crate::platform::{GuildId, InboundMessage, Platform, PlatformError, User, UserId};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<@!?([0-9]+)>$").expect("mention pattern is valid"));

/// Strip mention syntax, returning the id inside, or the token unchanged.
pub fn mention_id(token: &str) -> &str {
    MENTION
        .captures(token)
        .and_then(|c| c.get(1))
        .map_or(token, |m| m.as_str())
}

fn is_snowflake(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Fetch a user by a numeric id.
pub async fn user_by_id(reference: &str, platform: &dyn Platform) -> Result<User, PlatformError> {
    if !is_snowflake(reference) {
        return Err(PlatformError::NotFound("id isn't a snowflake".into()));
    }

    let id: UserId = reference
        .parse()
        .map_err(|_| PlatformError::NotFound("id is out of range".into()))?;

    platform.user(id).await
}

/// Find a guild member by exact username.
pub async fn user_by_name(
    name: &str,
    guild: Option<GuildId>,
    platform: &dyn Platform,
) -> Result<User, PlatformError> {
    let guild = guild.ok_or(PlatformError::NoGuild)?;

    platform
        .guild_members(guild)
        .await?
        .into_iter()
        .find(|user| user.name == name)
        .ok_or_else(|| PlatformError::NotFound("no user with that name is in the server".into()))
}

/// Resolve a user reference: mention or id first, then username.
pub async fn resolve_user(
    token: &str,
    guild: Option<GuildId>,
    platform: &dyn Platform,
) -> Option<User> {
    let reference = mention_id(token);

    let id_err = match user_by_id(reference, platform).await {
        Ok(user) => return Some(user),
        Err(e) => e,
    };

    let name_err = match user_by_name(reference, guild, platform).await {
        Ok(user) => return Some(user),
        Err(e) => e,
    };

    debug!(reference, error = %id_err, "cmd arg isn't a valid user id");
    debug!(reference, error = %name_err, "cmd arg isn't a valid user name");
    None
}

/// Resolve the command's first argument into `command.user`.
///
/// On success the reference is shifted out of `command.args`. Returns
/// whether a user was found.
pub async fn attach_user(
    command: &mut ParsedCommand,
    message: &InboundMessage,
    ctx: &Context,
) -> bool {
    let Some(token) = command.args.first() else {
        debug!("command has no args to get user mention from");
        return false;
    };

    let resolved = resolve_user(token, message.guild_id, ctx.platform.as_ref()).await;
    match resolved {
        Some(user) => {
            command.args.remove(0);
            command.user = Some(user);
            true
        }
        None => false,
    }
}
