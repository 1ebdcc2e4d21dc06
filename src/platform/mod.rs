//! Chat platform abstraction.
//!
//! The command pipeline only talks to the platform through [`Platform`], so
//! the Discord client lives in [`discord`] and tests can swap in a fake.

pub mod discord;

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Declares a snowflake id newtype.
macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw numeric id.
            #[inline]
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

snowflake!(
    /// A platform user id.
    UserId
);
snowflake!(
    /// A channel id. Channel categories are channels too.
    ChannelId
);
snowflake!(
    /// A guild (server) id.
    GuildId
);
snowflake!(
    /// A guild role id.
    RoleId
);

/// Errors from platform lookups and sends.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("message was not sent in a guild")]
    NoGuild,
    #[error("request failed: {0}")]
    Request(String),
}

/// A platform user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    /// Username (not the per-guild nickname).
    pub name: String,
    /// Whether the account is flagged as automated.
    pub bot: bool,
}

/// An inbound chat message, as delivered by the platform.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub author: User,
    pub content: String,
    pub channel_id: ChannelId,
    /// `None` for direct messages.
    pub guild_id: Option<GuildId>,
}

/// Platform capabilities used by the command pipeline and commands.
///
/// Every lookup may hit the network. Failures are returned as-is; retrying
/// is up to the implementation.
#[async_trait]
pub trait Platform: Send + Sync {
    /// The bot's own user id, once known.
    fn self_id(&self) -> Option<UserId>;

    /// Parent category of a channel, `None` when it has no category.
    async fn channel_category(&self, channel: ChannelId)
    -> Result<Option<ChannelId>, PlatformError>;

    /// Roles held by a guild member.
    async fn member_roles(&self, guild: GuildId, user: UserId)
    -> Result<Vec<RoleId>, PlatformError>;

    /// Fetch a user by id.
    async fn user(&self, id: UserId) -> Result<User, PlatformError>;

    /// All members of a guild.
    async fn guild_members(&self, guild: GuildId) -> Result<Vec<User>, PlatformError>;

    /// Send a plain text message to a channel.
    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<(), PlatformError>;
}
