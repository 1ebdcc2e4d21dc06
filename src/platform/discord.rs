//! Discord implementation of [`Platform`] on top of serenity.
//!
//! Lookups go through the HTTP API. The gateway connection only feeds
//! message events into the [`Dispatcher`] and records the bot's own id
//! when the session becomes ready.

use super::{ChannelId, GuildId, InboundMessage, Platform, PlatformError, RoleId, User, UserId};
use crate::handlers::Dispatcher;
use async_trait::async_trait;
use parking_lot::RwLock;
use serenity::all as discord;
use std::sync::Arc;
use tracing::{info, warn};

/// Maximum page size of the guild member list endpoint.
const MEMBER_PAGE: u64 = 1000;

/// Discord-backed platform.
pub struct DiscordPlatform {
    http: Arc<discord::Http>,
    self_id: RwLock<Option<UserId>>,
}

impl DiscordPlatform {
    /// Create a platform client authenticated with a bot token.
    pub fn new(token: &str) -> Self {
        Self {
            http: Arc::new(discord::Http::new(token)),
            self_id: RwLock::new(None),
        }
    }

    fn set_self_id(&self, id: UserId) {
        *self.self_id.write() = Some(id);
    }
}

fn request_error(err: discord::Error) -> PlatformError {
    PlatformError::Request(err.to_string())
}

/// Discord ids are non-zero; serenity panics on zero.
fn non_zero(id: u64, kind: &str) -> Result<u64, PlatformError> {
    if id == 0 {
        Err(PlatformError::NotFound(format!("{kind} 0")))
    } else {
        Ok(id)
    }
}

fn convert_user(user: &discord::User) -> User {
    User {
        id: UserId(user.id.get()),
        name: user.name.clone(),
        bot: user.bot,
    }
}

#[async_trait]
impl Platform for DiscordPlatform {
    fn self_id(&self) -> Option<UserId> {
        *self.self_id.read()
    }

    async fn channel_category(
        &self,
        channel: ChannelId,
    ) -> Result<Option<ChannelId>, PlatformError> {
        let channel = discord::ChannelId::new(non_zero(channel.get(), "channel")?)
            .to_channel(&self.http)
            .await
            .map_err(request_error)?;

        Ok(channel
            .guild()
            .and_then(|c| c.parent_id)
            .map(|id| ChannelId(id.get())))
    }

    async fn member_roles(
        &self,
        guild: GuildId,
        user: UserId,
    ) -> Result<Vec<RoleId>, PlatformError> {
        let guild = discord::GuildId::new(non_zero(guild.get(), "guild")?);
        let user = discord::UserId::new(non_zero(user.get(), "user")?);
        let member = guild
            .member(&self.http, user)
            .await
            .map_err(request_error)?;

        Ok(member.roles.iter().map(|r| RoleId(r.get())).collect())
    }

    async fn user(&self, id: UserId) -> Result<User, PlatformError> {
        let user = discord::UserId::new(non_zero(id.get(), "user")?)
            .to_user(&self.http)
            .await
            .map_err(request_error)?;

        Ok(convert_user(&user))
    }

    async fn guild_members(&self, guild: GuildId) -> Result<Vec<User>, PlatformError> {
        let guild = discord::GuildId::new(non_zero(guild.get(), "guild")?);
        let mut users = Vec::new();
        let mut after: Option<discord::UserId> = None;

        loop {
            let page = guild
                .members(&self.http, Some(MEMBER_PAGE), after)
                .await
                .map_err(request_error)?;

            let last_page = (page.len() as u64) < MEMBER_PAGE;
            after = page.last().map(|m| m.user.id);
            users.extend(page.iter().map(|m| convert_user(&m.user)));

            if last_page || after.is_none() {
                break;
            }
        }

        Ok(users)
    }

    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<(), PlatformError> {
        discord::ChannelId::new(non_zero(channel.get(), "channel")?)
            .say(&self.http, content)
            .await
            .map(|_| ())
            .map_err(request_error)
    }
}

// ============================================================================
// Gateway event handling
// ============================================================================

/// Gateway event handler feeding messages into the dispatcher.
struct DiscordHandler {
    platform: Arc<DiscordPlatform>,
    dispatcher: Arc<Dispatcher>,
}

#[async_trait]
impl discord::EventHandler for DiscordHandler {
    async fn ready(&self, _ctx: discord::Context, ready: discord::Ready) {
        self.platform.set_self_id(UserId(ready.user.id.get()));
        info!(user = %ready.user.name, "Connected to discord!");
    }

    async fn message(&self, _ctx: discord::Context, msg: discord::Message) {
        let inbound = InboundMessage {
            author: convert_user(&msg.author),
            content: msg.content,
            channel_id: ChannelId(msg.channel_id.get()),
            guild_id: msg.guild_id.map(|g| GuildId(g.get())),
        };

        self.dispatcher.handle_message(inbound).await;
    }
}

/// Connect to Discord and serve events until Ctrl-C.
pub async fn run(
    token: &str,
    platform: Arc<DiscordPlatform>,
    dispatcher: Arc<Dispatcher>,
) -> Result<(), discord::Error> {
    let intents = discord::GatewayIntents::GUILDS
        | discord::GatewayIntents::GUILD_MEMBERS
        | discord::GatewayIntents::GUILD_MESSAGES
        | discord::GatewayIntents::MESSAGE_CONTENT;

    let mut client = discord::Client::builder(token, intents)
        .event_handler(DiscordHandler {
            platform,
            dispatcher,
        })
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        info!("Shutting down discord connection");
        shard_manager.shutdown_all().await;
    });

    info!("Bot is now running. Press CTRL-C to exit.");
    client.start().await
}
