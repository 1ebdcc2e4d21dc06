//! Integration test common infrastructure.
//!
//! Provides an in-memory [`Platform`] and helpers for building a dispatcher
//! around it with an in-memory database.

#![allow(dead_code)]

pub mod platform;

pub use platform::MockPlatform;

use bouncer::config::{CategoryConfig, Config, RoleConfig};
use bouncer::db::Database;
use bouncer::handlers::{Command, Context, Dispatcher, Registry};
use bouncer::platform::{ChannelId, GuildId, InboundMessage, RoleId, User, UserId};
use std::sync::Arc;
use tracing::Level;
use tracing::subscriber::DefaultGuard;

pub const GUILD: GuildId = GuildId(1);
pub const LISTENING_CATEGORY: ChannelId = ChannelId(100);
pub const OTHER_CATEGORY: ChannelId = ChannelId(101);
pub const STAFF_CHANNEL: ChannelId = ChannelId(200);
pub const GENERAL_CHANNEL: ChannelId = ChannelId(201);
pub const ADMIN_ROLE: RoleId = RoleId(300);
pub const BOT_ID: UserId = UserId(1000);
pub const MOD_ID: UserId = UserId(10);

pub fn user(id: u64, name: &str) -> User {
    User {
        id: UserId(id),
        name: name.to_string(),
        bot: false,
    }
}

pub fn test_config() -> Config {
    Config {
        token: "test-token".into(),
        prefix: "!".into(),
        database_path: None,
        categories: CategoryConfig {
            listening: vec![LISTENING_CATEGORY],
        },
        roles: RoleConfig {
            admin: vec![ADMIN_ROLE],
        },
    }
}

/// A platform with one guild, a staff channel in the listening category,
/// a general channel outside it, the bot, a moderator and a few members.
pub fn guild_platform() -> MockPlatform {
    let platform = MockPlatform::new(Some(BOT_ID));
    platform.add_channel(STAFF_CHANNEL, Some(LISTENING_CATEGORY));
    platform.add_channel(GENERAL_CHANNEL, Some(OTHER_CATEGORY));
    platform.add_member(GUILD, user(MOD_ID.get(), "moderator"), vec![ADMIN_ROLE]);
    platform.add_member(GUILD, user(123, "spammer"), vec![]);
    platform.add_member(GUILD, user(5, "alice"), vec![]);
    platform
}

/// A message from the moderator in the staff channel.
pub fn staff_message(content: &str) -> InboundMessage {
    message_from(user(MOD_ID.get(), "moderator"), STAFF_CHANNEL, content)
}

pub fn message_from(author: User, channel: ChannelId, content: &str) -> InboundMessage {
    InboundMessage {
        author,
        content: content.to_string(),
        channel_id: channel,
        guild_id: Some(GUILD),
    }
}

/// Thread-local subscriber logging at `level`. `#[tokio::test]` runs on the
/// current thread, so everything a test dispatches sees it.
pub fn log_at(level: Level) -> DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}

pub struct Harness {
    pub platform: Arc<MockPlatform>,
    pub db: Database,
    pub dispatcher: Dispatcher,
    _log: DefaultGuard,
}

impl Harness {
    /// Dispatcher over the built-in commands.
    pub async fn new() -> Self {
        Self::with_commands(bouncer::commands::all()).await
    }

    pub async fn with_commands(commands: Vec<Box<dyn Command>>) -> Self {
        Self::build(guild_platform(), commands).await
    }

    pub async fn build(platform: MockPlatform, commands: Vec<Box<dyn Command>>) -> Self {
        Self::build_at(Level::INFO, platform, commands).await
    }

    /// Build with the test's log level set to `level`. Each harness owns
    /// its subscriber so tests running in parallel never share one.
    pub async fn build_at(
        level: Level,
        platform: MockPlatform,
        commands: Vec<Box<dyn Command>>,
    ) -> Self {
        let log = log_at(level);
        let platform = Arc::new(platform);
        let db = Database::new(Database::MEMORY).await.expect("in-memory database");
        let ctx = Context::new(platform.clone(), Arc::new(test_config()), db.clone());
        let registry = Registry::build(commands).expect("registry builds");
        registry.setup(&ctx);

        let dispatcher = Dispatcher::new(Arc::new(registry), ctx);
        Self {
            platform,
            db,
            dispatcher,
            _log: log,
        }
    }

    /// Replies sent so far, as text.
    pub fn replies(&self) -> Vec<String> {
        self.platform
            .sent()
            .into_iter()
            .map(|(_, text)| text)
            .collect()
    }
}
