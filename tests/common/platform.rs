//! In-memory platform double.

use async_trait::async_trait;
use bouncer::platform::{ChannelId, GuildId, Platform, PlatformError, RoleId, User, UserId};
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
struct State {
    categories: HashMap<ChannelId, Option<ChannelId>>,
    members: HashMap<GuildId, Vec<(User, Vec<RoleId>)>>,
    users: HashMap<UserId, User>,
    sent: Vec<(ChannelId, String)>,
    fail_channels: bool,
    fail_members: bool,
    fail_sends: bool,
}

/// Fake platform backed by maps. Every sent message is recorded.
pub struct MockPlatform {
    self_id: Option<UserId>,
    state: Mutex<State>,
}

impl MockPlatform {
    pub fn new(self_id: Option<UserId>) -> Self {
        Self {
            self_id,
            state: Mutex::new(State::default()),
        }
    }

    pub fn add_channel(&self, channel: ChannelId, category: Option<ChannelId>) {
        self.state.lock().categories.insert(channel, category);
    }

    /// Add a guild member. The user also becomes fetchable by id.
    pub fn add_member(&self, guild: GuildId, user: User, roles: Vec<RoleId>) {
        let mut state = self.state.lock();
        state.users.insert(user.id, user.clone());
        state.members.entry(guild).or_default().push((user, roles));
    }

    /// Make a user fetchable by id without being a guild member.
    pub fn add_user(&self, user: User) {
        self.state.lock().users.insert(user.id, user);
    }

    pub fn fail_channel_lookups(&self) {
        self.state.lock().fail_channels = true;
    }

    pub fn fail_member_lookups(&self) {
        self.state.lock().fail_members = true;
    }

    pub fn fail_sends(&self) {
        self.state.lock().fail_sends = true;
    }

    pub fn sent(&self) -> Vec<(ChannelId, String)> {
        self.state.lock().sent.clone()
    }
}

#[async_trait]
impl Platform for MockPlatform {
    fn self_id(&self) -> Option<UserId> {
        self.self_id
    }

    async fn channel_category(
        &self,
        channel: ChannelId,
    ) -> Result<Option<ChannelId>, PlatformError> {
        let state = self.state.lock();
        if state.fail_channels {
            return Err(PlatformError::Request("channel lookup unavailable".into()));
        }
        state
            .categories
            .get(&channel)
            .copied()
            .ok_or_else(|| PlatformError::NotFound(format!("channel {channel}")))
    }

    async fn member_roles(
        &self,
        guild: GuildId,
        user: UserId,
    ) -> Result<Vec<RoleId>, PlatformError> {
        let state = self.state.lock();
        if state.fail_members {
            return Err(PlatformError::Request("member lookup unavailable".into()));
        }
        state
            .members
            .get(&guild)
            .and_then(|members| members.iter().find(|(u, _)| u.id == user))
            .map(|(_, roles)| roles.clone())
            .ok_or_else(|| PlatformError::NotFound(format!("member {user}")))
    }

    async fn user(&self, id: UserId) -> Result<User, PlatformError> {
        self.state
            .lock()
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| PlatformError::NotFound(format!("user {id}")))
    }

    async fn guild_members(&self, guild: GuildId) -> Result<Vec<User>, PlatformError> {
        let state = self.state.lock();
        if state.fail_members {
            return Err(PlatformError::Request("member lookup unavailable".into()));
        }
        Ok(state
            .members
            .get(&guild)
            .map(|members| members.iter().map(|(u, _)| u.clone()).collect())
            .unwrap_or_default())
    }

    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        if state.fail_sends {
            return Err(PlatformError::Request("send failed".into()));
        }
        state.sent.push((channel, content.to_string()));
        Ok(())
    }
}
