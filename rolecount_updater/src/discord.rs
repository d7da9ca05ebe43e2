use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rolecount_cache::SnapshotSource;
use rolecount_core::{GuildSnapshot, Member, MemberId, Role, RoleCatalogue, RoleId};
use serenity::all::{ChannelId, EditChannel, GuildId, Http, UserId};

use crate::{ChannelRenamer, Result};

/// Discord caps a single member list request at this many entries.
const MEMBER_PAGE_SIZE: u64 = 1000;

/// Fetches guild snapshots over the Discord REST API.
pub struct SerenitySource {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl SerenitySource {
    pub fn new(http: Arc<Http>, guild_id: GuildId) -> Self {
        Self { http, guild_id }
    }
}

#[async_trait]
impl SnapshotSource for SerenitySource {
    async fn fetch(&self) -> anyhow::Result<GuildSnapshot> {
        let roles: RoleCatalogue = self
            .http
            .get_guild_roles(self.guild_id)
            .await?
            .into_iter()
            .map(convert_role)
            .collect();

        let mut members = Vec::new();
        let mut after: Option<UserId> = None;

        loop {
            let page = self
                .http
                .get_guild_members(
                    self.guild_id,
                    Some(MEMBER_PAGE_SIZE),
                    after.map(|id| id.get()),
                )
                .await?;

            debug!("Fetched page of {} guild members", page.len());
            members.extend(page.iter().map(convert_member));

            match page.last() {
                Some(last) if page.len() as u64 == MEMBER_PAGE_SIZE => after = Some(last.user.id),
                _ => break,
            }
        }

        Ok(GuildSnapshot::new(members, roles))
    }
}

fn convert_role(role: serenity::all::Role) -> Role {
    Role {
        id: RoleId(role.id.get()),
        name: role.name,
        position: i32::from(role.position),
        managed: role.managed,
    }
}

fn convert_member(member: &serenity::all::Member) -> Member {
    Member {
        id: MemberId(member.user.id.get()),
        is_bot: member.user.bot,
        roles: member.roles.iter().map(|role| RoleId(role.get())).collect(),
    }
}

pub struct SerenityRenamer {
    http: Arc<Http>,
}

impl SerenityRenamer {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChannelRenamer for SerenityRenamer {
    async fn rename(&self, channel: ChannelId, name: &str) -> Result<()> {
        channel
            .edit(&*self.http, EditChannel::new().name(name))
            .await?;

        Ok(())
    }
}
