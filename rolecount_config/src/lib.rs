mod env;
mod parse;

use std::time::Duration;

use rolecount_core::{AggregateOptions, ResolutionPolicy, RoleId};
use serenity::all::{GatewayIntents, GuildId};

pub use parse::{
    parse_channel_binding, parse_flag, parse_id, parse_optional_channel_binding,
    parse_optional_id, parse_positive_seconds, parse_seconds, parse_tracked_roles,
    ChannelBinding, ConfigError, TrackedRole,
};

pub fn discord_token() -> &'static str {
    &env::DISCORD_TOKEN
}

/// Listing guild members requires the privileged members intent.
pub fn discord_intents() -> GatewayIntents {
    GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS
}

pub fn guild_id() -> GuildId {
    GuildId::new(*env::GUILD_ID)
}

pub fn verified_role() -> Option<RoleId> {
    env::VERIFIED_ROLE_ID.map(RoleId)
}

pub fn ignored_role() -> Option<RoleId> {
    env::IGNORED_ROLE_ID.map(RoleId)
}

/// Role allowed to run staff commands. Without one, only members with Manage Server may.
pub fn command_role() -> Option<RoleId> {
    env::COMMAND_ROLE_ID.map(RoleId)
}

pub fn tracked_roles() -> &'static [TrackedRole] {
    &env::TRACKED_ROLES
}

pub fn total_channel() -> Option<&'static ChannelBinding> {
    env::TOTAL_CHANNEL.as_ref()
}

pub fn verified_channel() -> Option<&'static ChannelBinding> {
    env::VERIFIED_CHANNEL.as_ref()
}

pub fn unverified_channel() -> Option<&'static ChannelBinding> {
    env::UNVERIFIED_CHANNEL.as_ref()
}

pub fn update_interval() -> Duration {
    *env::UPDATE_INTERVAL
}

pub fn cache_ttl() -> Duration {
    *env::CACHE_TTL
}

pub fn rename_delay() -> Duration {
    *env::RENAME_DELAY
}

pub fn fetch_timeout() -> Duration {
    *env::FETCH_TIMEOUT
}

pub fn resolution_policy() -> ResolutionPolicy {
    if *env::SKIP_MANAGED_ROLES {
        ResolutionPolicy::STRICT
    } else {
        ResolutionPolicy::LENIENT
    }
}

pub fn aggregate_options() -> AggregateOptions {
    AggregateOptions {
        ignored_role: ignored_role(),
        verified_role: verified_role(),
        policy: resolution_policy(),
    }
}
