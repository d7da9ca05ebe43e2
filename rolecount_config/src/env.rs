use std::sync::LazyLock;
use std::time::Duration;

use crate::parse::{self, ChannelBinding, TrackedRole};

fn var(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

fn seconds_or(name: &str, default: u64) -> Duration {
    match std::env::var(name) {
        Ok(value) => parse::parse_seconds(&value)
            .unwrap_or_else(|why| panic!("{name} must be a number of seconds: {why}")),
        Err(_) => Duration::from_secs(default),
    }
}

fn positive_seconds_or(name: &str, default: u64) -> Duration {
    match std::env::var(name) {
        Ok(value) => parse::parse_positive_seconds(&value)
            .unwrap_or_else(|why| panic!("{name} must be a positive number of seconds: {why}")),
        Err(_) => Duration::from_secs(default),
    }
}

fn optional_id(name: &str) -> Option<u64> {
    parse::parse_optional_id(&var(name)).unwrap_or_else(|why| panic!("invalid {name}: {why}"))
}

fn optional_channel(name: &str) -> Option<ChannelBinding> {
    parse::parse_optional_channel_binding(&var(name))
        .unwrap_or_else(|why| panic!("invalid {name}: {why}"))
}

pub static DISCORD_TOKEN: LazyLock<String> = LazyLock::new(|| {
    std::env::var("DISCORD_TOKEN").expect("missing DISCORD_TOKEN environment variable")
});
pub static GUILD_ID: LazyLock<u64> = LazyLock::new(|| {
    parse::parse_id(&std::env::var("GUILD_ID").expect("missing GUILD_ID environment variable"))
        .expect("GUILD_ID must be a valid guild id")
});
pub static VERIFIED_ROLE_ID: LazyLock<Option<u64>> =
    LazyLock::new(|| optional_id("VERIFIED_ROLE_ID"));
pub static IGNORED_ROLE_ID: LazyLock<Option<u64>> =
    LazyLock::new(|| optional_id("IGNORED_ROLE_ID"));
pub static COMMAND_ROLE_ID: LazyLock<Option<u64>> =
    LazyLock::new(|| optional_id("COMMAND_ROLE_ID"));
pub static TRACKED_ROLES: LazyLock<Vec<TrackedRole>> = LazyLock::new(|| {
    parse::parse_tracked_roles(&var("TRACKED_ROLES"))
        .unwrap_or_else(|why| panic!("invalid TRACKED_ROLES: {why}"))
});
pub static TOTAL_CHANNEL: LazyLock<Option<ChannelBinding>> =
    LazyLock::new(|| optional_channel("TOTAL_CHANNEL"));
pub static VERIFIED_CHANNEL: LazyLock<Option<ChannelBinding>> =
    LazyLock::new(|| optional_channel("VERIFIED_CHANNEL"));
pub static UNVERIFIED_CHANNEL: LazyLock<Option<ChannelBinding>> =
    LazyLock::new(|| optional_channel("UNVERIFIED_CHANNEL"));
pub static UPDATE_INTERVAL: LazyLock<Duration> =
    LazyLock::new(|| positive_seconds_or("UPDATE_INTERVAL_SECS", 600));
pub static CACHE_TTL: LazyLock<Duration> = LazyLock::new(|| seconds_or("CACHE_TTL_SECS", 3600));
pub static RENAME_DELAY: LazyLock<Duration> =
    LazyLock::new(|| seconds_or("RENAME_DELAY_SECS", 5));
pub static FETCH_TIMEOUT: LazyLock<Duration> =
    LazyLock::new(|| positive_seconds_or("FETCH_TIMEOUT_SECS", 60));
pub static SKIP_MANAGED_ROLES: LazyLock<bool> = LazyLock::new(|| {
    match std::env::var("SKIP_MANAGED_ROLES") {
        Ok(value) => parse::parse_flag(&value).expect("SKIP_MANAGED_ROLES must be a boolean"),
        Err(_) => true,
    }
});
