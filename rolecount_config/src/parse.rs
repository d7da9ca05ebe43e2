use std::time::Duration;

use rolecount_core::RoleId;
use serenity::all::ChannelId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("'{0}' is not a valid id")]
    InvalidId(String),

    #[error("'{0}' is not a valid number of seconds")]
    InvalidSeconds(String),

    #[error("'{0}' must be at least one second")]
    ZeroSeconds(String),

    #[error("'{0}' is not a valid boolean")]
    InvalidFlag(String),

    #[error("Channel binding '{0}' must look like <channel_id>:<template>")]
    InvalidChannelBinding(String),
}

/// A channel whose name is rewritten from `template` on every update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelBinding {
    pub channel: ChannelId,
    pub template: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedRole {
    pub role: RoleId,
    pub channel: Option<ChannelBinding>,
}

pub fn parse_id(value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidId(value.to_string())),
        Ok(id) => Ok(id),
    }
}

/// Empty values mean "not configured".
pub fn parse_optional_id(value: &str) -> Result<Option<u64>, ConfigError> {
    if value.trim().is_empty() {
        return Ok(None);
    }

    parse_id(value).map(Some)
}

pub fn parse_seconds(value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidSeconds(value.to_string()))
}

/// Like [`parse_seconds`], for periods and timeouts that cannot be zero.
pub fn parse_positive_seconds(value: &str) -> Result<Duration, ConfigError> {
    match parse_seconds(value)? {
        Duration::ZERO => Err(ConfigError::ZeroSeconds(value.to_string())),
        duration => Ok(duration),
    }
}

pub fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag(value.to_string())),
    }
}

/// Parses `<channel_id>:<template>`. The template may itself contain colons.
pub fn parse_channel_binding(value: &str) -> Result<ChannelBinding, ConfigError> {
    let Some((channel, template)) = value.trim().split_once(':') else {
        return Err(ConfigError::InvalidChannelBinding(value.to_string()));
    };

    if template.trim().is_empty() {
        return Err(ConfigError::InvalidChannelBinding(value.to_string()));
    }

    Ok(ChannelBinding {
        channel: ChannelId::new(parse_id(channel)?),
        template: template.trim().to_string(),
    })
}

pub fn parse_optional_channel_binding(value: &str) -> Result<Option<ChannelBinding>, ConfigError> {
    if value.trim().is_empty() {
        return Ok(None);
    }

    parse_channel_binding(value).map(Some)
}

/// Parses `;`-separated `<role_id>[:<channel_id>:<template>]` entries, keeping their order.
pub fn parse_tracked_roles(value: &str) -> Result<Vec<TrackedRole>, ConfigError> {
    value
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((role, binding)) => Ok(TrackedRole {
                role: RoleId(parse_id(role)?),
                channel: Some(parse_channel_binding(binding)?),
            }),
            None => Ok(TrackedRole {
                role: RoleId(parse_id(entry)?),
                channel: None,
            }),
        })
        .collect()
}
