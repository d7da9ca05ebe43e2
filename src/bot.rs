use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{error, info};
use poise::{CreateReply, Framework, FrameworkOptions};
use rolecount_cache::{CachedSnapshot, SnapshotCache};
use rolecount_core::{aggregate, AggregateOptions, AggregationResult, RoleId};
use rolecount_updater::discord::{SerenityRenamer, SerenitySource};
use rolecount_updater::{RenamePlan, Schedule, Updater};
use rolecount_utils::discord::Colors;
use serenity::all::{CreateEmbed, Ready};

use crate::commands;

pub type Context<'a> = poise::Context<'a, Data, anyhow::Error>;
pub type FrameworkError<'a> = poise::FrameworkError<'a, Data, anyhow::Error>;

pub struct Data {
    cache: Arc<SnapshotCache>,
    source: Arc<SerenitySource>,
    plan: RenamePlan,
    options: AggregateOptions,
    command_role: Option<RoleId>,
}

/// Result of one aggregation pass, together with the age of the snapshot it ran over.
pub struct Count {
    pub result: AggregationResult,
    pub fetched_at: DateTime<Utc>,
}

impl Data {
    pub async fn count(&self) -> rolecount_cache::Result<Count> {
        let cached = self.cache.get(self.source.as_ref()).await?;
        Ok(self.count_snapshot(cached))
    }

    /// Like [`Data::count`], but always fetches a new snapshot first.
    pub async fn refresh(&self) -> rolecount_cache::Result<Count> {
        let cached = self.cache.refresh(self.source.as_ref()).await?;
        Ok(self.count_snapshot(cached))
    }

    fn count_snapshot(&self, cached: CachedSnapshot) -> Count {
        Count {
            result: aggregate(
                &cached.snapshot,
                &self.plan.tracked_role_ids(),
                &self.options,
            ),
            fetched_at: cached.fetched_at,
        }
    }
}

pub fn framework_opts() -> FrameworkOptions<Data, anyhow::Error> {
    FrameworkOptions {
        commands: vec![
            commands::core::ping(),
            commands::stats::membercount(),
            commands::stats::rolecount(),
            commands::stats::refresh(),
        ],
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    }
}

pub async fn setup(
    ctx: &serenity::all::Context,
    ready: &Ready,
    framework: &Framework<Data, anyhow::Error>,
) -> Result<Data> {
    info!("Successfully logged in as {}", ready.user.name);

    let guild_id = rolecount_config::guild_id();
    poise::builtins::register_in_guild(ctx, &framework.options().commands, guild_id).await?;

    let cache = Arc::new(SnapshotCache::new(
        rolecount_config::cache_ttl(),
        rolecount_config::fetch_timeout(),
    ));
    let source = Arc::new(SerenitySource::new(ctx.http.clone(), guild_id));
    let plan = RenamePlan::from_config();
    let options = rolecount_config::aggregate_options();

    match Updater::new(
        cache.clone(),
        source.clone(),
        Arc::new(SerenityRenamer::new(ctx.http.clone())),
        plan.clone(),
        options,
        Schedule {
            interval: rolecount_config::update_interval(),
            rename_delay: rolecount_config::rename_delay(),
        },
    ) {
        Ok(updater) => {
            tokio::spawn(updater.run());
        }
        Err(why) => info!("Channel updater disabled: {why}"),
    }

    Ok(Data {
        cache,
        source,
        plan,
        options,
        command_role: rolecount_config::command_role(),
    })
}

/// Allows members holding the configured command role, or with Manage Server when none is set.
pub async fn is_staff(ctx: Context<'_>) -> Result<bool> {
    let Some(member) = ctx.author_member().await else {
        return Ok(false);
    };

    let allowed = match ctx.data().command_role {
        Some(role) => member
            .roles
            .iter()
            .any(|held| held.get() == role.get()),
        None => member
            .permissions
            .is_some_and(|permissions| permissions.manage_guild()),
    };

    if !allowed {
        ctx.send(
            CreateReply::default()
                .embed(
                    CreateEmbed::new()
                        .description("You are not allowed to use this command.")
                        .color(Colors::Error),
                )
                .ephemeral(true),
        )
        .await?;
    }

    Ok(allowed)
}

async fn on_error(error: FrameworkError<'_>) {
    if let Err(why) = poise::builtins::on_error(error).await {
        error!("Failed to handle framework error: {why}");
    }
}
