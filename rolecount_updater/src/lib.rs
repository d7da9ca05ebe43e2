pub mod discord;
pub mod error;
pub mod plan;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use rolecount_cache::{SnapshotCache, SnapshotSource};
use rolecount_core::{aggregate, AggregateOptions, Condition};
use serenity::all::ChannelId;
use tokio::time::MissedTickBehavior;

pub use error::{Error, Result};
pub use plan::{Rename, RenamePlan};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelRenamer: Send + Sync {
    async fn rename(&self, channel: ChannelId, name: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    /// Time between two passes.
    pub interval: Duration,
    /// Pause between two successive channel renames within a pass.
    pub rename_delay: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub renamed: usize,
    pub unchanged: usize,
    pub failed: usize,
}

/// Periodically writes member counts into channel names.
pub struct Updater {
    cache: Arc<SnapshotCache>,
    source: Arc<dyn SnapshotSource>,
    renamer: Arc<dyn ChannelRenamer>,
    plan: RenamePlan,
    options: AggregateOptions,
    schedule: Schedule,
    current_names: HashMap<ChannelId, String>,
}

impl Updater {
    pub fn new(
        cache: Arc<SnapshotCache>,
        source: Arc<dyn SnapshotSource>,
        renamer: Arc<dyn ChannelRenamer>,
        plan: RenamePlan,
        options: AggregateOptions,
        schedule: Schedule,
    ) -> Result<Self> {
        if !plan.has_channels() {
            return Err(Error::NothingToUpdate);
        }

        Ok(Self {
            cache,
            source,
            renamer,
            plan,
            options,
            schedule,
            current_names: HashMap::new(),
        })
    }

    /// Runs a pass immediately and then once per interval, forever.
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(self.schedule.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Channel updater started, updating every {:?}",
            self.schedule.interval
        );

        loop {
            interval.tick().await;

            match self.run_pass().await {
                Ok(report) => info!(
                    "Channel update finished: {} renamed, {} unchanged, {} failed",
                    report.renamed, report.unchanged, report.failed
                ),
                Err(why) => error!("Channel update failed: {why}"),
            }
        }
    }

    pub async fn run_pass(&mut self) -> Result<PassReport> {
        let cached = self.cache.get(self.source.as_ref()).await?;
        let result = aggregate(
            &cached.snapshot,
            &self.plan.tracked_role_ids(),
            &self.options,
        );

        for condition in &result.conditions {
            match condition {
                Condition::AmbiguousHighestRole { .. } => debug!("{condition}"),
                _ => warn!("{condition}"),
            }
        }

        let mut report = PassReport::default();
        let mut renamed_any = false;

        for rename in self.plan.render(&result) {
            if self.current_names.get(&rename.channel) == Some(&rename.name) {
                report.unchanged += 1;
                continue;
            }

            if renamed_any {
                tokio::time::sleep(self.schedule.rename_delay).await;
            }
            renamed_any = true;

            match self.renamer.rename(rename.channel, &rename.name).await {
                Ok(()) => {
                    debug!("Renamed channel {} to '{}'", rename.channel, rename.name);
                    self.current_names.insert(rename.channel, rename.name);
                    report.renamed += 1;
                }
                Err(why) => {
                    error!("Failed to rename channel {}: {why}", rename.channel);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}
