use rolecount_config::{ChannelBinding, TrackedRole};
use rolecount_core::{AggregationResult, RoleId};
use rolecount_utils::template::render_channel_name;
use serenity::all::ChannelId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub channel: ChannelId,
    pub name: String,
}

/// Which channels show which count.
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    pub total: Option<ChannelBinding>,
    pub verified: Option<ChannelBinding>,
    pub unverified: Option<ChannelBinding>,
    pub tracked: Vec<TrackedRole>,
}

impl RenamePlan {
    pub fn from_config() -> Self {
        Self {
            total: rolecount_config::total_channel().cloned(),
            verified: rolecount_config::verified_channel().cloned(),
            unverified: rolecount_config::unverified_channel().cloned(),
            tracked: rolecount_config::tracked_roles().to_vec(),
        }
    }

    pub fn tracked_role_ids(&self) -> Vec<RoleId> {
        self.tracked.iter().map(|tracked| tracked.role).collect()
    }

    /// Whether any channel is bound at all.
    pub fn has_channels(&self) -> bool {
        self.total.is_some()
            || self.verified.is_some()
            || self.unverified.is_some()
            || self.tracked.iter().any(|tracked| tracked.channel.is_some())
    }

    /// Channel names for `result`, in a stable order: totals first, then tracked roles.
    ///
    /// Tracked roles that were skipped during aggregation produce no rename.
    pub fn render(&self, result: &AggregationResult) -> Vec<Rename> {
        let fixed = [
            (&self.total, result.total_members),
            (&self.verified, result.verified_members),
            (&self.unverified, result.unverified_members),
        ];

        let fixed = fixed
            .into_iter()
            .filter_map(|(binding, count)| binding.as_ref().map(|binding| (binding, count)));

        let tracked = self.tracked.iter().filter_map(|tracked| {
            let binding = tracked.channel.as_ref()?;
            let entry = result.count_for(tracked.role)?;
            Some((binding, entry.count))
        });

        fixed
            .chain(tracked)
            .map(|(binding, count)| Rename {
                channel: binding.channel,
                name: render_channel_name(&binding.template, count),
            })
            .collect()
    }
}
