use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use rolecount_core::GuildSnapshot;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Error, Debug)]
pub enum Error {
    /// The source did not answer within the configured timeout
    #[error("Fetching the guild snapshot timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to fetch the guild snapshot: {0}")]
    Fetch(#[from] anyhow::Error),
}

pub type Result<T> = ::core::result::Result<T, Error>;

/// Where fresh guild snapshots come from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<GuildSnapshot>;
}

#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub snapshot: Arc<GuildSnapshot>,
    pub fetched_at: DateTime<Utc>,
}

impl CachedSnapshot {
    pub fn new(snapshot: GuildSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
            fetched_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        let Ok(ttl) = chrono::Duration::from_std(ttl) else {
            return false;
        };

        Utc::now() >= self.fetched_at + ttl
    }
}

/// Short-lived cache of the guild snapshot.
///
/// Concurrent callers share a single in-flight refresh: the slot stays locked while the
/// source is queried, so a second caller waits for and then reuses the first one's result.
/// A failed or timed out fetch leaves the previous slot untouched.
pub struct SnapshotCache {
    ttl: Duration,
    fetch_timeout: Duration,
    slot: Mutex<Option<CachedSnapshot>>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration, fetch_timeout: Duration) -> Self {
        Self {
            ttl,
            fetch_timeout,
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached snapshot, refreshing it from `source` when missing or expired.
    pub async fn get(&self, source: &dyn SnapshotSource) -> Result<CachedSnapshot> {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if !cached.is_expired(self.ttl) {
                debug!("Serving guild snapshot from {}", cached.fetched_at);
                return Ok(cached.clone());
            }
        }

        self.fetch_into(&mut slot, source).await
    }

    /// Fetches a new snapshot even when the cached one is still fresh.
    ///
    /// The previous snapshot is only replaced once the fetch succeeds.
    pub async fn refresh(&self, source: &dyn SnapshotSource) -> Result<CachedSnapshot> {
        let mut slot = self.slot.lock().await;
        self.fetch_into(&mut slot, source).await
    }

    async fn fetch_into(
        &self,
        slot: &mut Option<CachedSnapshot>,
        source: &dyn SnapshotSource,
    ) -> Result<CachedSnapshot> {
        let snapshot = tokio::time::timeout(self.fetch_timeout, source.fetch())
            .await
            .map_err(|_| Error::Timeout(self.fetch_timeout))??;

        info!(
            "Refreshed guild snapshot: {} members, {} roles",
            snapshot.members.len(),
            snapshot.roles.len()
        );

        let cached = CachedSnapshot::new(snapshot);
        *slot = Some(cached.clone());

        Ok(cached)
    }

    pub async fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.slot.lock().await.as_ref().map(|cached| cached.fetched_at)
    }
}
