//! Time-bounded snapshot cache for the materialized company collection.
//!
//! The cache holds at most one snapshot: the full collection plus its capture
//! timestamp. Invalidation is purely lazy: the next read after the freshness
//! window elapses triggers a refresh. Snapshots are swapped wholesale behind
//! a `tokio::sync::RwLock`, so concurrent readers never observe a partially
//! written collection, and a `Mutex` lets refreshing callers coalesce on a
//! single in-flight fetch.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::error::Error;
use crate::model::company::Company;

/// The full company collection as of a capture timestamp.
#[derive(Clone, Debug)]
struct Snapshot {
    companies: Arc<Vec<Company>>,
    captured_at: DateTime<Utc>,
}

/// Outcome of a snapshot-backed read.
///
/// Callers branch on this explicitly instead of relying on error
/// suppression: serving stale data over serving an error is policy, and the
/// sum type keeps that decision visible at the call site.
#[derive(Debug)]
pub enum CacheOutcome {
    /// Snapshot within the freshness window (possibly just refreshed).
    Fresh(Arc<Vec<Company>>),
    /// Refresh failed; the previous snapshot is served instead.
    Stale(Arc<Vec<Company>>, Error),
    /// Refresh failed and no snapshot has ever been captured.
    Unavailable(Error),
}

impl CacheOutcome {
    /// Collapses the stale-tolerant policy into a plain result: any snapshot
    /// is `Ok`, only the never-populated case errors.
    pub fn into_result(self) -> Result<Arc<Vec<Company>>, Error> {
        match self {
            CacheOutcome::Fresh(companies) => Ok(companies),
            CacheOutcome::Stale(companies, _) => Ok(companies),
            CacheOutcome::Unavailable(e) => Err(e),
        }
    }

    /// The served collection, if any.
    pub fn companies(&self) -> Option<&Arc<Vec<Company>>> {
        match self {
            CacheOutcome::Fresh(companies) | CacheOutcome::Stale(companies, _) => Some(companies),
            CacheOutcome::Unavailable(_) => None,
        }
    }
}

/// Process-wide snapshot cache with a freshness window.
#[derive(Debug)]
pub struct CompanyCache {
    snapshot: RwLock<Option<Snapshot>>,
    refresh_lock: Mutex<()>,
    ttl: TimeDelta,
}

impl CompanyCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            snapshot: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    /// The current snapshot if it is within the freshness window.
    pub async fn fresh(&self) -> Option<Arc<Vec<Company>>> {
        let snapshot = self.snapshot.read().await;
        snapshot
            .as_ref()
            .filter(|s| Utc::now() - s.captured_at < self.ttl)
            .map(|s| Arc::clone(&s.companies))
    }

    /// The current snapshot regardless of age (stale fallback path).
    pub async fn any(&self) -> Option<Arc<Vec<Company>>> {
        let snapshot = self.snapshot.read().await;
        snapshot.as_ref().map(|s| Arc::clone(&s.companies))
    }

    /// Replaces the snapshot wholesale with a fresh capture timestamp.
    pub async fn store(&self, companies: Vec<Company>) -> Arc<Vec<Company>> {
        let companies = Arc::new(companies);
        let mut snapshot = self.snapshot.write().await;
        *snapshot = Some(Snapshot {
            companies: Arc::clone(&companies),
            captured_at: Utc::now(),
        });
        companies
    }

    /// Drops the snapshot; the next read refetches.
    pub async fn invalidate(&self) {
        let mut snapshot = self.snapshot.write().await;
        *snapshot = None;
    }

    /// Serializes refreshes so concurrent misses coalesce on one in-flight
    /// fetch. Callers re-check [`Self::fresh`] after acquiring the guard.
    pub async fn refresh_guard(&self) -> MutexGuard<'_, ()> {
        self.refresh_lock.lock().await
    }
}
