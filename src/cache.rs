//! In-memory store bridging a webhook POST and a later polling GET.
//!
//! Lives for as long as the Lambda execution environment does. Two instances
//! never see each other's entries, so a poll routed to a fresh instance
//! gets the loading placeholder until its own webhook arrives.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use lambda_http::tracing::debug;

use crate::models::LookupResult;

/// Key used when the webhook carries no ticket id.
pub const FALLBACK_KEY: &str = "latest";

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub result: LookupResult,
    pub stored_at: DateTime<Utc>,
}

pub struct ResultCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    max_age: Duration,
}

impl ResultCache {
    pub fn new(max_age: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_age,
        }
    }

    /// Sweeps entries older than `max_age`, then inserts or overwrites `key`.
    pub fn store(&self, key: &str, result: LookupResult) {
        self.store_at(key, result, Utc::now());
    }

    pub(crate) fn store_at(&self, key: &str, result: LookupResult, stored_at: DateTime<Utc>) {
        let mut entries = self.lock();
        sweep(&mut entries, Utc::now() - self.max_age);
        entries.insert(
            key.to_string(),
            CacheEntry {
                key: key.to_string(),
                result,
                stored_at,
            },
        );
    }

    /// Does not sweep; a stale entry is still returned until the next `store`.
    pub fn fetch(&self, key: &str) -> Option<LookupResult> {
        self.lock().get(key).map(|entry| entry.result.clone())
    }

    /// Removes every entry older than `max_age`. Returns how many were dropped.
    pub fn evict_older_than(&self, max_age: Duration) -> usize {
        sweep(&mut self.lock(), Utc::now() - max_age)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the map half-written, so keep serving it.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn sweep(entries: &mut HashMap<String, CacheEntry>, cutoff: DateTime<Utc>) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| {
        let fresh = entry.stored_at >= cutoff;
        if !fresh {
            debug!(ticket = %entry.key, stored_at = %entry.stored_at, "evicting stale lookup");
        }
        fresh
    });
    before - entries.len()
}
