use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::{CacheKey, InfluencerRecord};

/// The most recent completed search.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub records: Vec<InfluencerRecord>,
    pub fetched_at: DateTime<Utc>,
}

/// Thread-safe single-slot cache for search results
///
/// Only the last stored query is remembered; storing a new key replaces it.
/// Uses Arc<Mutex<>> so clones of a service share one slot.
#[derive(Clone, Default)]
pub struct ResultCache {
    slot: Arc<Mutex<Option<CacheEntry>>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<CacheEntry>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the cached entry when `key` matches the last stored key and
    /// its record list is non-empty.
    pub fn lookup(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.slot()
            .as_ref()
            .filter(|entry| &entry.key == key && !entry.records.is_empty())
            .cloned()
    }

    /// Replace the slot with `records` under `key`.
    pub fn store(&self, key: CacheKey, records: Vec<InfluencerRecord>) -> DateTime<Utc> {
        let fetched_at = Utc::now();
        *self.slot() = Some(CacheEntry {
            key,
            records,
            fetched_at,
        });
        fetched_at
    }

    pub fn last_key(&self) -> Option<CacheKey> {
        self.slot().as_ref().map(|entry| entry.key.clone())
    }

    pub fn clear(&self) {
        *self.slot() = None;
    }
}
