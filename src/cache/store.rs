//! Cache Store Module
//!
//! HashMap storage with fixed TTL expiration. Expired entries read as misses
//! even before the background sweep removes them.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::{CacheEntry, CacheKey, CacheStats};
use crate::error::{AppError, Result};

// == Cache Store ==
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<CacheKey, CacheEntry>,
    /// Lookup statistics
    stats: CacheStats,
    /// TTL in seconds applied to every write, 0 = never expire
    ttl: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore whose entries live `ttl` seconds after their
    /// last write. A `ttl` of 0 keeps entries until they are deleted.
    pub fn new(ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
        }
    }

    // == Set ==
    /// Stores a value under `key`, overwriting any previous value and
    /// restarting the TTL.
    pub fn set(&mut self, key: CacheKey, value: Value) {
        let ttl = (self.ttl > 0).then_some(self.ttl);
        self.entries.insert(key, CacheEntry::new(value, ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Reading does not extend the entry's lifetime. Expired entries are
    /// removed and counted as misses.
    pub fn get(&mut self, key: &CacheKey) -> Result<Value> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                return Err(AppError::Expired(key.to_string()));
            }

            let value = entry.value.clone();
            self.stats.record_hit();
            Ok(value)
        } else {
            self.stats.record_miss();
            Err(AppError::NotFound(key.to_string()))
        }
    }

    // == Replace ==
    /// Overwrites an existing, unexpired entry. Absent keys are not inserted.
    pub fn replace(&mut self, key: CacheKey, value: Value) -> Result<()> {
        self.get(&key)?;
        self.set(key, value);
        Ok(())
    }

    // == Delete ==
    /// Removes an entry by key. An expired entry counts as absent.
    pub fn delete(&mut self, key: &CacheKey) -> Result<()> {
        match self.entries.remove(key) {
            Some(entry) => {
                self.stats.set_total_entries(self.entries.len());
                if entry.is_expired() {
                    Err(AppError::Expired(key.to_string()))
                } else {
                    Ok(())
                }
            }
            None => Err(AppError::NotFound(key.to_string())),
        }
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        self.stats.set_total_entries(self.entries.len());
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
