//! TTL result cache.
//!
//! A concurrent map of computed values stamped with an expiry. Expired
//! entries read as absent and are overwritten on the next write. Nothing
//! invalidates an entry early: wallet or ledger edits show up once the TTL
//! runs out.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use tracing::trace;

use crate::category::SpendingCategory;
use crate::error::{EngineError, Result};

/// Validated cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// `recommendations_<category>_<whole dollars>_<wallet size>`.
    ///
    /// The amount is truncated, so $42.10 and $42.95 share a slot.
    pub fn recommendation(category: SpendingCategory, amount: f64, wallet_len: usize) -> Result<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(EngineError::MalformedCacheKey(format!(
                "recommendations_{}_{amount}_{wallet_len}",
                category.as_str()
            )));
        }
        Ok(Self(format!(
            "recommendations_{}_{}_{}",
            category.as_str(),
            amount.trunc() as u64,
            wallet_len
        )))
    }

    pub fn merchant_search(query: &str) -> Self {
        Self(format!("merchant_{}", query.trim().to_lowercase()))
    }

    pub fn category_lookup(merchant: &str) -> Self {
        Self(format!("category_{}", merchant.trim().to_lowercase()))
    }

    /// Accept a caller-built key. Blank keys are rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(EngineError::MalformedCacheKey(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub struct ResultCache<V> {
    // value, expires_at
    entries: DashMap<CacheKey, (V, DateTime<Utc>)>,
}

impl<V> Default for ResultCache<V> {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<V: Clone> ResultCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live value for `key` as of `now`.
    pub fn get_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<V> {
        let entry = self.entries.get(key)?;
        let (value, expires_at) = entry.value();
        if now < *expires_at {
            trace!(key = %key, "cache hit");
            Some(value.clone())
        } else {
            trace!(key = %key, "cache entry expired");
            None
        }
    }

    pub fn insert_at(&self, key: CacheKey, value: V, ttl_secs: u64, now: DateTime<Utc>) {
        self.entries.insert(key, (value, expiry(now, ttl_secs)));
    }

    /// Cached value if live, otherwise `compute` and store it.
    ///
    /// Two callers racing on a miss may both compute; the later write wins.
    pub fn get_or_compute_at<F>(&self, key: CacheKey, ttl_secs: u64, now: DateTime<Utc>, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(v) = self.get_at(&key, now) {
            return v;
        }
        trace!(key = %key, ttl_secs, "cache miss");
        let value = compute();
        self.insert_at(key, value.clone(), ttl_secs, now);
        value
    }

    /// Fallible variant; errors are returned and nothing is stored.
    pub fn try_get_or_compute_at<F>(
        &self,
        key: CacheKey,
        ttl_secs: u64,
        now: DateTime<Utc>,
        compute: F,
    ) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(v) = self.get_at(&key, now) {
            return Ok(v);
        }
        trace!(key = %key, ttl_secs, "cache miss");
        let value = compute()?;
        self.insert_at(key, value.clone(), ttl_secs, now);
        Ok(value)
    }

    pub fn get_or_compute<F>(&self, key: CacheKey, ttl_secs: u64, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.get_or_compute_at(key, ttl_secs, Utc::now(), compute)
    }

    pub fn remove(&self, key: &CacheKey) -> Option<V> {
        self.entries.remove(key).map(|(_, (v, _))| v)
    }

    /// Drop expired entries. Returns how many were removed.
    pub fn clear_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, (_, expires_at)| now < *expires_at);
        before - self.entries.len()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `now + ttl_secs`, pinned to the end of representable time when it would
/// overflow.
fn expiry(now: DateTime<Utc>, ttl_secs: u64) -> DateTime<Utc> {
    i64::try_from(ttl_secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
