//! TTL-cached merchant classifier.

use cardwise_core::{CacheKey, EngineConfig, MerchantClassifier, ResultCache, SpendingCategory};
use chrono::{DateTime, Utc};

use crate::directory::{Merchant, MerchantDirectory};

/// Wraps a directory so repeated lookups and autocomplete queries are served
/// from a cache for `ttl_secs`.
pub struct CachedClassifier {
    directory: MerchantDirectory,
    categories: ResultCache<Option<SpendingCategory>>,
    searches: ResultCache<Vec<Merchant>>,
    ttl_secs: u64,
}

impl CachedClassifier {
    pub fn new(directory: MerchantDirectory, ttl_secs: u64) -> Self {
        Self {
            directory,
            categories: ResultCache::new(),
            searches: ResultCache::new(),
            ttl_secs,
        }
    }

    pub fn from_config(directory: MerchantDirectory, config: &EngineConfig) -> Self {
        Self::new(directory, config.merchant_ttl_secs)
    }

    pub fn directory(&self) -> &MerchantDirectory {
        &self.directory
    }

    pub fn classify_at(&self, merchant: &str, now: DateTime<Utc>) -> Option<SpendingCategory> {
        let key = CacheKey::category_lookup(merchant);
        self.categories
            .get_or_compute_at(key, self.ttl_secs, now, || self.directory.suggest_category(merchant))
    }

    pub fn search_at(&self, query: &str, now: DateTime<Utc>) -> Vec<Merchant> {
        let key = CacheKey::merchant_search(query);
        self.searches.get_or_compute_at(key, self.ttl_secs, now, || {
            self.directory.search(query).into_iter().cloned().collect()
        })
    }

    pub fn search(&self, query: &str) -> Vec<Merchant> {
        self.search_at(query, Utc::now())
    }

    /// Drop expired lookups from both caches.
    pub fn clear_expired(&self, now: DateTime<Utc>) -> usize {
        self.categories.clear_expired(now) + self.searches.clear_expired(now)
    }
}

impl MerchantClassifier for CachedClassifier {
    fn classify(&self, merchant: &str) -> Option<SpendingCategory> {
        self.classify_at(merchant, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use SpendingCategory as C;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn lookups_are_cached_per_normalized_key() {
        let c = CachedClassifier::new(MerchantDirectory::builtin().unwrap(), 600);
        assert_eq!(c.classify_at("Kroger", t0()), Some(C::Grocery));
        assert_eq!(c.classify_at(" kroger ", t0()), Some(C::Grocery));
        assert_eq!(c.classify_at("nowhere in particular", t0()), None);
        assert_eq!(c.categories.len(), 2);

        assert_eq!(c.search_at("shell", t0()).len(), 1);
        assert_eq!(c.searches.len(), 1);
    }

    #[test]
    fn entries_expire_after_merchant_ttl() {
        let c = CachedClassifier::from_config(MerchantDirectory::builtin().unwrap(), &EngineConfig::default());
        c.classify_at("Kroger", t0());
        c.search_at("kro", t0());
        assert_eq!(c.clear_expired(t0() + Duration::seconds(599)), 0);
        assert_eq!(c.clear_expired(t0() + Duration::seconds(600)), 2);
    }
}
