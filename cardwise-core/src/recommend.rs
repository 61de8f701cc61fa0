//! Recommendation engine.
//!
//! Ties resolution, cap headroom and bonus progress together for every card
//! in the wallet and ranks the result. The engine is pure over the snapshots
//! it is handed; the only shared mutable state is the injected result cache.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bonus::{self, SignUpBonusProgress};
use crate::cache::{CacheKey, ResultCache};
use crate::catalog::{CardDefinition, Catalog, format_multiplier};
use crate::caps::{CapInfo, cap_info, estimate_reward};
use crate::category::SpendingCategory;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result, ensure_amount};
use crate::ledger::{Ledger, TransactionDraft, TransactionRecord};
use crate::resolve::{RewardTier, resolve};
use crate::time::Quarter;
use crate::wallet::WalletEntry;

/// Maps a free-text merchant to a category. `None` means "don't know".
pub trait MerchantClassifier {
    fn classify(&self, merchant: &str) -> Option<SpendingCategory>;
}

impl<F> MerchantClassifier for F
where
    F: Fn(&str) -> Option<SpendingCategory>,
{
    fn classify(&self, merchant: &str) -> Option<SpendingCategory> {
        self(merchant)
    }
}

/// One ranked candidate card for a purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub wallet_entry_id: String,
    pub card_id: String,
    pub card_label: String,
    pub tier: RewardTier,
    pub multiplier: f64,
    pub is_percentage: bool,
    /// Dollar value, split at the cap boundary when one applies.
    pub estimated_reward: f64,
    pub reason: String,
    pub is_rotating: bool,
    pub is_selectable: bool,
    pub needs_activation: bool,
    pub selection_foregone: bool,
    pub cap: Option<CapInfo>,
    pub bonus: Option<SignUpBonusProgress>,
}

impl Recommendation {
    pub fn has_sign_up_bonus_in_progress(&self) -> bool {
        self.bonus.as_ref().is_some_and(SignUpBonusProgress::is_in_progress)
    }

    pub fn display_multiplier(&self) -> String {
        format_multiplier(self.multiplier, self.is_percentage)
    }

    pub fn formatted_reward(&self) -> String {
        format!("${:.2}", self.estimated_reward)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MerchantRecommendation {
    pub category: SpendingCategory,
    /// False when the classifier gave up and the catch-all was used.
    pub classified: bool,
    pub recommendations: Vec<Recommendation>,
}

/// Top pool categories by historical spend for one selectable card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSuggestion {
    pub wallet_entry_id: String,
    pub categories: Vec<SpendingCategory>,
}

pub struct RecommendationEngine {
    config: EngineConfig,
    tz: Tz,
    cache: Arc<ResultCache<Vec<Recommendation>>>,
}

impl RecommendationEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let tz = config.tz()?;
        Ok(Self {
            config,
            tz,
            cache: Arc::new(ResultCache::new()),
        })
    }

    /// Share a cache between engines, or hand tests a fresh one.
    pub fn with_cache(mut self, cache: Arc<ResultCache<Vec<Recommendation>>>) -> Self {
        self.cache = cache;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn cache(&self) -> &Arc<ResultCache<Vec<Recommendation>>> {
        &self.cache
    }

    /// Rank every wallet card for a purchase of `amount` in `category`.
    ///
    /// Cards still chasing an open sign-up bonus come first, then by estimated
    /// reward, highest first. Ties keep wallet order. Entries whose card is
    /// missing from the catalog are skipped.
    pub fn recommend(
        &self,
        category: SpendingCategory,
        amount: f64,
        wallet: &[WalletEntry],
        catalog: &Catalog,
        ledger: &Ledger,
        now: DateTime<Utc>,
    ) -> Result<Vec<Recommendation>> {
        let amount = ensure_amount(amount)?;

        let mut out: Vec<Recommendation> = wallet
            .iter()
            .filter_map(|entry| match catalog.get(&entry.card_id) {
                Some(card) => Some(self.evaluate(card, entry, category, amount, ledger, now)),
                None => {
                    warn!(wallet_entry = %entry.id, card_id = %entry.card_id, "card not in catalog; skipping");
                    None
                }
            })
            .collect();

        out.sort_by(|a, b| {
            b.has_sign_up_bonus_in_progress()
                .cmp(&a.has_sign_up_bonus_in_progress())
                .then_with(|| b.estimated_reward.total_cmp(&a.estimated_reward))
        });

        debug!(
            category = category.as_str(),
            amount,
            wallet_len = wallet.len(),
            results = out.len(),
            "recommendations computed"
        );
        Ok(out)
    }

    /// [`Self::recommend`] memoized by category, whole-dollar amount and
    /// wallet size for `recommendation_ttl_secs`.
    pub fn recommend_cached(
        &self,
        category: SpendingCategory,
        amount: f64,
        wallet: &[WalletEntry],
        catalog: &Catalog,
        ledger: &Ledger,
        now: DateTime<Utc>,
    ) -> Result<Vec<Recommendation>> {
        let amount = ensure_amount(amount)?;
        let key = CacheKey::recommendation(category, amount, wallet.len())?;
        self.cache
            .try_get_or_compute_at(key, self.config.recommendation_ttl_secs, now, || {
                self.recommend(category, amount, wallet, catalog, ledger, now)
            })
    }

    /// Same as [`Self::recommend`] for an external category label.
    pub fn recommend_for_label(
        &self,
        label: &str,
        amount: f64,
        wallet: &[WalletEntry],
        catalog: &Catalog,
        ledger: &Ledger,
        now: DateTime<Utc>,
    ) -> Result<Vec<Recommendation>> {
        let category: SpendingCategory = label.parse()?;
        self.recommend(category, amount, wallet, catalog, ledger, now)
    }

    /// Classify `merchant` and recommend for the result, falling back to
    /// the catch-all category when the classifier has no answer.
    pub fn recommend_for_merchant<C: MerchantClassifier + ?Sized>(
        &self,
        classifier: &C,
        merchant: &str,
        amount: f64,
        wallet: &[WalletEntry],
        catalog: &Catalog,
        ledger: &Ledger,
        now: DateTime<Utc>,
    ) -> Result<MerchantRecommendation> {
        let found = classifier.classify(merchant);
        let category = found.unwrap_or(SpendingCategory::CATCH_ALL);
        if found.is_none() {
            debug!(merchant, "merchant not classified; using catch-all");
        }
        Ok(MerchantRecommendation {
            category,
            classified: found.is_some(),
            recommendations: self.recommend(category, amount, wallet, catalog, ledger, now)?,
        })
    }

    /// Price a purchase on the card actually used.
    ///
    /// `reward_earned` is frozen into the returned record. When another
    /// wallet card would have paid strictly more, it is named along with the
    /// difference.
    pub fn price_transaction(
        &self,
        draft: TransactionDraft,
        wallet: &[WalletEntry],
        catalog: &Catalog,
        ledger: &Ledger,
        now: DateTime<Utc>,
    ) -> Result<TransactionRecord> {
        let amount = ensure_amount(draft.amount)?;
        let entry = wallet
            .iter()
            .find(|e| e.id == draft.wallet_entry_id)
            .ok_or_else(|| EngineError::UnknownWalletEntry(draft.wallet_entry_id.clone()))?;
        let card = catalog
            .get(&entry.card_id)
            .ok_or_else(|| EngineError::UnknownCard(entry.card_id.clone()))?;

        let used = self.evaluate(card, entry, draft.category, amount, ledger, now);
        let ranked = self.recommend(draft.category, amount, wallet, catalog, ledger, now)?;
        let best = ranked
            .iter()
            .reduce(|best, r| if r.estimated_reward > best.estimated_reward { r } else { best });

        let (optimal, missed) = match best {
            Some(b) if b.wallet_entry_id != entry.id && b.estimated_reward > used.estimated_reward => (
                Some(b.wallet_entry_id.clone()),
                Some(b.estimated_reward - used.estimated_reward),
            ),
            _ => (None, None),
        };

        Ok(draft.into_record(used.estimated_reward, optimal, missed))
    }

    /// Suggest selections for every selectable card from the categories the
    /// user has spent the most on across the whole ledger.
    pub fn suggest_selections(
        &self,
        wallet: &[WalletEntry],
        catalog: &Catalog,
        ledger: &Ledger,
    ) -> Vec<SelectionSuggestion> {
        let by_category = ledger.spend_by_category();
        wallet
            .iter()
            .filter_map(|entry| {
                let cfg = catalog.get(&entry.card_id)?.selectable_config.as_ref()?;
                let categories: Vec<SpendingCategory> = by_category
                    .iter()
                    .filter(|(c, spent)| *spent > 0.0 && cfg.is_eligible(*c))
                    .take(cfg.max_selections)
                    .map(|(c, _)| *c)
                    .collect();
                (!categories.is_empty()).then(|| SelectionSuggestion {
                    wallet_entry_id: entry.id.clone(),
                    categories,
                })
            })
            .collect()
    }

    fn evaluate(
        &self,
        card: &CardDefinition,
        entry: &WalletEntry,
        category: SpendingCategory,
        amount: f64,
        ledger: &Ledger,
        now: DateTime<Utc>,
    ) -> Recommendation {
        let resolved = resolve(card, entry, category, Quarter::containing(now, self.tz));
        let cap = resolved
            .cap
            .as_ref()
            .map(|rule| cap_info(rule, entry, ledger, amount, self.config.near_cap_ratio, now, self.tz));
        let estimated_reward = estimate_reward(card, &resolved, amount, cap.as_ref(), self.config.point_value_usd);

        Recommendation {
            wallet_entry_id: entry.id.clone(),
            card_id: card.id.clone(),
            card_label: entry.label(card).to_string(),
            tier: resolved.tier,
            multiplier: resolved.multiplier,
            is_percentage: resolved.is_percentage,
            estimated_reward,
            reason: resolved.reason,
            is_rotating: resolved.is_rotating,
            is_selectable: resolved.is_selectable,
            needs_activation: resolved.needs_activation,
            selection_foregone: resolved.selection_foregone,
            cap,
            bonus: bonus::progress(card, entry, ledger, now),
        }
    }
}
