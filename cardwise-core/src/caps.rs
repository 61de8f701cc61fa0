//! Spending cap tracker.
//!
//! A cap only exists when the winning tier from [`crate::resolve`] defines
//! one, so cap precedence follows reward precedence. Spend is summed from the
//! ledger for the wallet entry, over the cap's category pool, since the start
//! of the cap period in the caller's calendar.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::catalog::{CardDefinition, Catalog};
use crate::category::SpendingCategory;
use crate::ledger::Ledger;
use crate::resolve::{CapRule, ResolvedReward, resolve, reward_value};
use crate::time::{CapPeriod, Quarter};
use crate::wallet::WalletEntry;

/// Headroom snapshot for one pending purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapInfo {
    pub cap: f64,
    pub period: CapPeriod,
    pub period_start: DateTime<Utc>,
    pub spent: f64,
    pub remaining: f64,
    /// UI hint only; never blocks a recommendation.
    pub is_near_cap: bool,
}

/// Headroom left under `rule` for `entry`, before the pending `amount`.
pub fn cap_info(
    rule: &CapRule,
    entry: &WalletEntry,
    ledger: &Ledger,
    amount: f64,
    near_cap_ratio: f64,
    now: DateTime<Utc>,
    tz: Tz,
) -> CapInfo {
    let period_start = rule.period.start(now, tz);
    let spent = ledger.spend_since(&entry.id, period_start, |c| rule.pool.contains(&c));
    let remaining = (rule.amount - spent).max(0.0);
    let is_near_cap = rule.amount <= 0.0
        || remaining < amount
        || remaining < rule.amount * near_cap_ratio;

    CapInfo {
        cap: rule.amount,
        period: rule.period,
        period_start,
        spent,
        remaining,
        is_near_cap,
    }
}

/// Resolve `category` on `entry` and report the winning tier's cap, if any.
pub fn cap_info_for(
    card: &CardDefinition,
    entry: &WalletEntry,
    category: SpendingCategory,
    ledger: &Ledger,
    amount: f64,
    near_cap_ratio: f64,
    now: DateTime<Utc>,
    tz: Tz,
) -> Option<CapInfo> {
    let resolved = resolve(card, entry, category, Quarter::containing(now, tz));
    let rule = resolved.cap.as_ref()?;
    Some(cap_info(rule, entry, ledger, amount, near_cap_ratio, now, tz))
}

/// Reward for `amount`, splitting at the cap boundary.
///
/// Spend up to `remaining` earns the winning tier's rate; the rest earns the
/// card's base rate. Without a cap the whole amount earns the tier rate.
pub fn estimate_reward(
    card: &CardDefinition,
    resolved: &ResolvedReward,
    amount: f64,
    cap: Option<&CapInfo>,
    point_value_usd: f64,
) -> f64 {
    match cap {
        Some(info) if amount > info.remaining => {
            let capped = reward_value(info.remaining, resolved.multiplier, resolved.is_percentage, point_value_usd);
            let overflow = reward_value(
                amount - info.remaining,
                card.base_reward,
                card.base_is_percentage,
                point_value_usd,
            );
            capped + overflow
        }
        _ => reward_value(amount, resolved.multiplier, resolved.is_percentage, point_value_usd),
    }
}

/// Progress toward one capped bonus currently in force.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingCapProgress {
    pub id: String,
    pub wallet_entry_id: String,
    pub card_id: String,
    pub card_label: String,
    pub category_label: String,
    pub current_spend: f64,
    pub cap: f64,
    pub period: CapPeriod,
    pub is_rotating: bool,
}

impl SpendingCapProgress {
    pub const NEAR_CAP_PERCENT: f64 = 80.0;

    pub fn percentage(&self) -> f64 {
        if self.cap <= 0.0 {
            return 100.0;
        }
        (self.current_spend / self.cap * 100.0).min(100.0)
    }

    pub fn remaining(&self) -> f64 {
        (self.cap - self.current_spend).max(0.0)
    }

    pub fn is_near_cap(&self) -> bool {
        self.percentage() >= Self::NEAR_CAP_PERCENT
    }

    pub fn is_at_cap(&self) -> bool {
        self.percentage() >= 100.0
    }

    pub fn formatted_progress(&self) -> String {
        format!("${} / ${}", self.current_spend as i64, self.cap as i64)
    }
}

/// Every capped bonus in force across the wallet, fullest first.
///
/// Rotating and selected pools report combined spend across their categories.
pub fn cap_overview(
    wallet: &[WalletEntry],
    catalog: &Catalog,
    ledger: &Ledger,
    now: DateTime<Utc>,
    tz: Tz,
) -> Vec<SpendingCapProgress> {
    let mut out = Vec::new();

    for entry in wallet {
        let Some(card) = catalog.get(&entry.card_id) else { continue };
        let label = entry.label(card).to_string();

        let mut push = |id: String, category_label: String, pool: &[SpendingCategory], cap: f64, period: CapPeriod, is_rotating: bool| {
            let since = period.start(now, tz);
            out.push(SpendingCapProgress {
                id,
                wallet_entry_id: entry.id.clone(),
                card_id: card.id.clone(),
                card_label: label.clone(),
                category_label,
                current_spend: ledger.spend_since(&entry.id, since, |c| pool.contains(&c)),
                cap,
                period,
                is_rotating,
            });
        };

        for r in &card.category_rewards {
            if let (Some(cap), Some(period)) = (r.cap, r.cap_period) {
                push(
                    format!("{}-{}", entry.id, r.category.as_str()),
                    r.category.display_name().to_string(),
                    &[r.category],
                    cap,
                    period,
                    false,
                );
            }
        }

        let quarter = Quarter::containing(now, tz);
        if let Some(set) = card.rotating_for(quarter) {
            if let Some(cap) = set.cap {
                push(
                    format!("{}-rotating-Q{}", entry.id, quarter.quarter),
                    format!("Q{} Rotating ({})", quarter.quarter, join_names(&set.categories)),
                    &set.categories,
                    cap,
                    CapPeriod::Quarterly,
                    true,
                );
            }
        }

        if let Some(cfg) = &card.selectable_config {
            if let (Some(cap), Some(period)) = (cfg.cap, cfg.cap_period) {
                if !entry.selected_categories.is_empty() {
                    push(
                        format!("{}-selectable", entry.id),
                        format!("Selected ({})", join_names(&entry.selected_categories)),
                        &entry.selected_categories,
                        cap,
                        period,
                        false,
                    );
                }
            }
        }
    }

    out.sort_by(|a, b| b.percentage().total_cmp(&a.percentage()));
    out
}

fn join_names(categories: &[SpendingCategory]) -> String {
    categories
        .iter()
        .map(|c| c.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CardNetwork, CategoryReward, RewardType, RotatingCategorySet, SelectableConfig};
    use crate::ledger::TransactionDraft;
    use chrono::TimeZone;
    use SpendingCategory as C;

    const TZ: Tz = chrono_tz::UTC;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 15, 12, 0, 0).unwrap()
    }

    fn spend(id: &str, entry: &str, cat: SpendingCategory, amount: f64, ts: DateTime<Utc>) -> crate::ledger::TransactionRecord {
        TransactionDraft::new(id, amount, "m", cat, entry, ts).into_record(0.0, None, None)
    }

    fn grocery_card() -> CardDefinition {
        CardDefinition::new("bcp", "Blue Cash Preferred", "Amex", CardNetwork::Amex, RewardType::Cashback, 1.0, true)
            .with_category_reward(CategoryReward::new(C::Grocery, 6.0, true).with_cap(6000.0, CapPeriod::Yearly))
            .with_category_reward(CategoryReward::new(C::Streaming, 6.0, true))
    }

    #[test]
    fn split_rate_at_cap_boundary() {
        // Cap $100 with $80 already spent; a $50 purchase earns 5% on $20 and 1% on $30.
        let card = CardDefinition::new("c", "C", "T", CardNetwork::Visa, RewardType::Cashback, 1.0, true)
            .with_category_reward(CategoryReward::new(C::Gas, 5.0, true).with_cap(100.0, CapPeriod::Monthly));
        let entry = WalletEntry::new("w1", "c", now());
        let ledger = Ledger::from_records(vec![spend("t1", "w1", C::Gas, 80.0, now())]);

        let resolved = resolve(&card, &entry, C::Gas, Quarter::containing(now(), TZ));
        let info = cap_info(resolved.cap.as_ref().unwrap(), &entry, &ledger, 50.0, 0.2, now(), TZ);
        assert_eq!(info.remaining, 20.0);
        assert!(info.is_near_cap);

        let reward = estimate_reward(&card, &resolved, 50.0, Some(&info), 0.01);
        let expected = 20.0 * 0.05 + 30.0 * 0.01;
        assert!((reward - expected).abs() < 1e-9, "got {reward}");
        assert!((reward - 50.0 * 0.05).abs() > 1e-6);
    }

    #[test]
    fn exhausted_cap_earns_base_on_everything() {
        let card = grocery_card();
        let entry = WalletEntry::new("w1", "bcp", now());
        let ledger = Ledger::from_records(vec![spend("t1", "w1", C::Grocery, 6500.0, now())]);
        let resolved = resolve(&card, &entry, C::Grocery, Quarter::containing(now(), TZ));
        let info = cap_info(resolved.cap.as_ref().unwrap(), &entry, &ledger, 100.0, 0.2, now(), TZ);
        assert_eq!(info.remaining, 0.0);
        let reward = estimate_reward(&card, &resolved, 100.0, Some(&info), 0.01);
        assert!((reward - 1.0).abs() < 1e-9);
    }

    #[test]
    fn no_cap_means_full_tier_rate() {
        let card = grocery_card();
        let entry = WalletEntry::new("w1", "bcp", now());
        let ledger = Ledger::new();
        assert!(cap_info_for(&card, &entry, C::Streaming, &ledger, 500.0, 0.2, now(), TZ).is_none());
        let resolved = resolve(&card, &entry, C::Streaming, Quarter::containing(now(), TZ));
        assert!((estimate_reward(&card, &resolved, 500.0, None, 0.01) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn only_current_period_entry_and_pool_count() {
        let card = grocery_card();
        let entry = WalletEntry::new("w1", "bcp", now());
        let ledger = Ledger::from_records(vec![
            spend("old", "w1", C::Grocery, 3000.0, Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap()),
            spend("t1", "w1", C::Grocery, 1000.0, Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap()),
            spend("t2", "w1", C::Dining, 500.0, now()),
            spend("t3", "w2", C::Grocery, 900.0, now()),
        ]);
        let info = cap_info_for(&card, &entry, C::Grocery, &ledger, 10.0, 0.2, now(), TZ).unwrap();
        assert_eq!(info.spent, 1000.0);
        assert_eq!(info.remaining, 5000.0);
        assert!(!info.is_near_cap);
        assert_eq!(info.period_start, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn near_cap_below_twenty_percent_headroom() {
        let card = grocery_card();
        let entry = WalletEntry::new("w1", "bcp", now());
        let ledger = Ledger::from_records(vec![spend("t1", "w1", C::Grocery, 4900.0, now())]);
        // $1,100 left of $6,000 is under 20%, even for a small purchase.
        let info = cap_info_for(&card, &entry, C::Grocery, &ledger, 10.0, 0.2, now(), TZ).unwrap();
        assert!(info.is_near_cap);
    }

    #[test]
    fn rotating_pool_sums_the_whole_set() {
        let card = CardDefinition::new("disc", "Discover it", "Discover", CardNetwork::Discover, RewardType::Cashback, 1.0, true)
            .with_rotating(RotatingCategorySet {
                quarter: 1,
                year: 2025,
                categories: vec![C::Grocery, C::Fitness],
                multiplier: 5.0,
                is_percentage: true,
                cap: Some(1500.0),
                activation_required: true,
            });
        let entry = WalletEntry::new("w1", "disc", now());
        let ledger = Ledger::from_records(vec![
            spend("t1", "w1", C::Grocery, 1000.0, now()),
            spend("t2", "w1", C::Fitness, 400.0, now()),
        ]);
        let info = cap_info_for(&card, &entry, C::Grocery, &ledger, 50.0, 0.2, now(), TZ).unwrap();
        assert_eq!(info.period, CapPeriod::Quarterly);
        assert_eq!(info.remaining, 100.0);
    }

    #[test]
    fn overview_lists_fixed_rotating_and_selected_caps() {
        let card = grocery_card()
            .with_rotating(RotatingCategorySet {
                quarter: 1,
                year: 2025,
                categories: vec![C::Gas],
                multiplier: 5.0,
                is_percentage: true,
                cap: Some(1000.0),
                activation_required: false,
            })
            .with_selectable(SelectableConfig {
                max_selections: 2,
                available_categories: vec![C::Dining, C::Travel],
                multiplier: 3.0,
                is_percentage: true,
                cap: Some(500.0),
                cap_period: Some(CapPeriod::Monthly),
            });
        let catalog = Catalog::new(vec![card]);
        let wallet = vec![
            WalletEntry::new("w1", "bcp", now())
                .with_nickname("Groceries")
                .with_selected(vec![C::Dining, C::Travel]),
            WalletEntry::new("ghost", "missing-card", now()),
        ];
        let ledger = Ledger::from_records(vec![
            spend("t1", "w1", C::Dining, 300.0, now()),
            spend("t2", "w1", C::Travel, 150.0, now()),
            spend("t3", "w1", C::Grocery, 600.0, now()),
        ]);

        let overview = cap_overview(&wallet, &catalog, &ledger, now(), TZ);
        let ids: Vec<_> = overview.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["w1-selectable", "w1-grocery", "w1-rotating-Q1"]);

        let selected = &overview[0];
        assert_eq!(selected.current_spend, 450.0);
        assert_eq!(selected.percentage(), 90.0);
        assert!(selected.is_near_cap());
        assert!(!selected.is_at_cap());
        assert_eq!(selected.card_label, "Groceries");
        assert_eq!(selected.category_label, "Selected (Dining, Travel)");
        assert_eq!(overview[2].category_label, "Q1 Rotating (Gas)");
        assert_eq!(overview[1].formatted_progress(), "$600 / $6000");
    }
}
