//! Reward resolution: which rate applies to a category on one wallet entry.
//!
//! Tiers are evaluated in [`RewardTier::ORDER`] and the first one that
//! applies wins, regardless of the numeric rate a later tier would give.
//! Fixed rewards are unconditional; rotating and selectable bonuses depend on
//! the calendar or on user choices, so they only get a say when no fixed
//! reward exists for the category.

use serde::{Deserialize, Serialize};

use crate::catalog::CardDefinition;
use crate::category::SpendingCategory;
use crate::time::{CapPeriod, Quarter};
use crate::wallet::WalletEntry;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RewardTier {
    Fixed,
    Rotating,
    Selectable,
    Base,
}

/// Inputs every tier sees.
#[derive(Debug, Clone, Copy)]
pub struct TierContext<'a> {
    pub card: &'a CardDefinition,
    pub entry: &'a WalletEntry,
    pub category: SpendingCategory,
    /// Current quarter in the caller's calendar.
    pub quarter: Quarter,
}

/// Spend limit attached to the winning tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapRule {
    pub amount: f64,
    pub period: CapPeriod,
    /// Categories whose spend counts against the cap.
    pub pool: Vec<SpendingCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedReward {
    pub tier: RewardTier,
    pub multiplier: f64,
    pub is_percentage: bool,
    pub reason: String,
    pub is_rotating: bool,
    pub is_selectable: bool,
    pub needs_activation: bool,
    /// Eligible for the selectable bonus but not chosen; the base rate applies.
    pub selection_foregone: bool,
    pub cap: Option<CapRule>,
}

impl RewardTier {
    /// Evaluation order. Earlier tiers strictly dominate later ones.
    pub const ORDER: [RewardTier; 4] = [
        RewardTier::Fixed,
        RewardTier::Rotating,
        RewardTier::Selectable,
        RewardTier::Base,
    ];

    /// `None` when this tier does not apply.
    pub fn evaluate(self, ctx: &TierContext<'_>) -> Option<ResolvedReward> {
        match self {
            RewardTier::Fixed => fixed(ctx),
            RewardTier::Rotating => rotating(ctx),
            RewardTier::Selectable => selectable(ctx),
            RewardTier::Base => Some(base(ctx.card, "Base reward".to_string())),
        }
    }
}

/// Resolve the applicable rate for `category` on `entry`.
pub fn resolve(
    card: &CardDefinition,
    entry: &WalletEntry,
    category: SpendingCategory,
    quarter: Quarter,
) -> ResolvedReward {
    let ctx = TierContext {
        card,
        entry,
        category,
        quarter,
    };
    RewardTier::ORDER
        .iter()
        .find_map(|tier| tier.evaluate(&ctx))
        .unwrap_or_else(|| base(card, "Base reward".to_string()))
}

fn fixed(ctx: &TierContext<'_>) -> Option<ResolvedReward> {
    let r = ctx.card.fixed_reward(ctx.category)?;
    let cap = match (r.cap, r.cap_period) {
        (Some(amount), Some(period)) => Some(CapRule {
            amount,
            period,
            pool: vec![ctx.category],
        }),
        _ => None,
    };
    Some(ResolvedReward {
        tier: RewardTier::Fixed,
        multiplier: r.multiplier,
        is_percentage: r.is_percentage,
        reason: format!("{} on {}", r.display_multiplier(), ctx.category.display_name()),
        is_rotating: false,
        is_selectable: false,
        needs_activation: false,
        selection_foregone: false,
        cap,
    })
}

fn rotating(ctx: &TierContext<'_>) -> Option<ResolvedReward> {
    let set = ctx.card.rotating_for(ctx.quarter)?;
    if !set.categories.contains(&ctx.category) {
        return None;
    }
    Some(ResolvedReward {
        tier: RewardTier::Rotating,
        multiplier: set.multiplier,
        is_percentage: set.is_percentage,
        reason: format!("{} Q{} rotating category", set.display_multiplier(), set.quarter),
        is_rotating: true,
        is_selectable: false,
        needs_activation: set.activation_required && !ctx.entry.is_quarter_activated(ctx.quarter),
        selection_foregone: false,
        cap: set.cap.map(|amount| CapRule {
            amount,
            period: CapPeriod::Quarterly,
            pool: set.categories.clone(),
        }),
    })
}

fn selectable(ctx: &TierContext<'_>) -> Option<ResolvedReward> {
    let cfg = ctx.card.selectable_config.as_ref()?;

    if ctx.entry.is_selected(ctx.category) {
        let cap = match (cfg.cap, cfg.cap_period) {
            (Some(amount), Some(period)) => Some(CapRule {
                amount,
                period,
                pool: vec![ctx.category],
            }),
            _ => None,
        };
        return Some(ResolvedReward {
            tier: RewardTier::Selectable,
            multiplier: cfg.multiplier,
            is_percentage: cfg.is_percentage,
            reason: format!("{} selected category", cfg.display_multiplier()),
            is_rotating: false,
            is_selectable: true,
            needs_activation: false,
            selection_foregone: false,
            cap,
        });
    }

    if cfg.is_eligible(ctx.category) {
        let mut r = base(
            ctx.card,
            format!(
                "Base reward (can select {} for {})",
                ctx.category.display_name(),
                cfg.display_multiplier()
            ),
        );
        r.tier = RewardTier::Selectable;
        r.is_selectable = true;
        r.selection_foregone = true;
        return Some(r);
    }

    None
}

fn base(card: &CardDefinition, reason: String) -> ResolvedReward {
    ResolvedReward {
        tier: RewardTier::Base,
        multiplier: card.base_reward,
        is_percentage: card.base_is_percentage,
        reason,
        is_rotating: false,
        is_selectable: false,
        needs_activation: false,
        selection_foregone: false,
        cap: None,
    }
}

/// Dollar value of earning `multiplier` on `amount`.
///
/// Percentage rates pay `amount * rate / 100`. Points and miles are valued at
/// `point_value_usd` each, which only exists to rank them against cash back.
pub fn reward_value(amount: f64, multiplier: f64, is_percentage: bool, point_value_usd: f64) -> f64 {
    if is_percentage {
        amount * multiplier / 100.0
    } else {
        amount * multiplier * point_value_usd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CardNetwork, CategoryReward, RewardType, RotatingCategorySet, SelectableConfig};
    use chrono::{TimeZone, Utc};
    use SpendingCategory as C;

    const Q1_2025: Quarter = Quarter { year: 2025, quarter: 1 };
    const Q2_2025: Quarter = Quarter { year: 2025, quarter: 2 };

    fn entry(card_id: &str) -> WalletEntry {
        WalletEntry::new("w1", card_id, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    }

    /// Fixed 3% dining, rotating 5% dining+grocery in Q1 2025, selectable 10% dining/gas.
    fn stacked() -> CardDefinition {
        CardDefinition::new("stacked", "Stacked", "Test", CardNetwork::Visa, RewardType::Cashback, 1.0, true)
            .with_category_reward(CategoryReward::new(C::Dining, 3.0, true))
            .with_rotating(RotatingCategorySet {
                quarter: 1,
                year: 2025,
                categories: vec![C::Dining, C::Grocery],
                multiplier: 5.0,
                is_percentage: true,
                cap: Some(1500.0),
                activation_required: true,
            })
            .with_selectable(SelectableConfig {
                max_selections: 2,
                available_categories: vec![C::Dining, C::Gas, C::Grocery, C::Travel],
                multiplier: 10.0,
                is_percentage: true,
                cap: Some(2500.0),
                cap_period: Some(CapPeriod::Quarterly),
            })
    }

    #[test]
    fn order_is_fixed_rotating_selectable_base() {
        assert_eq!(
            RewardTier::ORDER,
            [RewardTier::Fixed, RewardTier::Rotating, RewardTier::Selectable, RewardTier::Base]
        );
    }

    #[test]
    fn fixed_beats_higher_selectable_and_rotating() {
        let card = stacked();
        let e = entry("stacked").with_selected(vec![C::Dining]);
        let r = resolve(&card, &e, C::Dining, Q1_2025);
        assert_eq!(r.tier, RewardTier::Fixed);
        assert_eq!(r.multiplier, 3.0);
        assert_eq!(r.reason, "3% on Dining");
        assert!(!r.is_rotating && !r.is_selectable);
        assert!(r.cap.is_none());
    }

    #[test]
    fn rotating_beats_higher_selected_category() {
        let card = stacked();
        let e = entry("stacked").with_selected(vec![C::Grocery]);
        let r = resolve(&card, &e, C::Grocery, Q1_2025);
        assert_eq!(r.tier, RewardTier::Rotating);
        assert_eq!(r.multiplier, 5.0);
        assert_eq!(r.reason, "5% Q1 rotating category");
        assert!(r.is_rotating);
        assert!(r.needs_activation);
        let cap = r.cap.unwrap();
        assert_eq!(cap.period, CapPeriod::Quarterly);
        assert_eq!(cap.pool, vec![C::Dining, C::Grocery]);
    }

    #[test]
    fn rotating_only_in_its_quarter() {
        let card = stacked();
        let e = entry("stacked");
        let r = resolve(&card, &e, C::Grocery, Q2_2025);
        assert_ne!(r.tier, RewardTier::Rotating);
        let r = resolve(&card, &e, C::Grocery, Quarter::new(2024, 1));
        assert_ne!(r.tier, RewardTier::Rotating);
    }

    #[test]
    fn activated_quarter_clears_needs_activation() {
        let card = stacked();
        let mut e = entry("stacked");
        e.activate_quarter(Q1_2025);
        let r = resolve(&card, &e, C::Grocery, Q1_2025);
        assert!(r.is_rotating);
        assert!(!r.needs_activation);
    }

    #[test]
    fn selected_category_gets_selectable_rate_and_cap() {
        let card = stacked();
        let e = entry("stacked").with_selected(vec![C::Gas]);
        let r = resolve(&card, &e, C::Gas, Q1_2025);
        assert_eq!(r.tier, RewardTier::Selectable);
        assert_eq!(r.multiplier, 10.0);
        assert_eq!(r.reason, "10% selected category");
        assert!(r.is_selectable && !r.selection_foregone);
        assert_eq!(r.cap.unwrap().amount, 2500.0);
    }

    #[test]
    fn eligible_but_unselected_falls_back_to_base_with_hint() {
        let card = stacked();
        let e = entry("stacked");
        let r = resolve(&card, &e, C::Travel, Q1_2025);
        assert_eq!(r.multiplier, 1.0);
        assert!(r.is_percentage);
        assert!(r.selection_foregone);
        assert!(r.is_selectable);
        assert_eq!(r.reason, "Base reward (can select Travel for 10%)");
        assert!(r.cap.is_none());
    }

    #[test]
    fn everything_else_is_base() {
        let card = stacked();
        let e = entry("stacked");
        let r = resolve(&card, &e, C::Streaming, Q1_2025);
        assert_eq!(r.tier, RewardTier::Base);
        assert_eq!(r.reason, "Base reward");
        assert_eq!(r.multiplier, 1.0);
    }

    #[test]
    fn fixed_cap_requires_period() {
        let card = CardDefinition::new("c", "C", "T", CardNetwork::Visa, RewardType::Cashback, 1.0, true)
            .with_category_reward(CategoryReward {
                category: C::Gas,
                multiplier: 3.0,
                is_percentage: true,
                cap: Some(1000.0),
                cap_period: None,
            });
        let r = resolve(&card, &entry("c"), C::Gas, Q1_2025);
        assert!(r.cap.is_none());
    }

    #[test]
    fn valuation_of_percentages_and_points() {
        assert!((reward_value(100.0, 3.0, true, 0.01) - 3.0).abs() < 1e-9);
        assert!((reward_value(100.0, 3.0, false, 0.01) - 3.0).abs() < 1e-9);
        assert!((reward_value(100.0, 2.0, false, 0.0125) - 2.5).abs() < 1e-9);
        assert_eq!(reward_value(0.0, 5.0, true, 0.01), 0.0);
    }
}
