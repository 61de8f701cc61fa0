//! Card catalog: immutable reward rules per card, as supplied by the catalog provider.

use std::collections::HashSet;
use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::category::SpendingCategory;
use crate::time::{CapPeriod, Quarter};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Amex,
    Discover,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RewardType {
    Cashback,
    Points,
    Miles,
}

impl RewardType {
    pub fn display_name(&self) -> &'static str {
        match self {
            RewardType::Cashback => "Cash Back",
            RewardType::Points => "Points",
            RewardType::Miles => "Miles",
        }
    }
}

/// "3%" / "3x", keeping one decimal for fractional rates ("1.5%").
pub fn format_multiplier(multiplier: f64, is_percentage: bool) -> String {
    let suffix = if is_percentage { "%" } else { "x" };
    if multiplier.fract().abs() < 1e-9 {
        format!("{}{}", multiplier as i64, suffix)
    } else {
        format!("{:.1}{}", multiplier, suffix)
    }
}

/// Always-on bonus rate for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReward {
    pub category: SpendingCategory,
    pub multiplier: f64,
    pub is_percentage: bool,
    #[serde(default)]
    pub cap: Option<f64>,
    #[serde(default)]
    pub cap_period: Option<CapPeriod>,
}

impl CategoryReward {
    pub fn new(category: SpendingCategory, multiplier: f64, is_percentage: bool) -> Self {
        Self {
            category,
            multiplier,
            is_percentage,
            cap: None,
            cap_period: None,
        }
    }

    pub fn with_cap(mut self, cap: f64, period: CapPeriod) -> Self {
        self.cap = Some(cap);
        self.cap_period = Some(period);
        self
    }

    pub fn display_multiplier(&self) -> String {
        format_multiplier(self.multiplier, self.is_percentage)
    }
}

/// Bonus categories active for one specific (quarter, year).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RotatingCategorySet {
    pub quarter: u32,
    pub year: i32,
    pub categories: Vec<SpendingCategory>,
    pub multiplier: f64,
    pub is_percentage: bool,
    #[serde(default)]
    pub cap: Option<f64>,
    #[serde(default)]
    pub activation_required: bool,
}

impl RotatingCategorySet {
    pub fn period(&self) -> Quarter {
        Quarter::new(self.year, self.quarter)
    }

    pub fn display_multiplier(&self) -> String {
        format_multiplier(self.multiplier, self.is_percentage)
    }
}

/// Bonus the cardholder chooses categories for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectableConfig {
    pub max_selections: usize,
    pub available_categories: Vec<SpendingCategory>,
    pub multiplier: f64,
    pub is_percentage: bool,
    #[serde(default)]
    pub cap: Option<f64>,
    #[serde(default)]
    pub cap_period: Option<CapPeriod>,
}

impl SelectableConfig {
    pub fn is_eligible(&self, category: SpendingCategory) -> bool {
        self.available_categories.contains(&category)
    }

    pub fn display_multiplier(&self) -> String {
        format_multiplier(self.multiplier, self.is_percentage)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignUpBonusTerms {
    /// 60000 points, or $200
    pub bonus_amount: f64,
    pub bonus_type: RewardType,
    pub spend_requirement: f64,
    pub timeframe_days: i64,
    pub description: String,
}

/// Longest sign-up bonus window accepted as plausible (ten years).
pub const MAX_BONUS_TIMEFRAME_DAYS: i64 = 3650;

impl SignUpBonusTerms {
    pub fn formatted_bonus(&self) -> String {
        match self.bonus_type {
            RewardType::Cashback => format!("${}", self.bonus_amount as i64),
            RewardType::Points => format!("{} points", self.bonus_amount as i64),
            RewardType::Miles => format!("{} miles", self.bonus_amount as i64),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardDefinition {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub network: CardNetwork,
    #[serde(default)]
    pub annual_fee: f64,
    pub reward_type: RewardType,
    /// 1.0 means 1% (or 1x)
    pub base_reward: f64,
    pub base_is_percentage: bool,
    #[serde(default)]
    pub category_rewards: Vec<CategoryReward>,
    #[serde(default)]
    pub rotating_categories: Vec<RotatingCategorySet>,
    #[serde(default)]
    pub selectable_config: Option<SelectableConfig>,
    #[serde(default)]
    pub sign_up_bonus: Option<SignUpBonusTerms>,
}

impl CardDefinition {
    /// A card with only a base rate. Builders add the rest.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        issuer: impl Into<String>,
        network: CardNetwork,
        reward_type: RewardType,
        base_reward: f64,
        base_is_percentage: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            issuer: issuer.into(),
            network,
            annual_fee: 0.0,
            reward_type,
            base_reward,
            base_is_percentage,
            category_rewards: Vec::new(),
            rotating_categories: Vec::new(),
            selectable_config: None,
            sign_up_bonus: None,
        }
    }

    pub fn with_annual_fee(mut self, fee: f64) -> Self {
        self.annual_fee = fee;
        self
    }

    pub fn with_category_reward(mut self, reward: CategoryReward) -> Self {
        self.category_rewards.push(reward);
        self
    }

    pub fn with_rotating(mut self, set: RotatingCategorySet) -> Self {
        self.rotating_categories.push(set);
        self
    }

    pub fn with_selectable(mut self, config: SelectableConfig) -> Self {
        self.selectable_config = Some(config);
        self
    }

    pub fn with_sign_up_bonus(mut self, terms: SignUpBonusTerms) -> Self {
        self.sign_up_bonus = Some(terms);
        self
    }

    /// First fixed reward for `category`. Duplicates are a data-quality issue
    /// reported by [`Catalog::validate`]; the first one wins.
    pub fn fixed_reward(&self, category: SpendingCategory) -> Option<&CategoryReward> {
        self.category_rewards.iter().find(|r| r.category == category)
    }

    /// Rotating set tagged to `quarter`, if any.
    pub fn rotating_for(&self, quarter: Quarter) -> Option<&RotatingCategorySet> {
        self.rotating_categories.iter().find(|r| r.period() == quarter)
    }

    pub fn display_base_reward(&self) -> String {
        format_multiplier(self.base_reward, self.base_is_percentage)
    }
}

/// Data-quality findings. Never fatal; the engine still uses the first match.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogIssue {
    DuplicateCardId(String),
    DuplicateFixedCategory { card_id: String, category: SpendingCategory },
    NegativeMultiplier { card_id: String, context: String },
    InvalidQuarter { card_id: String, quarter: u32 },
    SelectablePoolTooSmall { card_id: String, pool: usize, max_selections: usize },
    NonPositiveCap { card_id: String, context: String },
    BonusTimeframeOutOfRange { card_id: String, days: i64 },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::DuplicateCardId(id) => write!(f, "{id}: duplicate card id"),
            CatalogIssue::DuplicateFixedCategory { card_id, category } => {
                write!(f, "{card_id}: {} listed twice in fixed rewards", category.as_str())
            }
            CatalogIssue::NegativeMultiplier { card_id, context } => {
                write!(f, "{card_id}: negative multiplier ({context})")
            }
            CatalogIssue::InvalidQuarter { card_id, quarter } => {
                write!(f, "{card_id}: rotating quarter {quarter} outside 1..=4")
            }
            CatalogIssue::SelectablePoolTooSmall { card_id, pool, max_selections } => write!(
                f,
                "{card_id}: selectable pool has {pool} categories but allows {max_selections}"
            ),
            CatalogIssue::NonPositiveCap { card_id, context } => {
                write!(f, "{card_id}: cap must be positive ({context})")
            }
            CatalogIssue::BonusTimeframeOutOfRange { card_id, days } => write!(
                f,
                "{card_id}: sign-up bonus window of {days} days outside 1..={MAX_BONUS_TIMEFRAME_DAYS}"
            ),
        }
    }
}

/// Read-only snapshot of every known card definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Catalog {
    cards: Vec<CardDefinition>,
}

impl Catalog {
    pub fn new(cards: Vec<CardDefinition>) -> Self {
        Self { cards }
    }

    /// Parse a JSON array of card definitions.
    pub fn from_json(json: &str) -> Result<Self> {
        let cards: Vec<CardDefinition> =
            serde_json::from_str(json).context("parse card catalog JSON")?;
        Ok(Self { cards })
    }

    pub fn get(&self, id: &str) -> Option<&CardDefinition> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn cards(&self) -> &[CardDefinition] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        let mut ids = HashSet::new();

        for card in &self.cards {
            let id = &card.id;
            if !ids.insert(id.as_str()) {
                issues.push(CatalogIssue::DuplicateCardId(id.clone()));
            }
            if card.base_reward < 0.0 {
                issues.push(CatalogIssue::NegativeMultiplier {
                    card_id: id.clone(),
                    context: "base".into(),
                });
            }

            let mut seen = HashSet::new();
            for r in &card.category_rewards {
                if !seen.insert(r.category) {
                    issues.push(CatalogIssue::DuplicateFixedCategory {
                        card_id: id.clone(),
                        category: r.category,
                    });
                }
                if r.multiplier < 0.0 {
                    issues.push(CatalogIssue::NegativeMultiplier {
                        card_id: id.clone(),
                        context: r.category.as_str().into(),
                    });
                }
                if r.cap.is_some_and(|c| c <= 0.0) {
                    issues.push(CatalogIssue::NonPositiveCap {
                        card_id: id.clone(),
                        context: r.category.as_str().into(),
                    });
                }
            }

            for set in &card.rotating_categories {
                if !(1..=4).contains(&set.quarter) {
                    issues.push(CatalogIssue::InvalidQuarter {
                        card_id: id.clone(),
                        quarter: set.quarter,
                    });
                }
                if set.multiplier < 0.0 {
                    issues.push(CatalogIssue::NegativeMultiplier {
                        card_id: id.clone(),
                        context: set.period().label(),
                    });
                }
                if set.cap.is_some_and(|c| c <= 0.0) {
                    issues.push(CatalogIssue::NonPositiveCap {
                        card_id: id.clone(),
                        context: set.period().label(),
                    });
                }
            }

            if let Some(terms) = &card.sign_up_bonus {
                if !(1..=MAX_BONUS_TIMEFRAME_DAYS).contains(&terms.timeframe_days) {
                    issues.push(CatalogIssue::BonusTimeframeOutOfRange {
                        card_id: id.clone(),
                        days: terms.timeframe_days,
                    });
                }
            }

            if let Some(cfg) = &card.selectable_config {
                if cfg.available_categories.len() < cfg.max_selections {
                    issues.push(CatalogIssue::SelectablePoolTooSmall {
                        card_id: id.clone(),
                        pool: cfg.available_categories.len(),
                        max_selections: cfg.max_selections,
                    });
                }
                if cfg.multiplier < 0.0 {
                    issues.push(CatalogIssue::NegativeMultiplier {
                        card_id: id.clone(),
                        context: "selectable".into(),
                    });
                }
                if cfg.cap.is_some_and(|c| c <= 0.0) {
                    issues.push(CatalogIssue::NonPositiveCap {
                        card_id: id.clone(),
                        context: "selectable".into(),
                    });
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SpendingCategory as C;

    fn freedom() -> CardDefinition {
        CardDefinition::new("freedom-flex", "Freedom Flex", "Chase", CardNetwork::Mastercard, RewardType::Cashback, 1.0, true)
            .with_category_reward(CategoryReward::new(C::Dining, 3.0, true))
            .with_category_reward(CategoryReward::new(C::Drugstore, 3.0, true))
            .with_rotating(RotatingCategorySet {
                quarter: 1,
                year: 2025,
                categories: vec![C::Grocery, C::Fitness],
                multiplier: 5.0,
                is_percentage: true,
                cap: Some(1500.0),
                activation_required: true,
            })
    }

    #[test]
    fn multiplier_formatting() {
        assert_eq!(format_multiplier(3.0, true), "3%");
        assert_eq!(format_multiplier(2.0, false), "2x");
        assert_eq!(format_multiplier(1.5, true), "1.5%");
    }

    #[test]
    fn lookup_helpers() {
        let card = freedom();
        assert_eq!(card.fixed_reward(C::Dining).map(|r| r.multiplier), Some(3.0));
        assert!(card.fixed_reward(C::Gas).is_none());
        assert!(card.rotating_for(Quarter::new(2025, 1)).is_some());
        assert!(card.rotating_for(Quarter::new(2025, 2)).is_none());
        assert!(card.rotating_for(Quarter::new(2024, 1)).is_none());
    }

    #[test]
    fn catalog_parses_camel_case_json() {
        let json = r#"[{
            "id": "csp",
            "name": "Sapphire Preferred",
            "issuer": "Chase",
            "network": "visa",
            "annualFee": 95,
            "rewardType": "points",
            "baseReward": 1,
            "baseIsPercentage": false,
            "categoryRewards": [
                {"category": "dining", "multiplier": 3, "isPercentage": false},
                {"category": "grocery", "multiplier": 3, "isPercentage": false, "cap": 6000, "capPeriod": "yearly"}
            ],
            "signUpBonus": {
                "bonusAmount": 60000,
                "bonusType": "points",
                "spendRequirement": 4000,
                "timeframeDays": 90,
                "description": "60,000 points after $4,000 in 3 months"
            }
        }]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let card = catalog.get("csp").unwrap();
        assert_eq!(card.annual_fee, 95.0);
        assert!(card.rotating_categories.is_empty());
        let grocery = card.fixed_reward(C::Grocery).unwrap();
        assert_eq!(grocery.cap, Some(6000.0));
        assert_eq!(grocery.cap_period, Some(CapPeriod::Yearly));
        assert_eq!(card.sign_up_bonus.as_ref().unwrap().formatted_bonus(), "60000 points");
        assert!(catalog.validate().is_empty());
    }

    #[test]
    fn catalog_rejects_malformed_json() {
        let err = Catalog::from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("parse card catalog JSON"));
    }

    #[test]
    fn validate_reports_data_quality_issues() {
        let bad = freedom()
            .with_category_reward(CategoryReward::new(C::Dining, 4.0, true))
            .with_rotating(RotatingCategorySet {
                quarter: 5,
                year: 2025,
                categories: vec![C::Gas],
                multiplier: -1.0,
                is_percentage: true,
                cap: Some(0.0),
                activation_required: false,
            })
            .with_selectable(SelectableConfig {
                max_selections: 3,
                available_categories: vec![C::Gas],
                multiplier: 3.0,
                is_percentage: true,
                cap: None,
                cap_period: None,
            });
        let catalog = Catalog::new(vec![bad, freedom()]);
        let issues = catalog.validate();

        assert!(issues.contains(&CatalogIssue::DuplicateCardId("freedom-flex".into())));
        assert!(issues.contains(&CatalogIssue::DuplicateFixedCategory {
            card_id: "freedom-flex".into(),
            category: C::Dining,
        }));
        assert!(issues.contains(&CatalogIssue::InvalidQuarter { card_id: "freedom-flex".into(), quarter: 5 }));
        assert!(issues.iter().any(|i| matches!(i, CatalogIssue::NegativeMultiplier { .. })));
        assert!(issues.iter().any(|i| matches!(i, CatalogIssue::NonPositiveCap { .. })));
        assert!(issues.iter().any(|i| matches!(i, CatalogIssue::SelectablePoolTooSmall { pool: 1, .. })));
        // The engine still resolves the first fixed entry.
        assert_eq!(catalog.cards()[0].fixed_reward(C::Dining).unwrap().multiplier, 3.0);
    }

    #[test]
    fn validate_flags_bonus_windows_outside_range() {
        let with_window = |id: &str, days: i64| {
            CardDefinition::new(id, "Bonus Card", "Chase", CardNetwork::Visa, RewardType::Points, 1.0, false)
                .with_sign_up_bonus(SignUpBonusTerms {
                    bonus_amount: 60000.0,
                    bonus_type: RewardType::Points,
                    spend_requirement: 4000.0,
                    timeframe_days: days,
                    description: "60k points".into(),
                })
        };
        let catalog = Catalog::new(vec![
            with_window("ok", 90),
            with_window("zero", 0),
            with_window("huge", 1_000_000_000_000_000),
        ]);
        assert_eq!(
            catalog.validate(),
            vec![
                CatalogIssue::BonusTimeframeOutOfRange { card_id: "zero".into(), days: 0 },
                CatalogIssue::BonusTimeframeOutOfRange {
                    card_id: "huge".into(),
                    days: 1_000_000_000_000_000,
                },
            ]
        );
    }
}
