//! Wallet entries: a user's personalized instance of a catalog card.
//!
//! Storage and create/update/delete belong to the wallet store; this module
//! only carries the data plus the checks a store should run on user edits.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::catalog::{CardDefinition, Catalog, RotatingCategorySet};
use crate::category::SpendingCategory;
use crate::error::{EngineError, Result};
use crate::time::Quarter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletEntry {
    pub id: String,
    /// Weak reference into the catalog.
    pub card_id: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub selected_categories: Vec<SpendingCategory>,
    #[serde(default)]
    pub credit_limit: Option<f64>,
    #[serde(default)]
    pub current_balance: Option<f64>,
    #[serde(default)]
    pub sign_up_bonus_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sign_up_bonus_achieved: bool,
    /// Rotating quarters the user has activated with the issuer.
    #[serde(default)]
    pub activated_quarters: BTreeSet<Quarter>,
    pub created_at: DateTime<Utc>,
}

impl WalletEntry {
    pub fn new(id: impl Into<String>, card_id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            card_id: card_id.into(),
            nickname: None,
            selected_categories: Vec::new(),
            credit_limit: None,
            current_balance: None,
            sign_up_bonus_start: None,
            sign_up_bonus_achieved: false,
            activated_quarters: BTreeSet::new(),
            created_at,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_credit_limit(mut self, limit: f64) -> Self {
        self.credit_limit = Some(limit);
        self
    }

    pub fn with_balance(mut self, balance: f64) -> Self {
        self.current_balance = Some(balance);
        self
    }

    /// Start tracking the sign-up bonus from `start`.
    pub fn tracking_bonus_from(mut self, start: DateTime<Utc>) -> Self {
        self.sign_up_bonus_start = Some(start);
        self
    }

    /// Set selections without checking them against a card. Prefer
    /// [`WalletEntry::select_categories`] for user input.
    pub fn with_selected(mut self, categories: Vec<SpendingCategory>) -> Self {
        self.selected_categories = categories;
        self
    }

    /// Replace the chosen bonus categories, enforcing the card's pool and limit.
    pub fn select_categories(
        &mut self,
        card: &CardDefinition,
        categories: Vec<SpendingCategory>,
    ) -> Result<()> {
        let config = card
            .selectable_config
            .as_ref()
            .ok_or_else(|| EngineError::NoSelectableConfig(card.id.clone()))?;

        let mut unique: Vec<SpendingCategory> = Vec::with_capacity(categories.len());
        for c in categories {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }

        if unique.len() > config.max_selections {
            return Err(EngineError::TooManySelections {
                got: unique.len(),
                max: config.max_selections,
            });
        }
        if let Some(bad) = unique.iter().find(|c| !config.is_eligible(**c)) {
            return Err(EngineError::NotSelectable(*bad));
        }

        self.selected_categories = unique;
        Ok(())
    }

    pub fn is_selected(&self, category: SpendingCategory) -> bool {
        self.selected_categories.contains(&category)
    }

    pub fn activate_quarter(&mut self, quarter: Quarter) {
        self.activated_quarters.insert(quarter);
    }

    pub fn is_quarter_activated(&self, quarter: Quarter) -> bool {
        self.activated_quarters.contains(&quarter)
    }

    /// Display name: nickname if set, else the card's name.
    pub fn label<'a>(&'a self, card: &'a CardDefinition) -> &'a str {
        self.nickname.as_deref().unwrap_or(&card.name)
    }

    /// Balance as a percentage of the credit limit.
    pub fn utilization(&self) -> Option<f64> {
        let (limit, balance) = (self.credit_limit?, self.current_balance?);
        if limit <= 0.0 {
            return None;
        }
        Some(balance / limit * 100.0)
    }

    pub fn is_tracking_sign_up_bonus(&self) -> bool {
        self.sign_up_bonus_start.is_some() && !self.sign_up_bonus_achieved
    }

    /// `None` without terms or a start, or when the window overflows the
    /// calendar.
    pub fn sign_up_bonus_deadline(&self, card: &CardDefinition) -> Option<DateTime<Utc>> {
        let start = self.sign_up_bonus_start?;
        let terms = card.sign_up_bonus.as_ref()?;
        start.checked_add_signed(TimeDelta::try_days(terms.timeframe_days)?)
    }
}

/// Combined utilization across entries that carry both a limit and a balance.
pub fn total_credit_utilization(entries: &[WalletEntry]) -> Option<f64> {
    let (limit, balance) = entries
        .iter()
        .filter_map(|e| Some((e.credit_limit?, e.current_balance?)))
        .fold((0.0, 0.0), |(l, b), (el, eb)| (l + el, b + eb));
    if limit <= 0.0 {
        return None;
    }
    Some(balance / limit * 100.0)
}

/// A rotating set in force this quarter that the user has not activated yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingActivation<'a> {
    pub entry: &'a WalletEntry,
    pub card: &'a CardDefinition,
    pub set: &'a RotatingCategorySet,
}

pub fn pending_activations<'a>(
    entries: &'a [WalletEntry],
    catalog: &'a Catalog,
    now: DateTime<Utc>,
    tz: Tz,
) -> Vec<PendingActivation<'a>> {
    let quarter = Quarter::containing(now, tz);
    entries
        .iter()
        .filter_map(|entry| {
            let card = catalog.get(&entry.card_id)?;
            let set = card.rotating_for(quarter)?;
            (set.activation_required && !entry.is_quarter_activated(quarter))
                .then_some(PendingActivation { entry, card, set })
        })
        .collect()
}
