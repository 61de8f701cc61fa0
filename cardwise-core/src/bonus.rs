//! Sign-up bonus progress.
//!
//! Read-only: `is_achieved` is computed fresh on every call and never written
//! back to the wallet entry. Flipping `sign_up_bonus_achieved` is the wallet
//! store's call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CardDefinition;
use crate::ledger::Ledger;
use crate::time::whole_days_until;
use crate::wallet::WalletEntry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpBonusProgress {
    pub spent_so_far: f64,
    pub requirement: f64,
    pub days_remaining: i64,
    pub is_achieved: bool,
}

impl SignUpBonusProgress {
    pub fn percent_complete(&self) -> f64 {
        if self.requirement <= 0.0 {
            return 100.0;
        }
        (self.spent_so_far / self.requirement * 100.0).min(100.0)
    }

    pub fn amount_remaining(&self) -> f64 {
        (self.requirement - self.spent_so_far).max(0.0)
    }

    /// Still worth steering spend toward: not met and the window is open.
    pub fn is_in_progress(&self) -> bool {
        !self.is_achieved && self.days_remaining > 0
    }

    pub fn formatted_progress(&self) -> String {
        format!("${} / ${}", self.spent_so_far as i64, self.requirement as i64)
    }
}

/// `None` when the card has no bonus, tracking never started, or the entry is
/// already marked achieved. All spend on the entry since the start counts,
/// whatever its category.
pub fn progress(
    card: &CardDefinition,
    entry: &WalletEntry,
    ledger: &Ledger,
    now: DateTime<Utc>,
) -> Option<SignUpBonusProgress> {
    let terms = card.sign_up_bonus.as_ref()?;
    let start = entry.sign_up_bonus_start?;
    if entry.sign_up_bonus_achieved {
        return None;
    }

    let spent_so_far = ledger.spend_since(&entry.id, start, |_| true);
    let deadline = entry.sign_up_bonus_deadline(card)?;

    Some(SignUpBonusProgress {
        spent_so_far,
        requirement: terms.spend_requirement,
        days_remaining: whole_days_until(now, deadline),
        is_achieved: spent_so_far >= terms.spend_requirement,
    })
}
