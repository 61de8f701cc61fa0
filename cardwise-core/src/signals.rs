//! Notification signal projection.
//!
//! Turns wallet state into notification data. Scheduling and delivery are
//! the host app's job; the dedupe key lets it drop repeats across runs.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::bonus;
use crate::caps::{SpendingCapProgress, cap_overview};
use crate::catalog::Catalog;
use crate::config::SignalPolicy;
use crate::ledger::Ledger;
use crate::time::Quarter;
use crate::wallet::{WalletEntry, pending_activations};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SignalKind {
    CapNearLimit,
    CapReached,
    BonusDeadline,
    ActivationReminder,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSignal {
    pub kind: SignalKind,
    pub wallet_entry_id: String,
    pub title: String,
    pub body: String,
    pub dedupe_key: String,
}

/// Deterministically project wallet state into signals.
///
/// Order: activation reminders, then caps fullest first, then bonus deadlines.
pub fn project_signals(
    wallet: &[WalletEntry],
    catalog: &Catalog,
    ledger: &Ledger,
    now: DateTime<Utc>,
    tz: Tz,
    policy: &SignalPolicy,
) -> Vec<NotificationSignal> {
    let mut out = Vec::new();

    let quarter = Quarter::containing(now, tz);
    for p in pending_activations(wallet, catalog, now, tz) {
        let names: Vec<&str> = p.set.categories.iter().map(|c| c.display_name()).collect();
        out.push(NotificationSignal {
            kind: SignalKind::ActivationReminder,
            wallet_entry_id: p.entry.id.clone(),
            title: format!("Activate Q{} Categories", quarter.quarter),
            body: format!("{}: {} - Don't forget to activate!", p.entry.label(p.card), names.join(", ")),
            dedupe_key: format!("activate:{}:{}", p.entry.id, quarter.label()),
        });
    }

    for cap in cap_overview(wallet, catalog, ledger, now, tz) {
        if let Some(signal) = cap_signal(&cap, now, tz, policy) {
            out.push(signal);
        }
    }

    for entry in wallet {
        let Some(card) = catalog.get(&entry.card_id) else { continue };
        let Some(progress) = bonus::progress(card, entry, ledger, now) else { continue };
        if !progress.is_in_progress() || progress.days_remaining > policy.bonus_deadline_days {
            continue;
        }
        let bonus_label = card
            .sign_up_bonus
            .as_ref()
            .map(|t| t.formatted_bonus())
            .unwrap_or_default();
        let deadline = entry
            .sign_up_bonus_deadline(card)
            .map(|d| d.with_timezone(&tz).date_naive().to_string())
            .unwrap_or_default();
        out.push(NotificationSignal {
            kind: SignalKind::BonusDeadline,
            wallet_entry_id: entry.id.clone(),
            title: format!("{} days left for your sign-up bonus", progress.days_remaining),
            body: format!(
                "{}: spend ${} more to earn {} ({})",
                entry.label(card),
                progress.amount_remaining().ceil() as i64,
                bonus_label,
                progress.formatted_progress()
            ),
            dedupe_key: format!("bonus:{}:{}", entry.id, deadline),
        });
    }

    out
}

fn cap_signal(
    cap: &SpendingCapProgress,
    now: DateTime<Utc>,
    tz: Tz,
    policy: &SignalPolicy,
) -> Option<NotificationSignal> {
    let pct = cap.percentage();
    if pct < policy.cap_alert_percent {
        return None;
    }

    // One signal per cap, period and threshold crossed.
    let period_start = cap.period.start(now, tz).with_timezone(&tz).date_naive();
    let (kind, title, body, level) = if cap.is_at_cap() {
        (
            SignalKind::CapReached,
            "Spending Cap Reached!".to_string(),
            format!(
                "{} {}: You've reached your ${} cap. Rewards now at base rate.",
                cap.card_label, cap.category_label, cap.cap as i64
            ),
            "full",
        )
    } else {
        (
            SignalKind::CapNearLimit,
            "Approaching Spending Cap".to_string(),
            format!(
                "{} {}: {}% of ${} cap used.",
                cap.card_label, cap.category_label, pct as i64, cap.cap as i64
            ),
            "near",
        )
    };

    Some(NotificationSignal {
        kind,
        wallet_entry_id: cap.wallet_entry_id.clone(),
        title,
        body,
        dedupe_key: format!("cap:{}:{}:{}", cap.id, period_start, level),
    })
}
