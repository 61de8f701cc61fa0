//! Transaction ledger snapshot.
//!
//! Records are keyed by id and indexed by wallet entry, so cap and bonus
//! sums only walk the records of the entry being evaluated. Persistence is
//! the ledger owner's job; this type is the in-memory view handed to the
//! engine.
//!
//! `reward_earned` is frozen when a record is priced and is never
//! recomputed here, even if the card's rules change later.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::category::SpendingCategory;
use crate::time::CapPeriod;

/// A purchase that has not been priced yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub id: String,
    pub amount: f64,
    pub merchant: String,
    pub category: SpendingCategory,
    pub wallet_entry_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub note: Option<String>,
}

impl TransactionDraft {
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        merchant: impl Into<String>,
        category: SpendingCategory,
        wallet_entry_id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            merchant: merchant.into(),
            category,
            wallet_entry_id: wallet_entry_id.into(),
            timestamp,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Attach frozen reward values.
    pub fn into_record(
        self,
        reward_earned: f64,
        optimal_entry_id: Option<String>,
        missed_reward: Option<f64>,
    ) -> TransactionRecord {
        TransactionRecord {
            id: self.id,
            amount: self.amount,
            merchant: self.merchant,
            category: self.category,
            wallet_entry_id: self.wallet_entry_id,
            timestamp: self.timestamp,
            note: self.note,
            reward_earned,
            optimal_entry_id,
            missed_reward,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    pub amount: f64,
    pub merchant: String,
    pub category: SpendingCategory,
    pub wallet_entry_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub note: Option<String>,
    /// Frozen at insert time.
    pub reward_earned: f64,
    #[serde(default)]
    pub optimal_entry_id: Option<String>,
    #[serde(default)]
    pub missed_reward: Option<f64>,
}

#[derive(Debug, Default, Clone)]
pub struct Ledger {
    // Ordered maps keep float sums reproducible between runs.
    records: BTreeMap<String, TransactionRecord>,

    // idx[wallet_entry_id] = set(record_id)
    idx: HashMap<String, BTreeSet<String>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = TransactionRecord>) -> Self {
        let mut ledger = Self::new();
        for r in records {
            ledger.append(r);
        }
        ledger
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TransactionRecord> {
        self.records.get(id)
    }

    /// Append a record. Re-appending an existing id replaces it.
    pub fn append(&mut self, record: TransactionRecord) {
        if let Some(old) = self.records.get(&record.id).cloned() {
            self.deindex(&old);
        }
        self.index(&record);
        self.records.insert(record.id.clone(), record);
    }

    pub fn remove(&mut self, id: &str) -> Option<TransactionRecord> {
        let r = self.records.remove(id);
        if let Some(ref record) = r {
            self.deindex(record);
        }
        r
    }

    /// Records charged to one wallet entry, ordered by record id.
    pub fn for_entry(&self, wallet_entry_id: &str) -> impl Iterator<Item = &TransactionRecord> {
        self.idx
            .get(wallet_entry_id)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|id| self.records.get(id))
    }

    /// Sum of an entry's spend at or after `since` whose category passes `filter`.
    pub fn spend_since(
        &self,
        wallet_entry_id: &str,
        since: DateTime<Utc>,
        filter: impl Fn(SpendingCategory) -> bool,
    ) -> f64 {
        self.for_entry(wallet_entry_id)
            .filter(|r| r.timestamp >= since && filter(r.category))
            .map(|r| r.amount)
            .sum()
    }

    /// All records, newest first.
    pub fn newest_first(&self) -> Vec<&TransactionRecord> {
        let mut out: Vec<&TransactionRecord> = self.records.values().collect();
        out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
        out
    }

    pub fn since(&self, start: DateTime<Utc>) -> Vec<&TransactionRecord> {
        self.newest_first()
            .into_iter()
            .filter(|r| r.timestamp >= start)
            .collect()
    }

    pub fn this_month(&self, now: DateTime<Utc>, tz: Tz) -> Vec<&TransactionRecord> {
        self.since(CapPeriod::Monthly.start(now, tz))
    }

    pub fn this_quarter(&self, now: DateTime<Utc>, tz: Tz) -> Vec<&TransactionRecord> {
        self.since(CapPeriod::Quarterly.start(now, tz))
    }

    pub fn total_spend(&self) -> f64 {
        self.records.values().map(|r| r.amount).sum()
    }

    pub fn total_reward_earned(&self) -> f64 {
        self.records.values().map(|r| r.reward_earned).sum()
    }

    pub fn total_missed_reward(&self) -> f64 {
        self.records.values().filter_map(|r| r.missed_reward).sum()
    }

    /// Spend per category, largest first.
    pub fn spend_by_category(&self) -> Vec<(SpendingCategory, f64)> {
        let mut totals: HashMap<SpendingCategory, f64> = HashMap::new();
        for r in self.records.values() {
            *totals.entry(r.category).or_insert(0.0) += r.amount;
        }
        let mut out: Vec<_> = totals.into_iter().collect();
        out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }

    /// Spend per wallet entry, largest first.
    pub fn spend_by_entry(&self) -> Vec<(String, f64)> {
        let mut out: Vec<(String, f64)> = self
            .idx
            .keys()
            .map(|id| (id.clone(), self.for_entry(id).map(|r| r.amount).sum()))
            .collect();
        out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }

    fn index(&mut self, record: &TransactionRecord) {
        self.idx
            .entry(record.wallet_entry_id.clone())
            .or_default()
            .insert(record.id.clone());
    }

    fn deindex(&mut self, record: &TransactionRecord) {
        if let Some(set) = self.idx.get_mut(&record.wallet_entry_id) {
            set.remove(&record.id);
            if set.is_empty() {
                self.idx.remove(&record.wallet_entry_id);
            }
        }
    }
}
