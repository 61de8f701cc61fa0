//! Spending categories and their external string form.
//!
//! Categories are a closed set. The only place free text turns into a
//! category is the merchant classifier; everything in this crate matches on
//! the enum. External strings go through [`CATEGORY_TABLE`], which is
//! versioned so catalog documents can declare which mapping they were
//! written against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Bump when a row of [`CATEGORY_TABLE`] changes its external string.
pub const CATEGORY_TABLE_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum SpendingCategory {
    Dining,
    Grocery,
    Gas,
    Travel,
    Streaming,
    Drugstore,
    HomeImprovement,
    Entertainment,
    OnlineShopping,
    Transit,
    Utilities,
    Wholesale,
    Paypal,
    Amazon,
    Fitness,
    Phone,
    Internet,
    Shipping,
    Advertising,
    OfficeSupplies,
    EvCharging,
    Apple,
    WholeFoods,
    Target,
    Walmart,
    Macys,
    Kohls,
    Gap,
    Nordstrom,
    Electronics,
    Other,
}

use SpendingCategory as C;

/// (category, external string, display name)
pub const CATEGORY_TABLE: &[(SpendingCategory, &str, &str)] = &[
    (C::Dining, "dining", "Dining"),
    (C::Grocery, "grocery", "Grocery"),
    (C::Gas, "gas", "Gas"),
    (C::Travel, "travel", "Travel"),
    (C::Streaming, "streaming", "Streaming"),
    (C::Drugstore, "drugstore", "Drugstore"),
    (C::HomeImprovement, "homeImprovement", "Home Improvement"),
    (C::Entertainment, "entertainment", "Entertainment"),
    (C::OnlineShopping, "onlineShopping", "Online Shopping"),
    (C::Transit, "transit", "Transit"),
    (C::Utilities, "utilities", "Utilities"),
    (C::Wholesale, "wholesale", "Wholesale Clubs"),
    (C::Paypal, "paypal", "PayPal"),
    (C::Amazon, "amazon", "Amazon"),
    (C::Fitness, "fitness", "Fitness"),
    (C::Phone, "phone", "Phone/Internet"),
    (C::Internet, "internet", "Internet/Cable"),
    (C::Shipping, "shipping", "Shipping"),
    (C::Advertising, "advertising", "Advertising"),
    (C::OfficeSupplies, "officeSupplies", "Office Supplies"),
    (C::EvCharging, "evCharging", "EV Charging"),
    (C::Apple, "apple", "Apple"),
    (C::WholeFoods, "wholeFoods", "Whole Foods"),
    (C::Target, "target", "Target"),
    (C::Walmart, "walmart", "Walmart"),
    (C::Macys, "macys", "Macys"),
    (C::Kohls, "kohls", "Kohls"),
    (C::Gap, "gap", "Gap"),
    (C::Nordstrom, "nordstrom", "Nordstrom"),
    (C::Electronics, "electronics", "Electronics"),
    (C::Other, "other", "Other"),
];

impl SpendingCategory {
    /// The catch-all used when a merchant cannot be classified.
    pub const CATCH_ALL: SpendingCategory = SpendingCategory::Other;

    pub fn all() -> impl Iterator<Item = SpendingCategory> {
        CATEGORY_TABLE.iter().map(|(c, _, _)| *c)
    }

    fn row(&self) -> &'static (SpendingCategory, &'static str, &'static str) {
        // Every variant has exactly one row; see `table_covers_every_variant`.
        CATEGORY_TABLE
            .iter()
            .find(|(c, _, _)| c == self)
            .unwrap_or(&CATEGORY_TABLE[CATEGORY_TABLE.len() - 1])
    }

    /// External string form (stable across releases of the same table version).
    pub fn as_str(&self) -> &'static str {
        self.row().1
    }

    pub fn display_name(&self) -> &'static str {
        self.row().2
    }
}

impl fmt::Display for SpendingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SpendingCategory {
    type Err = EngineError;

    /// Exact match on the external string. No fuzzy matching here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EngineError::EmptyCategory);
        }
        CATEGORY_TABLE
            .iter()
            .find(|(_, raw, _)| *raw == s)
            .map(|(c, _, _)| *c)
            .ok_or_else(|| EngineError::UnknownCategory(s.to_string()))
    }
}
