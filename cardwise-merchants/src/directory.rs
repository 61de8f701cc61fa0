//! Merchant directory and lookup.

use anyhow::Result;
use cardwise_core::{MerchantClassifier, SpendingCategory};
use serde::{Deserialize, Serialize};

use crate::builtin::BUILTIN;
use crate::normalize::DescriptorNormalizer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    pub name: String,
    pub category: SpendingCategory,
    /// Other categories a card might code this merchant under.
    #[serde(default)]
    pub alternative_categories: Vec<SpendingCategory>,
    /// Lowercase fragments matched against descriptors.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Merchant {
    pub fn new(name: impl Into<String>, category: SpendingCategory) -> Self {
        Self {
            name: name.into(),
            category,
            alternative_categories: Vec::new(),
            keywords: Vec::new(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords
            .into_iter()
            .map(|k| k.into().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self
    }

    pub fn with_alternatives(mut self, categories: Vec<SpendingCategory>) -> Self {
        self.alternative_categories = categories;
        self
    }
}

/// Ordered list of merchants; earlier entries win lookups.
#[derive(Debug, Clone)]
pub struct MerchantDirectory {
    merchants: Vec<Merchant>,
    normalizer: DescriptorNormalizer,
}

impl MerchantDirectory {
    pub fn new(merchants: Vec<Merchant>) -> Result<Self> {
        Ok(Self {
            merchants,
            normalizer: DescriptorNormalizer::new()?,
        })
    }

    pub fn builtin() -> Result<Self> {
        let merchants = BUILTIN
            .iter()
            .map(|(name, category, alts, keywords)| {
                Merchant::new(*name, *category)
                    .with_alternatives(alts.to_vec())
                    .with_keywords(keywords.iter().copied())
            })
            .collect();
        Self::new(merchants)
    }

    /// Put `overrides` ahead of the existing entries.
    pub fn with_overrides(mut self, overrides: Vec<Merchant>) -> Self {
        let mut merged = overrides;
        merged.append(&mut self.merchants);
        self.merchants = merged;
        self
    }

    pub fn merchants(&self) -> &[Merchant] {
        &self.merchants
    }

    pub fn len(&self) -> usize {
        self.merchants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merchants.is_empty()
    }

    pub fn normalize(&self, raw: &str) -> String {
        self.normalizer.normalize(raw)
    }

    /// Best match for a typed name or statement descriptor.
    ///
    /// Exact name first, then a keyword found in the query as whole words,
    /// then a name containing the query or contained in it.
    pub fn find(&self, query: &str) -> Option<&Merchant> {
        let q = self.normalize(query);
        if q.is_empty() {
            return None;
        }

        if let Some(m) = self.merchants.iter().find(|m| m.name.to_lowercase() == q) {
            return Some(m);
        }

        if let Some(m) = self
            .merchants
            .iter()
            .find(|m| m.keywords.iter().any(|k| contains_words(&q, k)))
        {
            return Some(m);
        }

        self.merchants.iter().find(|m| {
            let name = m.name.to_lowercase();
            (q.len() >= 3 && name.contains(&q)) || contains_words(&q, &name)
        })
    }

    pub fn suggest_category(&self, query: &str) -> Option<SpendingCategory> {
        self.find(query).map(|m| m.category)
    }

    /// Autocomplete candidates, in directory order.
    pub fn search(&self, query: &str) -> Vec<&Merchant> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }
        self.merchants
            .iter()
            .filter(|m| {
                m.name.to_lowercase().contains(&q)
                    || m.keywords.iter().any(|k| k.contains(&q) || contains_words(&q, k))
            })
            .collect()
    }
}

impl MerchantClassifier for MerchantDirectory {
    fn classify(&self, merchant: &str) -> Option<SpendingCategory> {
        self.suggest_category(merchant)
    }
}

/// `needle` appears in `haystack` on word boundaries.
fn contains_words(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    format!(" {haystack} ").contains(&format!(" {needle} "))
}
