//! User merchant overrides from CSV.
//!
//! Columns: `name,category,keywords`. `category` is the external category
//! string (`grocery`, `homeImprovement`, ...); `keywords` is `;`-separated
//! and optional. Rows with a blank name or an unknown category are skipped.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use cardwise_core::SpendingCategory;
use serde::Deserialize;
use tracing::warn;

use crate::directory::Merchant;

#[derive(Debug, Deserialize)]
struct OverrideRow {
    name: String,
    category: String,
    #[serde(default)]
    keywords: String,
}

pub fn import_overrides(path: impl AsRef<Path>) -> Result<Vec<Merchant>> {
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    read_rows(rdr)
}

pub fn import_overrides_from_reader<R: Read>(reader: R) -> Result<Vec<Merchant>> {
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    read_rows(rdr)
}

fn read_rows<R: Read>(mut rdr: csv::Reader<R>) -> Result<Vec<Merchant>> {
    let mut out = Vec::new();

    for (i, result) in rdr.deserialize::<OverrideRow>().enumerate() {
        // +2: header row, 1-based lines
        let line = i + 2;
        let row = result.with_context(|| format!("merchant overrides line {line}"))?;

        if row.name.is_empty() {
            warn!(line, "merchant override without a name; skipping");
            continue;
        }
        let category: SpendingCategory = match row.category.parse() {
            Ok(c) => c,
            Err(e) => {
                warn!(line, name = %row.name, error = %e, "merchant override skipped");
                continue;
            }
        };

        out.push(Merchant::new(row.name, category).with_keywords(row.keywords.split(';')));
    }

    Ok(out)
}
