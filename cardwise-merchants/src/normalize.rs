//! Statement-descriptor cleanup.
//!
//! Card statements decorate merchant names with processor prefixes, store
//! numbers and locations: `TST* CHIPOTLE #1234 AUSTIN TX`. Lookup wants
//! `chipotle austin`.

use anyhow::Result;
use regex::Regex;

#[derive(Debug, Clone)]
pub struct DescriptorNormalizer {
    prefix_re: Regex,
    store_re: Regex,
    state_re: Regex,
    ws_re: Regex,
}

impl DescriptorNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // Square, Toast, PayPal, generic payment facilitators.
            prefix_re: Regex::new(r"(?i)^\s*(?:SQ|TST|PAYPAL|PP|SP|DD|IC)\s*\*\s*")?,
            store_re: Regex::new(r"#\s*\d+|\b\d{4,}\b|\*")?,
            // Trailing two-letter state, optionally with a ZIP.
            state_re: Regex::new(r"\s+[A-Z]{2}(?:\s+\d{5}(?:-\d{4})?)?\s*$")?,
            ws_re: Regex::new(r"\s+")?,
        })
    }

    /// Lowercased, decoration-free form of `raw`.
    pub fn normalize(&self, raw: &str) -> String {
        let s = self.prefix_re.replace(raw, "");
        let s = self.store_re.replace_all(&s, " ");
        let s = self.ws_re.replace_all(s.trim(), " ");

        // Only strip a state code when something meaningful is left in front
        // of it; "BP" or "UPS" on their own are merchant names.
        let s = if s.split(' ').count() >= 3 {
            self.state_re.replace(&s, "").into_owned()
        } else {
            s.into_owned()
        };

        s.trim().to_lowercase()
    }
}
