use anyhow::{Context, Result, ensure};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::time::parse_tz;

/// Value of one point or mile in dollars, used only to rank points cards
/// against cash back.
pub const DEFAULT_POINT_VALUE_USD: f64 = 0.01;

/// Longest cache lifetime a config file may ask for (30 days).
pub const MAX_TTL_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub point_value_usd: f64,
    /// Headroom fraction under which a cap is reported as near.
    pub near_cap_ratio: f64,
    pub recommendation_ttl_secs: u64,
    pub merchant_ttl_secs: u64,
    /// IANA name of the user's calendar for period boundaries.
    pub timezone: String,
    pub signals: SignalPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalPolicy {
    /// Warn about an open sign-up bonus this many days before its deadline.
    pub bonus_deadline_days: i64,
    pub cap_alert_percent: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            point_value_usd: DEFAULT_POINT_VALUE_USD,
            near_cap_ratio: 0.20,
            recommendation_ttl_secs: 300,
            merchant_ttl_secs: 600,
            timezone: "UTC".to_string(),
            signals: SignalPolicy::default(),
        }
    }
}

impl Default for SignalPolicy {
    fn default() -> Self {
        Self {
            bonus_deadline_days: 14,
            cap_alert_percent: 80.0,
        }
    }
}

impl EngineConfig {
    pub fn tz(&self) -> crate::Result<Tz> {
        parse_tz(&self.timezone)
    }
}

pub fn parse_config(s: &str) -> Result<EngineConfig> {
    let cfg: EngineConfig = toml::from_str(s).context("parse engine config")?;
    cfg.tz()?;
    ensure!(
        cfg.recommendation_ttl_secs <= MAX_TTL_SECS,
        "recommendation_ttl_secs {} exceeds {MAX_TTL_SECS}",
        cfg.recommendation_ttl_secs
    );
    ensure!(
        cfg.merchant_ttl_secs <= MAX_TTL_SECS,
        "merchant_ttl_secs {} exceeds {MAX_TTL_SECS}",
        cfg.merchant_ttl_secs
    );
    Ok(cfg)
}

/// Read `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_config(&s).with_context(|| format!("load {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &EngineConfig) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize engine config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
