//! Calendar utilities: period starts and quarters in the caller's local calendar.
//!
//! Timestamps are stored as UTC. Anything calendar-shaped ("first of this
//! month", "which quarter is it") is evaluated in an IANA timezone and
//! converted back to UTC.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Window a spending cap resets on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CapPeriod {
    Monthly,
    Quarterly,
    Yearly,
}

impl CapPeriod {
    pub fn display_name(&self) -> &'static str {
        match self {
            CapPeriod::Monthly => "Monthly",
            CapPeriod::Quarterly => "Quarterly",
            CapPeriod::Yearly => "Yearly",
        }
    }

    /// Start of the period containing `now`, as local midnight converted to UTC.
    pub fn start(&self, now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
        let local = now.with_timezone(&tz).date_naive();
        let (year, month) = match self {
            CapPeriod::Monthly => (local.year(), local.month()),
            CapPeriod::Quarterly => (local.year(), (quarter_of(local.month()) - 1) * 3 + 1),
            CapPeriod::Yearly => (local.year(), 1),
        };
        local_midnight(tz, year, month, 1)
    }
}

/// A calendar quarter, Jan/Apr/Jul/Oct aligned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quarter {
    pub year: i32,
    /// 1..=4
    pub quarter: u32,
}

impl Quarter {
    pub fn new(year: i32, quarter: u32) -> Self {
        Self { year, quarter }
    }

    /// Quarter containing `now` in the given timezone.
    pub fn containing(now: DateTime<Utc>, tz: Tz) -> Self {
        let local = now.with_timezone(&tz).date_naive();
        Self {
            year: local.year(),
            quarter: quarter_of(local.month()),
        }
    }

    pub fn start_month(&self) -> u32 {
        (self.quarter - 1) * 3 + 1
    }

    pub fn label(&self) -> String {
        format!("{}-Q{}", self.year, self.quarter)
    }
}

fn quarter_of(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

/// Local midnight of `year-month-day` in `tz`, as UTC.
///
/// Midnight can fall in a DST gap in a handful of zones; the earliest valid
/// instant wins, and a date chrono cannot represent falls back to UTC midnight.
pub fn local_midnight(tz: Tz, year: i32, month: u32, day: u32) -> DateTime<Utc> {
    let Some(ndt) = NaiveDate::from_ymd_opt(year, month, day).and_then(|d| d.and_hms_opt(0, 0, 0))
    else {
        return DateTime::<Utc>::default();
    };
    tz.from_local_datetime(&ndt)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&ndt))
}

/// Whole days from `now` until `deadline`, floored, never negative.
pub fn whole_days_until(now: DateTime<Utc>, deadline: DateTime<Utc>) -> i64 {
    (deadline - now).num_days().max(0)
}

/// Parse an IANA timezone name like "America/Chicago".
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn quarter_boundaries() {
        let tz = chrono_tz::UTC;
        let cases = [(1, 1), (3, 1), (4, 2), (6, 2), (7, 3), (9, 3), (10, 4), (12, 4)];
        for (month, q) in cases {
            let now = Utc.with_ymd_and_hms(2025, month, 15, 12, 0, 0).unwrap();
            assert_eq!(Quarter::containing(now, tz), Quarter::new(2025, q), "month {month}");
        }
    }

    #[test]
    fn period_starts_in_utc() {
        let tz = chrono_tz::UTC;
        let now = Utc.with_ymd_and_hms(2025, 8, 19, 17, 30, 0).unwrap();
        assert_eq!(
            CapPeriod::Monthly.start(now, tz),
            Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            CapPeriod::Quarterly.start(now, tz),
            Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            CapPeriod::Yearly.start(now, tz),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn period_start_uses_local_calendar() {
        // 2025-04-01 03:00 UTC is still March 31st in Chicago (CDT, UTC-5).
        let tz: Tz = "America/Chicago".parse().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 4, 1, 3, 0, 0).unwrap();
        assert_eq!(Quarter::containing(now, tz), Quarter::new(2025, 1));
        assert_eq!(
            CapPeriod::Quarterly.start(now, tz),
            Utc.with_ymd_and_hms(2025, 1, 1, 6, 0, 0).unwrap()
        );
        assert_eq!(
            CapPeriod::Monthly.start(now, tz),
            Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap()
        );
    }

    #[test]
    fn days_until_floors_and_clamps() {
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        assert_eq!(whole_days_until(now, now + Duration::hours(47)), 1);
        assert_eq!(whole_days_until(now, now + Duration::days(10)), 10);
        assert_eq!(whole_days_until(now, now - Duration::days(3)), 0);
    }

    #[test]
    fn rejects_bad_timezone() {
        assert!(parse_tz("America/Chicago").is_ok());
        assert_eq!(
            parse_tz("Mars/Olympus"),
            Err(EngineError::InvalidTimezone("Mars/Olympus".into()))
        );
    }
}
