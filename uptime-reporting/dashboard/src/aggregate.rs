//! Percentages, lifetime totals and date filtering over uptime records

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;
use uptime_collector::{DailyRecord, InstantRecord};

/// Default size of the trailing window, in days
pub const TRAILING_WINDOW_DAYS: i64 = 30;

/// Up/down split in percent, each rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentagePair {
    pub up: f64,
    pub down: f64,
}

impl PercentagePair {
    /// Two-decimal labels, e.g. `("90.00", "10.00")`
    pub fn labels(&self) -> (String, String) {
        (format!("{:.2}", self.up), format!("{:.2}", self.down))
    }
}

impl fmt::Display for PercentagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}% up, {:.2}% down", self.up, self.down)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Split `up`/`down` counts into percentages.
///
/// Returns `None` when no check was recorded at all, since a split of
/// zero checks has no meaning and would otherwise be NaN.
pub fn to_percentages(up: u64, down: u64) -> Option<PercentagePair> {
    if up == 0 && down == 0 {
        return None;
    }

    // Summed as floats, counts come straight from the API
    let total = up as f64 + down as f64;
    Some(PercentagePair {
        up: round2(up as f64 / total * 100.0),
        down: round2(down as f64 / total * 100.0),
    })
}

/// Sum every day's counters into `(total_up, total_down)`, saturating at `u64::MAX`
pub fn sum_lifetime<'a, I>(records: I) -> (u64, u64)
where
    I: IntoIterator<Item = &'a DailyRecord>,
{
    records
        .into_iter()
        .fold((0u64, 0u64), |(up, down), r| {
            (up.saturating_add(r.up), down.saturating_add(r.down))
        })
}

/// First record falling on `today`
pub fn select_today(records: &[DailyRecord], today: NaiveDate) -> Option<&DailyRecord> {
    records.iter().find(|r| r.day == today)
}

/// Records less than `window_days` whole days before `today`.
/// Records dated after `today` are kept.
pub fn select_trailing_window(
    records: &[DailyRecord],
    today: NaiveDate,
    window_days: i64,
) -> Vec<DailyRecord> {
    records
        .iter()
        .filter(|r| (today - r.day).num_days() < window_days)
        .cloned()
        .collect()
}

/// Timestamps and 1/0 states for the stepped instant chart
pub fn instant_states(records: &[InstantRecord]) -> (Vec<DateTime<Utc>>, Vec<u8>) {
    records
        .iter()
        .map(|r| (r.timestamp, u8::from(r.up)))
        .unzip()
}

/// Days and uptime percentage per day. Days without checks are skipped.
pub fn daily_uptime_series(records: &[DailyRecord]) -> (Vec<NaiveDate>, Vec<f64>) {
    records
        .iter()
        .filter_map(|r| to_percentages(r.up, r.down).map(|pct| (r.day, pct.up)))
        .unzip()
}
