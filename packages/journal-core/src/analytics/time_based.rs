//! Calendar segmentation of closed-trade returns.
//!
//! Groups realized P&L by close month, weekday, and holding period so the
//! journal can surface when a trader's edge actually shows up. Buckets
//! with no trades are still emitted zero-filled, which lets the UI render
//! fixed-width tables without patching holes.

use crate::types::Position;
use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Holding-period bucket boundaries in whole days, inclusive.
const HOLDING_BUCKETS: [(&str, i64); 7] = [
    ("1 day", 1),
    ("2-3 days", 3),
    ("4-7 days", 7),
    ("8-14 days", 14),
    ("15-28 days", 28),
    ("29-90 days", 90),
    ("91+ days", i64::MAX),
];

/// Weekday display order.
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Realized P&L summed over one calendar month of close dates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyReturn {
    pub year: i32,
    pub month: u32,
    /// Total realized P&L of trades closed in this month
    pub total_pnl: f64,
    /// Number of trades closed in this month
    pub trades: usize,
}

/// Performance of trades closed on one weekday.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayOfWeekPerformance {
    /// Weekday name ("Monday" .. "Sunday")
    pub day: String,
    /// Mean realized P&L per trade
    pub avg_return: f64,
    /// Percentage of trades with positive P&L
    pub win_rate: f64,
    pub trades: usize,
}

/// Performance of trades within one holding-period bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HoldingPeriodPerformance {
    /// Bucket label ("1 day" .. "91+ days")
    pub period: String,
    /// Mean realized P&L per trade
    pub avg_return: f64,
    /// Percentage of trades with positive P&L
    pub win_rate: f64,
    pub trades: usize,
}

/// Calendar-grouped return statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeBasedMetrics {
    /// Chronological month-by-month totals (months with trades only)
    pub monthly_returns: Vec<MonthlyReturn>,
    /// Monday through Sunday, always 7 rows
    pub day_of_week: Vec<DayOfWeekPerformance>,
    /// Fixed holding-period buckets, always 7 rows
    pub holding_periods: Vec<HoldingPeriodPerformance>,
}

/// Group closed-trade returns by close month, weekday, and holding period.
///
/// Empty input yields empty monthly returns and zero-filled weekday and
/// holding-period rows.
pub fn calculate_time_based_metrics(positions: &[Position]) -> TimeBasedMetrics {
    let closed: Vec<(DateTime<Utc>, i64, f64)> = positions
        .iter()
        .filter(|p| p.is_closed())
        .filter_map(|p| {
            let closed_at = p.closed_at?;
            let pnl = p.total_realized_pnl?;
            let days = p.holding_days().unwrap_or(0);
            Some((closed_at, days, pnl))
        })
        .collect();

    TimeBasedMetrics {
        monthly_returns: monthly_returns(&closed),
        day_of_week: day_of_week(&closed),
        holding_periods: holding_periods(&closed),
    }
}

fn monthly_returns(closed: &[(DateTime<Utc>, i64, f64)]) -> Vec<MonthlyReturn> {
    let mut by_month: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
    for (closed_at, _, pnl) in closed {
        let entry = by_month
            .entry((closed_at.year(), closed_at.month()))
            .or_insert((0.0, 0));
        entry.0 += pnl;
        entry.1 += 1;
    }

    by_month
        .into_iter()
        .map(|((year, month), (total_pnl, trades))| MonthlyReturn {
            year,
            month,
            total_pnl,
            trades,
        })
        .collect()
}

fn day_of_week(closed: &[(DateTime<Utc>, i64, f64)]) -> Vec<DayOfWeekPerformance> {
    let mut sums = [0.0_f64; 7];
    let mut wins = [0_usize; 7];
    let mut counts = [0_usize; 7];

    for (closed_at, _, pnl) in closed {
        let idx = closed_at.weekday().num_days_from_monday() as usize;
        sums[idx] += pnl;
        counts[idx] += 1;
        if *pnl > 0.0 {
            wins[idx] += 1;
        }
    }

    WEEKDAYS
        .iter()
        .enumerate()
        .map(|(idx, weekday)| DayOfWeekPerformance {
            day: weekday_name(*weekday).to_string(),
            avg_return: mean(sums[idx], counts[idx]),
            win_rate: rate(wins[idx], counts[idx]),
            trades: counts[idx],
        })
        .collect()
}

fn holding_periods(closed: &[(DateTime<Utc>, i64, f64)]) -> Vec<HoldingPeriodPerformance> {
    let mut sums = [0.0_f64; HOLDING_BUCKETS.len()];
    let mut wins = [0_usize; HOLDING_BUCKETS.len()];
    let mut counts = [0_usize; HOLDING_BUCKETS.len()];

    for (_, days, pnl) in closed {
        let idx = bucket_index(*days);
        sums[idx] += pnl;
        counts[idx] += 1;
        if *pnl > 0.0 {
            wins[idx] += 1;
        }
    }

    HOLDING_BUCKETS
        .iter()
        .enumerate()
        .map(|(idx, (label, _))| HoldingPeriodPerformance {
            period: label.to_string(),
            avg_return: mean(sums[idx], counts[idx]),
            win_rate: rate(wins[idx], counts[idx]),
            trades: counts[idx],
        })
        .collect()
}

/// First bucket whose inclusive upper bound covers the holding time.
fn bucket_index(days: i64) -> usize {
    HOLDING_BUCKETS
        .iter()
        .position(|(_, max)| days <= *max)
        .unwrap_or(HOLDING_BUCKETS.len() - 1)
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn mean(sum: f64, count: usize) -> f64 {
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

fn rate(hits: usize, count: usize) -> f64 {
    if count > 0 {
        hits as f64 / count as f64 * 100.0
    } else {
        0.0
    }
}
