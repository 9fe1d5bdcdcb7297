//! Portfolio value timeline reconstruction and drawdown analysis.
//!
//! The timeline is replayed from discrete journal records rather than a
//! price feed: every date on which anything happened (open, close, fill)
//! gets one snapshot, and each snapshot is recomputed from scratch over
//! the full position list. Position counts are small (a single user's
//! journal), so the quadratic rescan is acceptable and keeps every
//! snapshot independently verifiable.

use crate::types::{EventKind, Position, PositionStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One snapshot of portfolio state on a significant date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioValuePoint {
    /// Calendar date of the snapshot
    pub date: NaiveDate,
    /// Initial balance plus realized and unrealized P&L
    pub portfolio_value: f64,
    /// Realized P&L accumulated up to and including this date
    pub realized_pnl: f64,
    /// Unrealized P&L (always 0, see `calculate_portfolio_timeline`)
    pub unrealized_pnl: f64,
    /// Initial balance plus realized P&L only
    pub account_balance: f64,
}

/// Maximum peak-to-trough loss over a timeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Drawdown {
    /// Largest peak-to-trough decline in dollars
    pub max_drawdown: f64,
    /// The decline as a percentage of the peak it fell from
    pub max_drawdown_percent: f64,
}

/// Summary of portfolio state derived from the timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioMetrics {
    /// Starting account balance
    pub account_balance: f64,
    /// Balance after all realized P&L
    pub current_balance: f64,
    /// Total realized P&L over the whole timeline
    pub total_realized_pnl: f64,
    /// Realized P&L as a percentage of the starting balance
    pub total_return_percent: f64,
    /// Largest peak-to-trough decline in dollars
    pub max_drawdown: f64,
    /// The decline as a percentage of its peak
    pub max_drawdown_percent: f64,
    /// Per-date portfolio value snapshots
    pub timeline: Vec<PortfolioValuePoint>,
}

/// Rebuild the portfolio value timeline from position and fill records.
///
/// One `PortfolioValuePoint` is produced per distinct calendar date found
/// among `opened_at`, `closed_at`, and event dates, in ascending order.
/// Each point is recomputed from the full position list:
///
/// - positions opened after the date are skipped;
/// - positions with fill history contribute the realized P&L of sell
///   fills dated on or before the date;
/// - positions without fill history contribute `total_realized_pnl` once
///   their close date has passed.
///
/// Unrealized P&L is always 0: no live prices are available client-side,
/// so open positions are valued at cost (conservative approximation).
pub fn calculate_portfolio_timeline(
    positions: &[Position],
    initial_balance: f64,
) -> Vec<PortfolioValuePoint> {
    let mut dates: BTreeSet<NaiveDate> = BTreeSet::new();
    for position in positions {
        dates.insert(position.opened_at.date_naive());
        if let Some(closed_at) = position.closed_at {
            dates.insert(closed_at.date_naive());
        }
        for event in &position.events {
            dates.insert(event.event_date.date_naive());
        }
    }

    dates
        .into_iter()
        .map(|date| {
            let mut realized_pnl = 0.0;
            let unrealized_pnl = 0.0;

            for position in positions {
                if date < position.opened_at.date_naive() {
                    continue;
                }

                if !position.events.is_empty() {
                    realized_pnl += position
                        .events
                        .iter()
                        .filter(|e| {
                            e.event_type == EventKind::Sell && e.event_date.date_naive() <= date
                        })
                        .filter_map(|e| e.realized_pnl)
                        .sum::<f64>();
                } else if position.status == PositionStatus::Closed {
                    let closed_by_date = position
                        .closed_at
                        .map(|c| c.date_naive() <= date)
                        .unwrap_or(false);
                    if closed_by_date {
                        realized_pnl += position.total_realized_pnl.unwrap_or(0.0);
                    }
                }
            }

            PortfolioValuePoint {
                date,
                portfolio_value: initial_balance + realized_pnl + unrealized_pnl,
                realized_pnl,
                unrealized_pnl,
                account_balance: initial_balance + realized_pnl,
            }
        })
        .collect()
}

/// Scan a timeline for the maximum peak-to-trough decline.
///
/// The percentage is taken against the peak in effect when the maximum
/// drawdown was recorded, not the global peak. Returns zeros for an
/// empty timeline.
pub fn calculate_max_drawdown_from_timeline(timeline: &[PortfolioValuePoint]) -> Drawdown {
    let mut peak = f64::MIN;
    let mut max_drawdown = 0.0;
    let mut max_drawdown_percent = 0.0;

    for point in timeline {
        if point.portfolio_value > peak {
            peak = point.portfolio_value;
        }
        let drawdown = peak - point.portfolio_value;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
            max_drawdown_percent = if peak > 0.0 {
                drawdown / peak * 100.0
            } else {
                0.0
            };
        }
    }

    Drawdown {
        max_drawdown,
        max_drawdown_percent,
    }
}

/// Derive balance, return, and drawdown figures from the timeline.
pub fn calculate_portfolio_metrics(positions: &[Position], account_balance: f64) -> PortfolioMetrics {
    let timeline = calculate_portfolio_timeline(positions, account_balance);
    let drawdown = calculate_max_drawdown_from_timeline(&timeline);

    let total_realized_pnl = timeline.last().map(|p| p.realized_pnl).unwrap_or(0.0);
    let total_return_percent = if account_balance > 0.0 {
        total_realized_pnl / account_balance * 100.0
    } else {
        0.0
    };

    PortfolioMetrics {
        account_balance,
        current_balance: account_balance + total_realized_pnl,
        total_realized_pnl,
        total_return_percent,
        max_drawdown: drawdown.max_drawdown,
        max_drawdown_percent: drawdown.max_drawdown_percent,
        timeline,
    }
}
