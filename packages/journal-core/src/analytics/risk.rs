//! Risk-adjusted performance metrics over the closed-trade P&L series.

use crate::analytics::timeline::{
    calculate_max_drawdown_from_timeline, calculate_portfolio_timeline,
};
use crate::types::Position;
use serde::{Deserialize, Serialize};

/// Trading days per year, used for risk-free scaling and annualization.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Annual risk-free rate applied to the account balance.
const RISK_FREE_RATE: f64 = 0.03;

/// Saturation value reported for ratios whose denominator is zero.
///
/// The journal UI formats these as finite numbers, so "infinite" ratios
/// (all-winning history, zero drawdown) saturate at 999 instead of
/// `f64::INFINITY`.
pub const RATIO_SATURATION: f64 = 999.0;

/// Risk and return statistics derived from closed positions.
///
/// Every field is zero when there are no closed positions; the drawdown
/// fields are still computed from the event timeline, so they can be
/// nonzero even before the first position closes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RiskMetrics {
    /// Number of closed trades
    pub total_trades: usize,
    /// Sum of realized P&L across closed trades
    pub total_pnl: f64,
    /// Percentage of closed trades with positive P&L
    pub win_rate: f64,
    /// Mean P&L of winning trades
    pub avg_win: f64,
    /// Mean absolute P&L of losing trades
    pub avg_loss: f64,
    /// Largest single winning trade
    pub largest_win: f64,
    /// Largest single losing trade (absolute value)
    pub largest_loss: f64,
    /// Gross profit over gross loss (999 when there are no losses)
    pub profit_factor: f64,
    /// Expected P&L per trade
    pub expectancy: f64,
    /// Kelly criterion position-sizing percentage
    pub kelly_percentage: f64,
    /// Mean excess return over standard deviation of the trade series
    pub sharpe_ratio: f64,
    /// Mean excess return over downside deviation of the trade series
    pub sortino_ratio: f64,
    /// Annualized return over max drawdown (999 when drawdown is 0)
    pub calmar_ratio: f64,
    /// Total return over max drawdown (999 when drawdown is 0)
    pub recovery_factor: f64,
    /// Largest peak-to-trough decline in dollars
    pub max_drawdown: f64,
    /// The decline as a percentage of its peak
    pub max_drawdown_percent: f64,
    /// Winning streak active at the most recent trade
    pub consecutive_wins: usize,
    /// Losing streak active at the most recent trade
    pub consecutive_losses: usize,
    /// Longest winning streak on record
    pub max_consecutive_wins: usize,
    /// Longest losing streak on record
    pub max_consecutive_losses: usize,
}

/// Compute risk metrics from closed positions.
///
/// Positions are filtered to closed ones carrying a realized P&L and
/// processed in close-date order. The Sharpe and Sortino ratios are
/// computed over the trade-level dollar P&L series (not time-weighted),
/// with a daily risk-free amount of `account_balance * 0.03 / 252`.
///
/// Never fails: sparse or empty histories yield zeroed metrics so the
/// caller can render a "no data yet" state without special-casing.
pub fn calculate_risk_metrics(positions: &[Position], account_balance: f64) -> RiskMetrics {
    let timeline = calculate_portfolio_timeline(positions, account_balance);
    let drawdown = calculate_max_drawdown_from_timeline(&timeline);

    let mut closed: Vec<&Position> = positions
        .iter()
        .filter(|p| p.is_closed() && p.total_realized_pnl.is_some())
        .collect();
    closed.sort_by_key(|p| p.closed_at);

    let returns: Vec<f64> = closed.iter().filter_map(|p| p.total_realized_pnl).collect();
    if returns.is_empty() {
        return RiskMetrics {
            max_drawdown: drawdown.max_drawdown,
            max_drawdown_percent: drawdown.max_drawdown_percent,
            ..Default::default()
        };
    }

    let n = returns.len() as f64;
    let wins: Vec<f64> = returns.iter().filter(|&&r| r > 0.0).copied().collect();
    let losses: Vec<f64> = returns.iter().filter(|&&r| r < 0.0).map(|r| r.abs()).collect();

    let gross_profit: f64 = wins.iter().sum();
    let gross_loss: f64 = losses.iter().sum();

    let win_rate = wins.len() as f64 / n * 100.0;
    let avg_win = if wins.is_empty() {
        0.0
    } else {
        gross_profit / wins.len() as f64
    };
    let avg_loss = if losses.is_empty() {
        0.0
    } else {
        gross_loss / losses.len() as f64
    };
    let largest_win = wins.iter().cloned().fold(0.0, f64::max);
    let largest_loss = losses.iter().cloned().fold(0.0, f64::max);

    let profit_factor = saturated_ratio(gross_profit, gross_loss);

    let p = win_rate / 100.0;
    let expectancy = p * avg_win - (1.0 - p) * avg_loss;

    let kelly_percentage = if avg_loss > 0.0 {
        let b = avg_win / avg_loss;
        (p * b - (1.0 - p)) / b * 100.0
    } else {
        0.0
    };

    // Trade-level Sharpe/Sortino: mean excess dollar return over the
    // series deviation, no per-day annualization.
    let daily_rf = account_balance * RISK_FREE_RATE / TRADING_DAYS_PER_YEAR;
    let mean_return = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean_return).powi(2)).sum::<f64>() / n;
    let std_return = variance.sqrt();
    let excess_return = mean_return - daily_rf;

    let sharpe_ratio = if std_return > 0.0 {
        excess_return / std_return
    } else {
        0.0
    };

    let negatives: Vec<f64> = returns.iter().filter(|&&r| r < 0.0).copied().collect();
    let downside_std = if negatives.is_empty() {
        std_return
    } else {
        let downside_variance =
            negatives.iter().map(|r| r.powi(2)).sum::<f64>() / negatives.len() as f64;
        downside_variance.sqrt()
    };
    let sortino_ratio = if downside_std > 0.0 {
        excess_return / downside_std
    } else {
        0.0
    };

    let total_return: f64 = returns.iter().sum();
    let annualized_return = total_return * TRADING_DAYS_PER_YEAR / n;
    let calmar_ratio = saturated_ratio(annualized_return, drawdown.max_drawdown);
    let recovery_factor = saturated_ratio(total_return, drawdown.max_drawdown);

    let streaks = scan_streaks(&returns);

    RiskMetrics {
        total_trades: returns.len(),
        total_pnl: total_return,
        win_rate,
        avg_win,
        avg_loss,
        largest_win,
        largest_loss,
        profit_factor,
        expectancy,
        kelly_percentage,
        sharpe_ratio,
        sortino_ratio,
        calmar_ratio,
        recovery_factor,
        max_drawdown: drawdown.max_drawdown,
        max_drawdown_percent: drawdown.max_drawdown_percent,
        consecutive_wins: streaks.current_wins,
        consecutive_losses: streaks.current_losses,
        max_consecutive_wins: streaks.max_wins,
        max_consecutive_losses: streaks.max_losses,
    }
}

/// Divide, saturating at 999 when the denominator is zero and the
/// numerator positive, 0 otherwise.
fn saturated_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else if numerator > 0.0 {
        RATIO_SATURATION
    } else {
        0.0
    }
}

struct Streaks {
    current_wins: usize,
    current_losses: usize,
    max_wins: usize,
    max_losses: usize,
}

/// Single pass over the return series tracking win/loss runs.
///
/// A zero-P&L trade breaks a winning streak. The `current_*` counters
/// describe the streak active at the last trade, which is not
/// necessarily the longest one.
fn scan_streaks(returns: &[f64]) -> Streaks {
    let mut current_wins = 0;
    let mut current_losses = 0;
    let mut max_wins = 0;
    let mut max_losses = 0;

    for &r in returns {
        if r > 0.0 {
            current_wins += 1;
            current_losses = 0;
            max_wins = max_wins.max(current_wins);
        } else {
            current_losses += 1;
            current_wins = 0;
            max_losses = max_losses.max(current_losses);
        }
    }

    Streaks {
        current_wins,
        current_losses,
        max_wins,
        max_losses,
    }
}
