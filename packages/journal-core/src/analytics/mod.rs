//! Portfolio analytics module.
//!
//! Pure, synchronous functions over an already-fetched position list.
//! Every call recomputes from scratch and returns freshly allocated
//! records; nothing here touches I/O or shared state, so the functions
//! are safe to call on every UI render.

mod entry_exit;
mod risk;
mod time_based;
mod timeline;

pub use entry_exit::{calculate_entry_exit_metrics, EntryExitMetrics, HourlyPerformance};
pub use risk::{calculate_risk_metrics, RiskMetrics, RATIO_SATURATION};
pub use time_based::{
    calculate_time_based_metrics, DayOfWeekPerformance, HoldingPeriodPerformance, MonthlyReturn,
    TimeBasedMetrics,
};
pub use timeline::{
    calculate_max_drawdown_from_timeline, calculate_portfolio_metrics,
    calculate_portfolio_timeline, Drawdown, PortfolioMetrics, PortfolioValuePoint,
};

use crate::types::Position;
use serde::{Deserialize, Serialize};

/// Every metrics family computed in one pass, for callers that render a
/// full dashboard at once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllMetrics {
    pub risk: RiskMetrics,
    pub time_based: TimeBasedMetrics,
    pub portfolio: PortfolioMetrics,
    pub entry_exit: EntryExitMetrics,
}

/// Compute risk, time-based, portfolio, and entry/exit metrics together.
pub fn calculate_all_metrics(positions: &[Position], account_balance: f64) -> AllMetrics {
    AllMetrics {
        risk: calculate_risk_metrics(positions, account_balance),
        time_based: calculate_time_based_metrics(positions),
        portfolio: calculate_portfolio_metrics(positions, account_balance),
        entry_exit: calculate_entry_exit_metrics(positions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 16, 0, 0).unwrap()
    }

    #[test]
    fn test_all_metrics_matches_individual_calls() {
        let positions = vec![
            Position::closed("AAPL", ts(2024, 1, 2), ts(2024, 1, 9), 100.0),
            Position::closed("TSLA", ts(2024, 1, 3), ts(2024, 1, 15), -50.0),
            Position::open("NVDA", ts(2024, 2, 1), 5.0, 800.0),
        ];
        let all = calculate_all_metrics(&positions, 10000.0);

        assert_eq!(all.risk, calculate_risk_metrics(&positions, 10000.0));
        assert_eq!(all.time_based, calculate_time_based_metrics(&positions));
        assert_eq!(
            all.portfolio,
            calculate_portfolio_metrics(&positions, 10000.0)
        );
        assert_eq!(all.entry_exit, calculate_entry_exit_metrics(&positions));
    }

    #[test]
    fn test_all_metrics_empty_input() {
        let all = calculate_all_metrics(&[], 10000.0);
        assert_eq!(all.risk.total_trades, 0);
        assert!(all.portfolio.timeline.is_empty());
        assert_eq!(all.entry_exit.entry_hours.len(), 24);
        assert_eq!(all.time_based.day_of_week.len(), 7);
    }
}
