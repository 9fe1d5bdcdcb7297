//! Journal Core - Portfolio analytics for a trading journal.
//!
//! This crate implements the client-side analytics of a trading journal
//! as a library of pure functions over fetched position records:
//!
//! - **Portfolio timeline**: per-date replay of realized P&L and
//!   portfolio value from open/close/fill events
//! - **Drawdown**: peak-to-trough loss over the reconstructed timeline
//! - **Risk metrics**: win rate, profit factor, expectancy, Kelly %,
//!   Sharpe/Sortino/Calmar ratios, streak statistics
//! - **Time segmentation**: monthly, day-of-week, holding-period, and
//!   hour-of-day groupings of closed-trade returns
//!
//! All functions take immutable slices and return freshly allocated
//! records; none of them can fail. Sparse or empty trading history
//! produces zero-valued results so a rendering caller never needs to
//! special-case "no data yet".
//!
//! # Example
//!
//! ```rust
//! use journal_core::{calculate_all_metrics, Position};
//! use chrono::{TimeZone, Utc};
//!
//! let positions = vec![
//!     Position::closed(
//!         "AAPL",
//!         Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap(),
//!         Utc.with_ymd_and_hms(2024, 1, 9, 20, 0, 0).unwrap(),
//!         120.0,
//!     ),
//! ];
//!
//! let metrics = calculate_all_metrics(&positions, 10_000.0);
//! assert_eq!(metrics.risk.total_trades, 1);
//! assert_eq!(metrics.portfolio.current_balance, 10_120.0);
//! ```

pub mod analytics;
pub mod loader;
pub mod types;

// Re-export commonly used types
pub use types::{ApiResponse, EventKind, Position, PositionEvent, PositionStatus};

// Re-export main functionality
pub use analytics::{
    calculate_all_metrics, calculate_entry_exit_metrics, calculate_max_drawdown_from_timeline,
    calculate_portfolio_metrics, calculate_portfolio_timeline, calculate_risk_metrics,
    calculate_time_based_metrics, AllMetrics, Drawdown, EntryExitMetrics, PortfolioMetrics,
    PortfolioValuePoint, RiskMetrics, TimeBasedMetrics,
};
pub use loader::{load_positions, parse_positions};

/// Error types for journal-core operations.
///
/// The analytics functions themselves never return errors; this type
/// covers loading position JSON for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for journal-core operations.
pub type Result<T> = std::result::Result<T, Error>;
