//! Core data types for the trading journal analytics core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a journaled position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PositionStatus {
    Open,
    Closed,
}

/// Direction of a single fill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Buy,
    Sell,
}

/// A single buy or sell fill attached to a position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionEvent {
    /// Buy or sell
    pub event_type: EventKind,
    /// When the fill was executed
    pub event_date: DateTime<Utc>,
    /// Number of shares filled (positive)
    pub shares: f64,
    /// Price per share (positive)
    pub price: f64,
    /// Realized P&L for this fill (set only for sells)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realized_pnl: Option<f64>,
}

impl PositionEvent {
    /// Create a buy fill.
    pub fn buy(event_date: DateTime<Utc>, shares: f64, price: f64) -> Self {
        Self {
            event_type: EventKind::Buy,
            event_date,
            shares,
            price,
            realized_pnl: None,
        }
    }

    /// Create a sell fill with its realized P&L.
    pub fn sell(event_date: DateTime<Utc>, shares: f64, price: f64, realized_pnl: f64) -> Self {
        Self {
            event_type: EventKind::Sell,
            event_date,
            shares,
            price,
            realized_pnl: Some(realized_pnl),
        }
    }
}

/// A ticker-level position aggregate as stored by the journal backend.
///
/// `events` is empty when the backend did not attach fill history; the
/// analytics fall back to the position-level aggregate fields in that case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    /// Ticker symbol (uppercase)
    pub ticker: String,
    /// Open or closed
    pub status: PositionStatus,
    /// When the position was opened
    pub opened_at: DateTime<Utc>,
    /// When the position was fully closed (closed positions only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    /// Shares currently held
    pub current_shares: f64,
    /// Average entry price per share
    pub avg_entry_price: f64,
    /// Total cost basis
    pub total_cost: f64,
    /// Realized P&L to date (null if nothing has been sold)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_realized_pnl: Option<f64>,
    /// Individual fills, when the backend attached them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<PositionEvent>,
}

impl Position {
    /// Create an open position with no fill history.
    pub fn open(ticker: &str, opened_at: DateTime<Utc>, shares: f64, entry_price: f64) -> Self {
        Self {
            ticker: ticker.to_uppercase(),
            status: PositionStatus::Open,
            opened_at,
            closed_at: None,
            current_shares: shares,
            avg_entry_price: entry_price,
            total_cost: shares * entry_price,
            total_realized_pnl: None,
            events: Vec::new(),
        }
    }

    /// Create a closed position with its final realized P&L.
    pub fn closed(
        ticker: &str,
        opened_at: DateTime<Utc>,
        closed_at: DateTime<Utc>,
        realized_pnl: f64,
    ) -> Self {
        Self {
            ticker: ticker.to_uppercase(),
            status: PositionStatus::Closed,
            opened_at,
            closed_at: Some(closed_at),
            current_shares: 0.0,
            avg_entry_price: 0.0,
            total_cost: 0.0,
            total_realized_pnl: Some(realized_pnl),
            events: Vec::new(),
        }
    }

    /// Attach fill history.
    pub fn with_events(mut self, events: Vec<PositionEvent>) -> Self {
        self.events = events;
        self
    }

    /// Whether the position is closed.
    pub fn is_closed(&self) -> bool {
        self.status == PositionStatus::Closed
    }

    /// Whole days between open and close, if the position is closed.
    pub fn holding_days(&self) -> Option<i64> {
        self.closed_at
            .map(|closed| (closed.date_naive() - self.opened_at.date_naive()).num_days())
    }

    /// Net shares implied by the fill history (buys minus sells).
    ///
    /// For well-formed records this equals `current_shares`; the check is
    /// only meaningful when `events` is non-empty.
    pub fn event_share_balance(&self) -> f64 {
        self.events
            .iter()
            .map(|e| match e.event_type {
                EventKind::Buy => e.shares,
                EventKind::Sell => -e.shares,
            })
            .sum()
    }
}

/// API response wrapper for CLI JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_position_open() {
        let pos = Position::open("aapl", ts(2024, 1, 2), 10.0, 150.0);
        assert_eq!(pos.ticker, "AAPL");
        assert_eq!(pos.status, PositionStatus::Open);
        assert_eq!(pos.total_cost, 1500.0);
        assert!(pos.closed_at.is_none());
        assert!(pos.total_realized_pnl.is_none());
        assert!(pos.events.is_empty());
    }

    #[test]
    fn test_position_closed_invariant() {
        let pos = Position::closed("TSLA", ts(2024, 1, 2), ts(2024, 1, 9), 250.0);
        assert!(pos.is_closed());
        assert!(pos.closed_at.is_some());
        assert_eq!(pos.total_realized_pnl, Some(250.0));
    }

    #[test]
    fn test_holding_days() {
        let pos = Position::closed("TSLA", ts(2024, 1, 2), ts(2024, 1, 9), 250.0);
        assert_eq!(pos.holding_days(), Some(7));

        let open = Position::open("AAPL", ts(2024, 1, 2), 10.0, 150.0);
        assert_eq!(open.holding_days(), None);
    }

    #[test]
    fn test_event_share_balance() {
        let pos = Position::open("NVDA", ts(2024, 3, 1), 5.0, 800.0).with_events(vec![
            PositionEvent::buy(ts(2024, 3, 1), 10.0, 800.0),
            PositionEvent::sell(ts(2024, 3, 5), 5.0, 850.0, 250.0),
        ]);
        assert_eq!(pos.event_share_balance(), pos.current_shares);
    }

    #[test]
    fn test_position_json_round_trip() {
        let json = r#"{
            "ticker": "AAPL",
            "status": "closed",
            "opened_at": "2024-01-02T14:30:00Z",
            "closed_at": "2024-01-09T20:00:00Z",
            "current_shares": 0.0,
            "avg_entry_price": 150.0,
            "total_cost": 1500.0,
            "total_realized_pnl": 120.0
        }"#;
        let pos: Position = serde_json::from_str(json).unwrap();
        assert_eq!(pos.status, PositionStatus::Closed);
        assert!(pos.events.is_empty()); // events field is optional
        assert_eq!(pos.total_realized_pnl, Some(120.0));
    }

    #[test]
    fn test_event_kind_lowercase() {
        let event: PositionEvent = serde_json::from_str(
            r#"{"event_type":"sell","event_date":"2024-03-05T15:00:00Z","shares":5.0,"price":850.0,"realized_pnl":250.0}"#,
        )
        .unwrap();
        assert_eq!(event.event_type, EventKind::Sell);
        assert_eq!(event.realized_pnl, Some(250.0));
    }

    #[test]
    fn test_api_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test".to_string());
        assert!(response.ok);
        assert_eq!(response.data, Some("test".to_string()));

        let err_response: ApiResponse<String> = ApiResponse::err("error");
        assert!(!err_response.ok);
        assert_eq!(err_response.error, Some("error".to_string()));
    }
}
