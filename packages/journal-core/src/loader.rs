//! Position list loading from JSON files.
//!
//! The journal backend returns positions as JSON; for CLI use the same
//! payload is read from disk. Both a bare array and an object wrapping
//! the array under `"positions"` are accepted, matching the two response
//! shapes the backend has used.

use crate::types::Position;
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Read a position list from a JSON file.
pub fn load_positions(path: impl AsRef<Path>) -> Result<Vec<Position>> {
    let content = fs::read_to_string(path)?;
    parse_positions(&content)
}

/// Parse a position list from a JSON string.
pub fn parse_positions(content: &str) -> Result<Vec<Position>> {
    let data: serde_json::Value = serde_json::from_str(content)?;

    // Wrapped shape: {"positions": [...]}
    if let Some(wrapped) = data.get("positions") {
        return Ok(serde_json::from_value(wrapped.clone())?);
    }

    if data.is_array() {
        return Ok(serde_json::from_value(data)?);
    }

    Err(Error::InvalidInput(
        "expected a JSON array of positions or an object with a \"positions\" field".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PositionStatus;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BARE_ARRAY: &str = r#"[
        {
            "ticker": "AAPL",
            "status": "closed",
            "opened_at": "2024-01-02T14:30:00Z",
            "closed_at": "2024-01-09T20:00:00Z",
            "current_shares": 0.0,
            "avg_entry_price": 150.0,
            "total_cost": 1500.0,
            "total_realized_pnl": 120.0
        },
        {
            "ticker": "NVDA",
            "status": "open",
            "opened_at": "2024-03-01T14:30:00Z",
            "current_shares": 5.0,
            "avg_entry_price": 800.0,
            "total_cost": 4000.0,
            "events": [
                {"event_type": "buy", "event_date": "2024-03-01T14:30:00Z", "shares": 5.0, "price": 800.0}
            ]
        }
    ]"#;

    #[test]
    fn test_parse_bare_array() {
        let positions = parse_positions(BARE_ARRAY).unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].status, PositionStatus::Closed);
        assert_eq!(positions[1].events.len(), 1);
    }

    #[test]
    fn test_parse_wrapped_object() {
        let wrapped = format!(r#"{{"positions": {}}}"#, BARE_ARRAY);
        let positions = parse_positions(&wrapped).unwrap();
        assert_eq!(positions.len(), 2);
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        let result = parse_positions(r#"{"tickers": ["AAPL"]}"#);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(BARE_ARRAY.as_bytes()).unwrap();

        let positions = load_positions(file.path()).unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].ticker, "AAPL");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_positions("/nonexistent/positions.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
