//! Hour-of-day entry and exit analysis over closed trades.

use crate::types::Position;
use chrono::Timelike;
use serde::{Deserialize, Serialize};

/// Performance of trades entered or exited during one hour of the day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyPerformance {
    /// Hour of the day, 0-23 (UTC)
    pub hour: u32,
    /// Mean realized P&L per trade
    pub avg_return: f64,
    pub trades: usize,
}

/// Entry and exit timing statistics, 24 rows each, zero-filled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryExitMetrics {
    /// Grouped by the hour of `opened_at`
    pub entry_hours: Vec<HourlyPerformance>,
    /// Grouped by the hour of `closed_at`
    pub exit_hours: Vec<HourlyPerformance>,
}

/// Group closed-trade returns by the hour the position was opened and the
/// hour it was closed. All 24 hours are always present in both tables.
pub fn calculate_entry_exit_metrics(positions: &[Position]) -> EntryExitMetrics {
    let mut entry_sums = [0.0_f64; 24];
    let mut entry_counts = [0_usize; 24];
    let mut exit_sums = [0.0_f64; 24];
    let mut exit_counts = [0_usize; 24];

    for position in positions.iter().filter(|p| p.is_closed()) {
        let (closed_at, pnl) = match (position.closed_at, position.total_realized_pnl) {
            (Some(closed_at), Some(pnl)) => (closed_at, pnl),
            _ => continue,
        };

        let entry = position.opened_at.hour() as usize;
        entry_sums[entry] += pnl;
        entry_counts[entry] += 1;

        let exit = closed_at.hour() as usize;
        exit_sums[exit] += pnl;
        exit_counts[exit] += 1;
    }

    EntryExitMetrics {
        entry_hours: hourly_table(&entry_sums, &entry_counts),
        exit_hours: hourly_table(&exit_sums, &exit_counts),
    }
}

fn hourly_table(sums: &[f64; 24], counts: &[usize; 24]) -> Vec<HourlyPerformance> {
    (0..24)
        .map(|hour| HourlyPerformance {
            hour: hour as u32,
            avg_return: if counts[hour] > 0 {
                sums[hour] / counts[hour] as f64
            } else {
                0.0
            },
            trades: counts[hour],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn trade(open_hour: u32, close_hour: u32, pnl: f64) -> Position {
        let opened = Utc.with_ymd_and_hms(2024, 1, 2, open_hour, 30, 0).unwrap();
        let closed = Utc.with_ymd_and_hms(2024, 1, 4, close_hour, 15, 0).unwrap();
        Position::closed("AAPL", opened, closed, pnl)
    }

    #[test]
    fn test_empty_input_is_zero_filled() {
        let metrics = calculate_entry_exit_metrics(&[]);
        assert_eq!(metrics.entry_hours.len(), 24);
        assert_eq!(metrics.exit_hours.len(), 24);
        for (hour, row) in metrics.entry_hours.iter().enumerate() {
            assert_eq!(row.hour, hour as u32);
            assert_eq!(row.trades, 0);
            assert_eq!(row.avg_return, 0.0);
        }
    }

    #[test]
    fn test_entry_and_exit_hours_grouped_independently() {
        let positions = vec![
            trade(9, 15, 100.0),
            trade(9, 10, -40.0),
            trade(14, 15, 60.0),
        ];
        let metrics = calculate_entry_exit_metrics(&positions);

        let nine = &metrics.entry_hours[9];
        assert_eq!(nine.trades, 2);
        assert_eq!(nine.avg_return, 30.0);

        let fourteen = &metrics.entry_hours[14];
        assert_eq!(fourteen.trades, 1);
        assert_eq!(fourteen.avg_return, 60.0);

        let fifteen = &metrics.exit_hours[15];
        assert_eq!(fifteen.trades, 2);
        assert_eq!(fifteen.avg_return, 80.0);

        let ten = &metrics.exit_hours[10];
        assert_eq!(ten.trades, 1);
        assert_eq!(ten.avg_return, -40.0);
    }

    #[test]
    fn test_open_positions_are_ignored() {
        let opened = Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap();
        let positions = vec![
            Position::open("AAPL", opened, 10.0, 150.0),
            trade(9, 15, 25.0),
        ];
        let metrics = calculate_entry_exit_metrics(&positions);
        assert_eq!(metrics.entry_hours[9].trades, 1);
    }
}
