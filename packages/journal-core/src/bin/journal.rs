//! Journal CLI - Command line interface for trading-journal analytics.
//!
//! Reads a positions JSON file (the journal backend payload saved to
//! disk) and prints the requested metrics as JSON.

use clap::{Parser, Subcommand};
use journal_core::{
    calculate_all_metrics, calculate_entry_exit_metrics, calculate_max_drawdown_from_timeline,
    calculate_portfolio_metrics, calculate_portfolio_timeline, calculate_risk_metrics,
    calculate_time_based_metrics, load_positions, ApiResponse, Position,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "journal")]
#[command(about = "Trading journal CLI - portfolio analytics over position records")]
#[command(version)]
struct Cli {
    /// Path to the positions JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Starting account balance
    #[arg(short, long, default_value = "10000")]
    balance: f64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Risk and return metrics over closed trades
    Risk,
    /// Portfolio value timeline and drawdown
    Timeline,
    /// Monthly, day-of-week, and holding-period breakdowns
    TimeBased,
    /// Entry and exit hour-of-day analysis
    EntryExit,
    /// Every metrics family at once
    All,
}

fn main() {
    let cli = Cli::parse();

    let positions = match load_positions(&cli.input) {
        Ok(positions) => positions,
        Err(e) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string()))
                    .unwrap_or_default()
            );
            std::process::exit(1);
        }
    };

    let output = match cli.command {
        Commands::Risk => render(calculate_risk_metrics(&positions, cli.balance)),
        Commands::Timeline => handle_timeline(&positions, cli.balance),
        Commands::TimeBased => render(calculate_time_based_metrics(&positions)),
        Commands::EntryExit => render(calculate_entry_exit_metrics(&positions)),
        Commands::All => render(calculate_all_metrics(&positions, cli.balance)),
    };

    println!("{}", output);
}

fn handle_timeline(positions: &[Position], balance: f64) -> String {
    let timeline = calculate_portfolio_timeline(positions, balance);
    let drawdown = calculate_max_drawdown_from_timeline(&timeline);
    let portfolio = calculate_portfolio_metrics(positions, balance);

    serde_json::to_string_pretty(&ApiResponse::ok(json!({
        "timeline": timeline,
        "drawdown": drawdown,
        "current_balance": portfolio.current_balance,
        "total_return_percent": portfolio.total_return_percent,
    })))
    .unwrap_or_default()
}

fn render<T: Serialize>(data: T) -> String {
    serde_json::to_string_pretty(&ApiResponse::ok(data)).unwrap_or_default()
}
