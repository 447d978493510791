//! Probe CLI - walk the upstream API and print normalized rosters.
//!
//! Handy for checking what a token can see without starting the server:
//! `cargo run --bin probe -- --base-url https://api.example.com/v4 --token <token>`

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use chrono::Utc;
use clap::Parser;

use circleview_api::aggregate::Aggregator;
use circleview_api::analytics;
use circleview_api::upstream::HttpCircleClient;

/// Print normalized rosters and per-circle statistics.
#[derive(Parser)]
#[command(name = "probe")]
#[command(about = "Inspect normalized circle data from the command line", long_about = None)]
struct Cli {
    /// Upstream API base URL
    #[arg(long)]
    base_url: String,

    /// Bearer token (falls back to the CV_UPSTREAM__TOKEN environment variable)
    #[arg(long)]
    token: Option<String>,

    /// Maximum concurrent roster fetches
    #[arg(long, default_value_t = 4)]
    fan_out: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let token = cli
        .token
        .or_else(|| std::env::var("CV_UPSTREAM__TOKEN").ok())
        .ok_or("pass --token or set CV_UPSTREAM__TOKEN")?;

    let client = HttpCircleClient::new(cli.base_url, token);
    let aggregator = Aggregator::new(&client, cli.fan_out);

    let rosters = aggregator.rosters().await?;
    let now_epoch = Utc::now().timestamp();

    for roster in &rosters {
        println!("{} ({} members)", roster.circle.name, roster.members.len());

        for member in &roster.members {
            let battery = member
                .location
                .as_ref()
                .and_then(|location| location.battery)
                .map_or_else(|| "-".to_string(), |pct| format!("{pct}%"));
            let place = member
                .location
                .as_ref()
                .and_then(|location| location.name.clone())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {:<24} {:?} battery {} at {}",
                member.full_name, member.status, battery, place
            );
        }

        let stats = analytics::circle_statistics(&roster.circle, &roster.members, now_epoch);
        println!(
            "  active {}/{} avg battery {}",
            stats.active_members,
            stats.total_members,
            stats
                .average_battery
                .map_or_else(|| "-".to_string(), |avg| format!("{avg}")),
        );
        println!();
    }

    Ok(())
}
