// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};

use sectorscope_rs::api::{MarketData, YahooClient};
use sectorscope_rs::config::{self, Config};
use sectorscope_rs::directory::SectorDirectory;
use sectorscope_rs::returns::ReturnPeriod;
use sectorscope_rs::sector::{FetchOptions, benchmark_returns, build_sector_table};
use sectorscope_rs::{export, web};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the ranked table for a sector and export it to CSV
    Sector {
        /// Sector name (defaults to the configured sector)
        name: Option<String>,
    },
    /// Look up snapshot fields for a ticker
    Ticker { symbol: String },
    /// List sectors in the directory
    ListSectors,
    /// Start the web server
    Serve {
        /// Port to bind to
        #[arg(long, default_value = "3000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_config()?;

    match cli.command {
        Some(Commands::Sector { name }) => {
            print_sector_table(&config, name.as_deref()).await?;
        }
        Some(Commands::Ticker { symbol }) => {
            print_ticker(&config, &symbol).await?;
        }
        Some(Commands::ListSectors) => {
            let directory = SectorDirectory::load(Path::new(&config.directory_path))?;
            for sector in directory.sectors() {
                println!("{}", sector);
            }
        }
        Some(Commands::Serve { port }) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "info,tower_http=debug".into()),
                )
                .init();

            let directory = SectorDirectory::load(Path::new(&config.directory_path))?;
            let client = YahooClient::from_env();
            let state = web::AppState::new(config, directory, client);
            web::server::start_server(state, port).await?;
        }
        None => {
            print_sector_table(&config, None).await?;
        }
    }

    Ok(())
}

async fn print_sector_table(config: &Config, name: Option<&str>) -> Result<()> {
    let directory = SectorDirectory::load(Path::new(&config.directory_path))?;
    let sector_name = name.unwrap_or(&config.default_sector);
    let companies = directory.in_sector(sector_name);
    if companies.is_empty() {
        println!("No companies found for sector: {}", sector_name);
        return Ok(());
    }

    let client = YahooClient::from_env();
    let opts = FetchOptions::from_config(config);

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_message(format!(
        "Fetching {} companies in {}...",
        companies.len(),
        sector_name
    ));
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));

    let table = build_sector_table(&client, &companies, &opts).await;
    let benchmark = benchmark_returns(&client, &config.benchmark_symbol, &opts).await;

    spinner.finish_and_clear();

    print!("{:<28} {:>10} {:>12}", "Name", "Price", "MCap (Cr)");
    for period in ReturnPeriod::ALL {
        print!(" {:>8}", period.label());
    }
    println!();

    for row in &table.rows {
        print!(
            "{:<28} {:>10.2} {:>12}",
            truncate(&row.name, 28),
            row.price,
            row.market_cap_crores
        );
        for (_, value) in row.returns.iter() {
            match value {
                Some(v) => print!(" {:>8.2}", v),
                None => print!(" {:>8}", "-"),
            }
        }
        println!();
    }

    println!();
    let label = format!("Benchmark {}", benchmark.symbol);
    match benchmark.price {
        Some(price) => print!("{:<28} {:>10.2} {:>12}", truncate(&label, 28), price, ""),
        None => print!("{:<28} {:>10} {:>12}", truncate(&label, 28), "-", ""),
    }
    for (_, value) in benchmark.returns.iter() {
        match value {
            Some(v) => print!(" {:>8.2}", v),
            None => print!(" {:>8}", "-"),
        }
    }
    println!();

    let filename = export::export_sector_csv(sector_name, &table)?;
    println!("✅ Sector table written to: {}", filename);

    Ok(())
}

async fn print_ticker(config: &Config, symbol: &str) -> Result<()> {
    let client = YahooClient::from_env();
    let query = format!("{}{}", symbol.trim().to_uppercase(), config.symbol_suffix);

    match client.snapshot(&query).await {
        Ok(snapshot) => {
            println!("Symbol:     {}", snapshot.symbol);
            println!(
                "Name:       {}",
                snapshot.name.unwrap_or_else(|| "-".to_string())
            );
            match snapshot.market_cap {
                Some(cap) => println!("Market cap: {} Cr", (cap as f64 / 1e7).round() as i64),
                None => println!("Market cap: -"),
            }
            if let Some(summary) = snapshot.business_summary {
                println!();
                println!("{}", summary);
            }
        }
        Err(e) => {
            eprintln!("⚠️  No data for {}: {}", query, e);
        }
    }

    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max - 1).collect::<String>() + "…"
    }
}
