// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

//! Sector aggregation: per-company fetch + compute, merged into one ranked
//! table plus the aligned monthly-return matrix.
//!
//! Every company is processed independently; a failed or timed-out lookup
//! drops that company from both outputs and never aborts the sector.

use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tokio::time::timeout;

use crate::api::MarketData;
use crate::config::Config;
use crate::directory::CompanyEntry;
use crate::models::CompanySnapshot;
use crate::monthly::{
    MonthlyReturnTable, MonthlySeries, align_monthly_returns, monthly_percent_changes,
};
use crate::returns::{ReturnSummary, compute_returns, round2};

// Companies fetched concurrently per batch; results are still collected in
// input order, so output ordering never depends on completion order.
const FETCH_CHUNK_SIZE: usize = 8;

#[derive(Debug, Clone, Serialize)]
pub struct CompanyRow {
    pub symbol: String,
    pub name: String,
    /// Latest close, rounded to 2 decimals.
    pub price: f64,
    /// Raw market cap, the ranking key.
    pub market_cap: i64,
    /// Display scaling: market cap in crores (1 crore = 1e7).
    pub market_cap_crores: i64,
    pub forward_pe: Option<f64>,
    pub city: Option<String>,
    pub returns: ReturnSummary,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SectorTable {
    /// Ranked by market cap descending; ties keep directory order.
    pub rows: Vec<CompanyRow>,
    pub monthly: MonthlyReturnTable,
}

/// The benchmark index's own returns, rendered alongside the sector tables.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReturns {
    pub symbol: String,
    pub price: Option<f64>,
    pub returns: ReturnSummary,
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub history_years: u32,
    pub timeout: Duration,
    pub symbol_suffix: String,
}

impl FetchOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            history_years: config.history_years,
            timeout: Duration::from_secs(config.fetch_timeout_secs),
            symbol_suffix: config.symbol_suffix.clone(),
        }
    }
}

/// Build the ranked company table and the aligned monthly-return matrix for
/// one sector. Infallible by design: external failures shrink the output,
/// they do not propagate.
pub async fn build_sector_table<P: MarketData>(
    provider: &P,
    companies: &[CompanyEntry],
    opts: &FetchOptions,
) -> SectorTable {
    // Phase 1: snapshot lookups. Market cap is the mandatory ranking key, so
    // a failed lookup or an absent cap excludes the company entirely.
    let mut ranked: Vec<(CompanyEntry, CompanySnapshot, i64)> = Vec::new();
    for chunk in companies.chunks(FETCH_CHUNK_SIZE) {
        let lookups = chunk.iter().map(|company| async move {
            let query = company.query_symbol(&opts.symbol_suffix);
            match timeout(opts.timeout, provider.snapshot(&query)).await {
                Ok(Ok(snapshot)) => Some(snapshot),
                Ok(Err(e)) => {
                    eprintln!("⚠️  {}: snapshot unavailable: {}", company.symbol, e);
                    None
                }
                Err(_) => {
                    eprintln!("⚠️  {}: snapshot timed out", company.symbol);
                    None
                }
            }
        });
        let results = join_all(lookups).await;
        for (company, snapshot) in chunk.iter().zip(results) {
            let Some(snapshot) = snapshot else { continue };
            let Some(cap) = snapshot.market_cap else {
                eprintln!("⚠️  {}: no market cap, skipping", company.symbol);
                continue;
            };
            ranked.push((company.clone(), snapshot, cap));
        }
    }

    // Rank before fetching histories. The sort is stable, so equal caps keep
    // directory order, and the monthly columns follow this ranking.
    ranked.sort_by(|a, b| b.2.cmp(&a.2));

    // Phase 2: price histories, returns and the monthly series.
    let mut rows = Vec::new();
    let mut monthly_inputs: Vec<(String, MonthlySeries)> = Vec::new();
    for chunk in ranked.chunks(FETCH_CHUNK_SIZE) {
        let fetches = chunk.iter().map(|(company, _, _)| async move {
            let query = company.query_symbol(&opts.symbol_suffix);
            match timeout(opts.timeout, provider.daily_history(&query, opts.history_years)).await {
                Ok(Ok(bars)) => Some(bars),
                Ok(Err(e)) => {
                    eprintln!("⚠️  {}: price history unavailable: {}", company.symbol, e);
                    None
                }
                Err(_) => {
                    eprintln!("⚠️  {}: price history timed out", company.symbol);
                    None
                }
            }
        });
        let results = join_all(fetches).await;
        for ((company, snapshot, cap), bars) in chunk.iter().zip(results) {
            let Some(bars) = bars else { continue };
            let Some(last) = bars.last() else {
                eprintln!("⚠️  {}: empty price history, skipping", company.symbol);
                continue;
            };

            rows.push(CompanyRow {
                symbol: company.symbol.clone(),
                name: snapshot.name.clone().unwrap_or_else(|| company.name.clone()),
                price: round2(last.close),
                market_cap: *cap,
                market_cap_crores: scale_to_crores(*cap),
                forward_pe: snapshot.forward_pe.map(round2),
                city: snapshot.city.clone(),
                returns: compute_returns(&bars),
            });
            monthly_inputs.push((company.symbol.clone(), monthly_percent_changes(&bars)));
        }
    }

    SectorTable {
        rows,
        monthly: align_monthly_returns(&monthly_inputs),
    }
}

/// Fetch the benchmark index's history and compute its returns. A failed
/// fetch yields an all-absent summary rather than an error.
pub async fn benchmark_returns<P: MarketData>(
    provider: &P,
    symbol: &str,
    opts: &FetchOptions,
) -> BenchmarkReturns {
    match timeout(opts.timeout, provider.daily_history(symbol, opts.history_years)).await {
        Ok(Ok(bars)) => BenchmarkReturns {
            symbol: symbol.to_string(),
            price: bars.last().map(|b| round2(b.close)),
            returns: compute_returns(&bars),
        },
        _ => {
            eprintln!("⚠️  {}: benchmark history unavailable", symbol);
            BenchmarkReturns {
                symbol: symbol.to_string(),
                price: None,
                returns: ReturnSummary::default(),
            }
        }
    }
}

fn scale_to_crores(market_cap: i64) -> i64 {
    (market_cap as f64 / 1e7).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_cap_scales_to_crores() {
        assert_eq!(scale_to_crores(20_082_287_706_112), 2_008_229);
        assert_eq!(scale_to_crores(10_000_000), 1);
        assert_eq!(scale_to_crores(14_999_999), 1);
        assert_eq!(scale_to_crores(15_000_001), 2);
    }
}
