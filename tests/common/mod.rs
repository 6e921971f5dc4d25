// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

//! Shared in-memory stand-in for the market-data provider.

#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Result, anyhow};
use chrono::{Duration as ChronoDuration, NaiveDate};

use sectorscope_rs::api::MarketData;
use sectorscope_rs::directory::CompanyEntry;
use sectorscope_rs::models::{CompanySnapshot, PriceBar};

#[derive(Default)]
pub struct StubMarket {
    pub snapshots: HashMap<String, CompanySnapshot>,
    pub histories: HashMap<String, Vec<PriceBar>>,
    /// Artificial latency on every call, for timeout tests.
    pub delay: Option<Duration>,
}

impl StubMarket {
    /// Register a fully healthy company: snapshot with the given market cap
    /// plus a daily history.
    pub fn add_company(&mut self, symbol: &str, market_cap: Option<i64>, bars: Vec<PriceBar>) {
        self.snapshots.insert(
            symbol.to_string(),
            CompanySnapshot {
                symbol: symbol.to_string(),
                name: Some(format!("{} Ltd", symbol)),
                market_cap,
                forward_pe: Some(21.5),
                city: Some("Mumbai".to_string()),
                business_summary: None,
            },
        );
        self.histories.insert(symbol.to_string(), bars);
    }
}

impl MarketData for StubMarket {
    async fn snapshot(&self, symbol: &str) -> Result<CompanySnapshot> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.snapshots
            .get(symbol)
            .cloned()
            .ok_or_else(|| anyhow!("no snapshot for {}", symbol))
    }

    async fn daily_history(&self, symbol: &str, _years: u32) -> Result<Vec<PriceBar>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.histories
            .get(symbol)
            .cloned()
            .ok_or_else(|| anyhow!("no history for {}", symbol))
    }
}

pub fn entry(name: &str, sector: &str, symbol: &str) -> CompanyEntry {
    CompanyEntry {
        name: name.to_string(),
        sector: sector.to_string(),
        symbol: symbol.to_string(),
    }
}

/// Daily bars starting 2020-01-01, one per day.
pub fn daily_bars(closes: &[f64]) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, close)| PriceBar {
            date: start + ChronoDuration::days(i as i64),
            close: *close,
        })
        .collect()
}
