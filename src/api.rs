// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

//! Market-data provider client.
//!
//! Talks to a Yahoo-Finance-style HTTP API: `/v8/finance/chart` for daily
//! close histories and `/v10/finance/quoteSummary` for snapshot fields.
//! The `MarketData` trait is the seam the aggregator and the tests use, so
//! everything downstream also runs against an in-memory stub.

use std::{env, time::Duration};

use anyhow::{Context, Result};
use chrono::DateTime;
use reqwest::Client;
use tokio::time::sleep;

use crate::models::{ChartResponse, CompanySnapshot, PriceBar, QuoteSummaryResponse};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// The provider rejects requests without a browser-ish user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Read access to the external market-data provider.
#[allow(async_fn_in_trait)]
pub trait MarketData {
    /// Snapshot info for one symbol. Any field other than the symbol may be
    /// absent; an unresolvable symbol is an `Err`.
    async fn snapshot(&self, symbol: &str) -> Result<CompanySnapshot>;

    /// Chronological daily close series covering the trailing `years` window.
    async fn daily_history(&self, symbol: &str, years: u32) -> Result<Vec<PriceBar>>;
}

#[derive(Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Honors `SECTORSCOPE_BASE_URL` so tests can point the client at a
    /// local server.
    pub fn from_env() -> Self {
        match env::var("SECTORSCOPE_BASE_URL") {
            Ok(url) => Self::with_base_url(url),
            Err(_) => Self::new(),
        }
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketData for YahooClient {
    async fn snapshot(&self, symbol: &str) -> Result<CompanySnapshot> {
        if symbol.is_empty() {
            anyhow::bail!("symbol empty");
        }

        // Small delay to stay within the provider's request budget.
        sleep(Duration::from_millis(200)).await;

        let url = format!(
            "{}/v10/finance/quoteSummary/{}?modules=price,summaryDetail,summaryProfile",
            self.base_url, symbol
        );

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .context("Failed to send quoteSummary request")?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to get response text")?;

        if !status.is_success() {
            anyhow::bail!("quoteSummary request failed: {} - {}", status, text);
        }

        let parsed: QuoteSummaryResponse =
            serde_json::from_str(&text).context("Failed to parse quoteSummary response")?;

        let result = parsed
            .quote_summary
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .with_context(|| format!("No quoteSummary data for {}", symbol))?;

        let mut snapshot = CompanySnapshot {
            symbol: symbol.to_string(),
            ..Default::default()
        };

        if let Some(price) = result.price {
            snapshot.name = price.long_name.or(price.short_name);
            snapshot.market_cap = price.market_cap.and_then(|v| v.value()).map(|v| v as i64);
        }
        if let Some(detail) = result.summary_detail {
            snapshot.forward_pe = detail.forward_pe.and_then(|v| v.value());
        }
        if let Some(profile) = result.summary_profile {
            snapshot.city = profile.city;
            snapshot.business_summary = profile.long_business_summary;
        }

        Ok(snapshot)
    }

    async fn daily_history(&self, symbol: &str, years: u32) -> Result<Vec<PriceBar>> {
        if symbol.is_empty() {
            anyhow::bail!("symbol empty");
        }

        sleep(Duration::from_millis(200)).await;

        let url = format!(
            "{}/v8/finance/chart/{}?range={}y&interval=1d",
            self.base_url, symbol, years
        );

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .context("Failed to send chart request")?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to get response text")?;

        if !status.is_success() {
            anyhow::bail!("chart request failed: {} - {}", status, text);
        }

        let parsed: ChartResponse =
            serde_json::from_str(&text).context("Failed to parse chart response")?;

        let result = parsed
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .with_context(|| format!("No chart data for {}", symbol))?;

        let timestamps = result.timestamp.unwrap_or_default();
        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .and_then(|q| q.close)
            .unwrap_or_default();

        let mut bars: Vec<PriceBar> = Vec::with_capacity(timestamps.len());
        for (ts, close) in timestamps.into_iter().zip(closes) {
            let Some(close) = close else {
                // Null closes appear for suspended sessions; skip them.
                continue;
            };
            let Some(dt) = DateTime::from_timestamp(ts, 0) else {
                continue;
            };
            let date = dt.date_naive();
            // Intraday timestamps can land on the same trading day; keep the
            // latest close.
            match bars.last_mut() {
                Some(last) if last.date == date => last.close = close,
                _ => bars.push(PriceBar { date, close }),
            }
        }

        Ok(bars)
    }
}
