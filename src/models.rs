// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily closing-price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// Snapshot fields for one company, as returned by the market-data provider.
///
/// Everything except the symbol is optional: the provider omits fields for
/// thinly covered instruments, and callers decide which absences are fatal
/// (market cap is the only mandatory ranking key).
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompanySnapshot {
    pub symbol: String,
    pub name: Option<String>,
    pub market_cap: Option<i64>,
    pub forward_pe: Option<f64>,
    pub city: Option<String>,
    pub business_summary: Option<String>,
}

// ============================================================================
// Provider wire formats (chart + quoteSummary endpoints)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub timestamp: Option<Vec<i64>>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    pub quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuote {
    pub close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: QuoteSummaryEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSummaryEnvelope {
    pub result: Option<Vec<QuoteSummaryResult>>,
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSummaryResult {
    pub price: Option<PriceModule>,
    #[serde(rename = "summaryDetail")]
    pub summary_detail: Option<SummaryDetailModule>,
    #[serde(rename = "summaryProfile")]
    pub summary_profile: Option<SummaryProfileModule>,
}

#[derive(Debug, Deserialize)]
pub struct PriceModule {
    #[serde(rename = "longName")]
    pub long_name: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    #[serde(rename = "marketCap")]
    pub market_cap: Option<RawNum>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryDetailModule {
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<RawNum>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryProfileModule {
    pub city: Option<String>,
    #[serde(rename = "longBusinessSummary")]
    pub long_business_summary: Option<String>,
}

/// The provider wraps every numeric field as `{"raw": ..., "fmt": "..."}`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawNum {
    pub raw: Option<f64>,
}

impl RawNum {
    pub fn value(&self) -> Option<f64> {
        self.raw
    }
}
