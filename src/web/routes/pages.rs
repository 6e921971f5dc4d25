// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use serde::Deserialize;

use crate::api::MarketData;
use crate::sector::{BenchmarkReturns, CompanyRow, FetchOptions, benchmark_returns, build_sector_table};
use crate::web::state::AppState;

/// One rendered table cell: display text plus a sign-keyed CSS class
/// ("pos", "neg" or empty). Absent values render as empty cells.
struct CellView {
    text: String,
    class: &'static str,
}

struct RowView {
    name: String,
    symbol: String,
    price: String,
    market_cap: String,
    forward_pe: String,
    city: String,
    returns: Vec<CellView>,
}

struct MonthlyRowView {
    month: String,
    cells: Vec<CellView>,
}

struct BenchmarkView {
    symbol: String,
    price: String,
    returns: Vec<CellView>,
}

#[derive(Template)]
#[template(path = "index.html")]
struct DashboardTemplate {
    selected_sector: String,
    sectors: Vec<String>,
    period_labels: Vec<&'static str>,
    rows: Vec<RowView>,
    monthly_symbols: Vec<String>,
    monthly_rows: Vec<MonthlyRowView>,
    benchmark: BenchmarkView,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub sector: Option<String>,
}

/// Sector dashboard page
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, StatusCode> {
    let sectors = state.directory.sectors();
    let selected_sector = query
        .sector
        .unwrap_or_else(|| state.config.default_sector.clone());

    // An unknown sector gives an empty company list and renders as an empty
    // table, not an error page.
    let companies = state.directory.in_sector(&selected_sector);
    let opts = FetchOptions::from_config(&state.config);

    tracing::debug!(
        sector = %selected_sector,
        companies = companies.len(),
        "building sector table"
    );

    let table = build_sector_table(&state.client, &companies, &opts).await;
    let benchmark = benchmark_returns(&state.client, &state.config.benchmark_symbol, &opts).await;

    let monthly_symbols = table
        .monthly
        .columns
        .iter()
        .map(|c| c.symbol.clone())
        .collect();
    let monthly_rows = table
        .monthly
        .months
        .iter()
        .enumerate()
        .map(|(i, month)| MonthlyRowView {
            month: month.format("%Y-%m-%d").to_string(),
            cells: table
                .monthly
                .columns
                .iter()
                .map(|col| fraction_cell(col.cells[i]))
                .collect(),
        })
        .collect();

    let template = DashboardTemplate {
        selected_sector,
        sectors,
        period_labels: crate::returns::ReturnPeriod::ALL
            .iter()
            .map(|p| p.label())
            .collect(),
        rows: table.rows.iter().map(row_view).collect(),
        monthly_symbols,
        monthly_rows,
        benchmark: benchmark_view(&benchmark),
    };

    Ok(Html(
        template
            .render()
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?,
    ))
}

#[derive(Template)]
#[template(path = "stock.html")]
struct StockTemplate {
    query: String,
    result: Option<StockView>,
    error: Option<String>,
}

struct StockView {
    symbol: String,
    name: String,
    market_cap_crores: String,
    summary: String,
}

#[derive(Debug, Deserialize)]
pub struct StockQuery {
    #[serde(rename = "inputText")]
    pub input_text: Option<String>,
}

/// Free-text ticker lookup page
pub async fn stock(
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> Result<Html<String>, StatusCode> {
    let input = query.input_text.unwrap_or_default().trim().to_uppercase();

    let (result, error) = if input.is_empty() {
        (None, None)
    } else {
        let symbol = format!("{}{}", input, state.config.symbol_suffix);
        match state.client.snapshot(&symbol).await {
            Ok(snapshot) => (
                Some(StockView {
                    symbol: snapshot.symbol.clone(),
                    name: snapshot.name.unwrap_or_else(|| snapshot.symbol.clone()),
                    market_cap_crores: snapshot
                        .market_cap
                        .map(|cap| format!("{}", (cap as f64 / 1e7).round() as i64))
                        .unwrap_or_default(),
                    summary: snapshot.business_summary.unwrap_or_default(),
                }),
                None,
            ),
            // Lookup failure is user-visible, not a 5xx.
            Err(_) => (None, Some(format!("No data found for {}", symbol))),
        }
    };

    let template = StockTemplate {
        query: input,
        result,
        error,
    };

    Ok(Html(
        template
            .render()
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?,
    ))
}

fn row_view(row: &CompanyRow) -> RowView {
    RowView {
        name: row.name.clone(),
        symbol: row.symbol.clone(),
        price: format!("{:.2}", row.price),
        market_cap: row.market_cap_crores.to_string(),
        forward_pe: row.forward_pe.map(|v| format!("{:.2}", v)).unwrap_or_default(),
        city: row.city.clone().unwrap_or_default(),
        returns: row
            .returns
            .iter()
            .map(|(_, value)| percent_cell(value))
            .collect(),
    }
}

fn benchmark_view(benchmark: &BenchmarkReturns) -> BenchmarkView {
    BenchmarkView {
        symbol: benchmark.symbol.clone(),
        price: benchmark
            .price
            .map(|p| format!("{:.2}", p))
            .unwrap_or_default(),
        returns: benchmark
            .returns
            .iter()
            .map(|(_, value)| percent_cell(value))
            .collect(),
    }
}

// Trailing returns arrive as percentages rounded to 2 decimals.
fn percent_cell(value: Option<f64>) -> CellView {
    match value {
        Some(v) => CellView {
            text: format!("{:.2}", v),
            class: sign_class(v),
        },
        None => CellView {
            text: String::new(),
            class: "",
        },
    }
}

// Monthly changes arrive as fractions; scale to percent for display.
fn fraction_cell(value: Option<f64>) -> CellView {
    match value {
        Some(v) => CellView {
            text: format!("{:.2}", v * 100.0),
            class: sign_class(v),
        },
        None => CellView {
            text: String::new(),
            class: "",
        },
    }
}

fn sign_class(value: f64) -> &'static str {
    if value >= 0.0 { "pos" } else { "neg" }
}
