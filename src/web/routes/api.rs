// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::json;

use crate::sector::{FetchOptions, build_sector_table};
use crate::web::state::AppState;

/// List all sectors in the directory
pub async fn list_sectors(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "sectors": state.directory.sectors()
    }))
}

/// Ranked table and monthly-return matrix for one sector
pub async fn get_sector(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<serde_json::Value> {
    // Unknown sectors yield empty tables, same as the HTML page.
    let companies = state.directory.in_sector(&name);
    let opts = FetchOptions::from_config(&state.config);
    let table = build_sector_table(&state.client, &companies, &opts).await;

    Json(json!({
        "sector": name,
        "rows": table.rows,
        "monthly": table.monthly
    }))
}
