// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::api::YahooClient;
use crate::config::Config;
use crate::directory::SectorDirectory;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub directory: Arc<SectorDirectory>,
    pub client: YahooClient,
}

impl AppState {
    pub fn new(config: Config, directory: SectorDirectory, client: YahooClient) -> Self {
        Self {
            config,
            directory: Arc::new(directory),
            client,
        }
    }
}
