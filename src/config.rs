// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_sector")]
    pub default_sector: String,
    #[serde(default = "default_benchmark")]
    pub benchmark_symbol: String,
    #[serde(default = "default_suffix")]
    pub symbol_suffix: String,
    #[serde(default = "default_history_years")]
    pub history_years: u32,
    #[serde(default = "default_timeout")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_directory_path")]
    pub directory_path: String,
}

fn default_sector() -> String {
    "Oil & Gas Refining & Marketing".to_string()
}

fn default_benchmark() -> String {
    "^NSEI".to_string()
}

fn default_suffix() -> String {
    ".NS".to_string()
}

fn default_history_years() -> u32 {
    6
}

fn default_timeout() -> u64 {
    30
}

fn default_directory_path() -> String {
    "static/companies.csv".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_sector: default_sector(),
            benchmark_symbol: default_benchmark(),
            symbol_suffix: default_suffix(),
            history_years: default_history_years(),
            fetch_timeout_secs: default_timeout(),
            directory_path: default_directory_path(),
        }
    }
}

fn get_config_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("config.toml");
    path
}

/// Load config.toml from the manifest root, falling back to defaults when
/// the file is missing.
pub fn load_config() -> anyhow::Result<Config> {
    let config_path = get_config_path();
    match fs::read_to_string(&config_path) {
        Ok(config_str) => match toml::from_str(&config_str) {
            Ok(config) => Ok(config),
            Err(e) => {
                eprintln!("Failed to parse config.toml: {}", e);
                Err(e.into())
            }
        },
        Err(_) => Ok(Config::default()),
    }
}

#[allow(dead_code)]
pub fn save_config(config: &Config) -> anyhow::Result<()> {
    let config_path = get_config_path();
    let config_str = toml::to_string_pretty(config)?;
    fs::write(config_path, config_str)?;
    Ok(())
}
