// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

//! Static sector/company directory.
//!
//! A read-only CSV reference table mapping each tradable symbol to a sector
//! label. Loaded once per use; row order in the file defines presentation
//! order everywhere downstream.

use std::path::Path;

use anyhow::{Context, Result};
use csv::Reader;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyEntry {
    pub name: String,
    pub sector: String,
    pub symbol: String,
}

impl CompanyEntry {
    /// Provider-facing symbol: the exchange suffix (e.g. ".NS") appended to
    /// the bare directory symbol.
    pub fn query_symbol(&self, suffix: &str) -> String {
        format!("{}{}", self.symbol, suffix)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SectorDirectory {
    entries: Vec<CompanyEntry>,
}

impl SectorDirectory {
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open directory file: {}", path.display()))?;

        let mut reader = Reader::from_reader(file);
        let mut entries = Vec::new();
        for result in reader.deserialize() {
            let entry: CompanyEntry = result.context("Failed to parse directory row")?;
            entries.push(entry);
        }

        Ok(Self { entries })
    }

    /// Distinct sector labels in first-appearance order.
    pub fn sectors(&self) -> Vec<String> {
        let mut sectors: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !sectors.iter().any(|s| s == &entry.sector) {
                sectors.push(entry.sector.clone());
            }
        }
        sectors
    }

    /// Companies in one sector, in file order. An unknown sector is an empty
    /// result, not an error.
    pub fn in_sector(&self, sector: &str) -> Vec<CompanyEntry> {
        self.entries
            .iter()
            .filter(|e| e.sector == sector)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_directory() -> SectorDirectory {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "name,sector,symbol").unwrap();
        writeln!(file, "Reliance Industries,Oil & Gas,RELIANCE").unwrap();
        writeln!(file, "Tata Consultancy,IT Services,TCS").unwrap();
        writeln!(file, "Bharat Petroleum,Oil & Gas,BPCL").unwrap();
        SectorDirectory::load(file.path()).expect("Failed to load directory")
    }

    #[test]
    fn sectors_are_distinct_and_in_first_appearance_order() {
        let dir = sample_directory();
        assert_eq!(dir.sectors(), vec!["Oil & Gas", "IT Services"]);
    }

    #[test]
    fn in_sector_preserves_file_order() {
        let dir = sample_directory();
        let companies = dir.in_sector("Oil & Gas");
        let symbols: Vec<_> = companies.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["RELIANCE", "BPCL"]);
    }

    #[test]
    fn unknown_sector_is_empty_not_an_error() {
        let dir = sample_directory();
        assert!(dir.in_sector("Aquaculture").is_empty());
    }

    #[test]
    fn query_symbol_appends_exchange_suffix() {
        let dir = sample_directory();
        let company = &dir.in_sector("IT Services")[0];
        assert_eq!(company.query_symbol(".NS"), "TCS.NS");
        assert_eq!(company.query_symbol(""), "TCS");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(SectorDirectory::load(Path::new("does/not/exist.csv")).is_err());
    }
}
