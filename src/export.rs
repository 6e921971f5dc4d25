// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

use anyhow::Result;
use chrono::Local;

use crate::returns::ReturnPeriod;
use crate::sector::SectorTable;

/// Write a ranked sector table to a timestamped CSV under output/ and return
/// the filename.
pub fn export_sector_csv(sector: &str, table: &SectorTable) -> Result<String> {
    std::fs::create_dir_all("output")?;

    let slug: String = sector
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("output/sector_{}_{}.csv", slug, timestamp);

    let file = std::fs::File::create(&filename)?;
    let mut writer = csv::Writer::from_writer(file);

    let mut headers = vec![
        "Name".to_string(),
        "Symbol".to_string(),
        "Price".to_string(),
        "Market Cap (Cr)".to_string(),
        "Forward P/E".to_string(),
        "City".to_string(),
    ];
    headers.extend(ReturnPeriod::ALL.iter().map(|p| p.label().to_string()));
    writer.write_record(&headers)?;

    for row in &table.rows {
        let mut record = vec![
            row.name.clone(),
            row.symbol.clone(),
            row.price.to_string(),
            row.market_cap_crores.to_string(),
            row.forward_pe.map(|v| v.to_string()).unwrap_or_default(),
            row.city.clone().unwrap_or_default(),
        ];
        record.extend(
            row.returns
                .iter()
                .map(|(_, value)| value.map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;

    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_name_slug_is_filesystem_safe() {
        let slug: String = "Oil & Gas Refining & Marketing"
            .chars()
            .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        assert_eq!(slug, "oil___gas_refining___marketing");
    }
}
