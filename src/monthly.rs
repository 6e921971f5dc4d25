// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

//! Monthly percent-change series and cross-company alignment.
//!
//! Each company's daily history is resampled to one close per calendar month
//! (the last trading day's close), turned into month-over-month fractional
//! changes, and then aligned with every other company's series into a single
//! table keyed by month-end date.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::PriceBar;

/// One company's sparse monthly series: (month-end date, fractional change).
pub type MonthlySeries = Vec<(NaiveDate, f64)>;

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyColumn {
    pub symbol: String,
    /// One cell per row of the parent table's `months`; `None` where the
    /// company has no data for that month.
    pub cells: Vec<Option<f64>>,
}

/// Monthly returns for many companies on a shared month axis.
///
/// Rows are the union of every input series' month-end dates (never the
/// intersection: a company with a short history does not truncate the rest).
#[derive(Debug, Clone, Default, Serialize)]
pub struct MonthlyReturnTable {
    pub months: Vec<NaiveDate>,
    pub columns: Vec<MonthlyColumn>,
}

impl MonthlyReturnTable {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Calendar month-end date for the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (next_y, next_m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // First of next month always exists.
    NaiveDate::from_ymd_opt(next_y, next_m, 1).unwrap() - Duration::days(1)
}

/// Resample a daily series to monthly percent changes: last close per
/// calendar month, fractional change from the prior month's last close.
///
/// The first month has no prior close and is omitted, so a series spanning
/// `n` months yields `n - 1` entries. Values are fractions (0.0134 = +1.34%);
/// formatting belongs to the presentation layer.
pub fn monthly_percent_changes(series: &[PriceBar]) -> MonthlySeries {
    // Last close per month, in chronological order. The input is sorted, so
    // overwriting within a month keeps the final trading day's close.
    let mut closes: Vec<(NaiveDate, f64)> = Vec::new();
    for bar in series {
        let me = month_end(bar.date);
        match closes.last_mut() {
            Some((last_me, close)) if *last_me == me => *close = bar.close,
            _ => closes.push((me, bar.close)),
        }
    }

    let mut changes = Vec::new();
    for pair in closes.windows(2) {
        let (_, prev) = pair[0];
        let (me, curr) = pair[1];
        if prev > 0.0 {
            changes.push((me, (curr - prev) / prev));
        }
    }
    changes
}

/// Align many companies' monthly series into one table.
///
/// Column order follows the input order; the month axis is the sorted union
/// of all input dates. Zero inputs produce an empty table, and a single
/// input reproduces that series unchanged.
pub fn align_monthly_returns(inputs: &[(String, MonthlySeries)]) -> MonthlyReturnTable {
    let months: Vec<NaiveDate> = inputs
        .iter()
        .flat_map(|(_, series)| series.iter().map(|(date, _)| *date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let columns = inputs
        .iter()
        .map(|(symbol, series)| {
            let by_month: HashMap<NaiveDate, f64> = series.iter().copied().collect();
            MonthlyColumn {
                symbol: symbol.clone(),
                cells: months.iter().map(|m| by_month.get(m).copied()).collect(),
            }
        })
        .collect();

    MonthlyReturnTable { months, columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn bar(y: i32, m: u32, day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: d(y, m, day),
            close,
        }
    }

    #[test]
    fn month_end_handles_december_and_leap_years() {
        assert_eq!(month_end(d(2024, 12, 15)), d(2024, 12, 31));
        assert_eq!(month_end(d(2024, 2, 3)), d(2024, 2, 29));
        assert_eq!(month_end(d(2023, 2, 3)), d(2023, 2, 28));
    }

    #[test]
    fn resample_takes_last_close_of_each_month() {
        let series = vec![
            bar(2024, 1, 2, 100.0),
            bar(2024, 1, 31, 110.0),
            bar(2024, 2, 1, 108.0),
            bar(2024, 2, 29, 121.0),
        ];
        let changes = monthly_percent_changes(&series);
        // January close 110 -> February close 121 is +10%.
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0, d(2024, 2, 29));
        assert_relative_eq!(changes[0].1, 0.10, epsilon = 1e-12);
    }

    #[test]
    fn first_month_has_no_change() {
        let series = vec![bar(2024, 1, 2, 100.0), bar(2024, 1, 31, 110.0)];
        assert!(monthly_percent_changes(&series).is_empty());
        assert!(monthly_percent_changes(&[]).is_empty());
    }

    #[test]
    fn align_empty_input_gives_empty_table() {
        let table = align_monthly_returns(&[]);
        assert!(table.is_empty());
        assert!(table.months.is_empty());
    }

    #[test]
    fn align_single_company_is_identity() {
        let series = vec![(d(2024, 1, 31), 0.05), (d(2024, 2, 29), -0.02)];
        let table = align_monthly_returns(&[("A".to_string(), series.clone())]);
        assert_eq!(table.months, vec![d(2024, 1, 31), d(2024, 2, 29)]);
        assert_eq!(table.columns.len(), 1);
        assert_eq!(table.columns[0].symbol, "A");
        assert_eq!(table.columns[0].cells, vec![Some(0.05), Some(-0.02)]);
    }

    #[test]
    fn align_is_an_outer_join_on_months() {
        let a = vec![(d(2024, 1, 31), 0.1)];
        let b = vec![(d(2024, 2, 29), 0.2)];
        let table = align_monthly_returns(&[("A".to_string(), a), ("B".to_string(), b)]);

        assert_eq!(table.months, vec![d(2024, 1, 31), d(2024, 2, 29)]);
        assert_eq!(table.columns[0].cells, vec![Some(0.1), None]);
        assert_eq!(table.columns[1].cells, vec![None, Some(0.2)]);
    }

    #[test]
    fn column_order_is_insertion_order() {
        let series = vec![(d(2024, 1, 31), 0.0)];
        let table = align_monthly_returns(&[
            ("ZULU".to_string(), series.clone()),
            ("ALPHA".to_string(), series),
        ]);
        let symbols: Vec<_> = table.columns.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["ZULU", "ALPHA"]);
    }
}
