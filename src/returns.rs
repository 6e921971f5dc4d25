// SPDX-FileCopyrightText: 2026 sectorscope-rs contributors
//
// SPDX-License-Identifier: MIT

//! Trailing-return calculation over a daily close-price series.
//!
//! Returns are anchored at the most recent observation and computed against
//! the latest close at or before `last_date - period` (as-of semantics:
//! markets are closed on weekends and holidays, so the exact calendar date
//! rarely has a bar).

use chrono::Duration;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::models::PriceBar;

/// Fixed look-back windows, expressed as calendar-day offsets.
///
/// 1 month is 30 days and 1 year is 365, deliberately: true calendar
/// arithmetic would select different base trading days and change every
/// computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnPeriod {
    Day1,
    Week1,
    Month1,
    Months3,
    Months6,
    Year1,
    Years5,
}

impl ReturnPeriod {
    pub const ALL: [ReturnPeriod; 7] = [
        ReturnPeriod::Day1,
        ReturnPeriod::Week1,
        ReturnPeriod::Month1,
        ReturnPeriod::Months3,
        ReturnPeriod::Months6,
        ReturnPeriod::Year1,
        ReturnPeriod::Years5,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReturnPeriod::Day1 => "1Day",
            ReturnPeriod::Week1 => "1Week",
            ReturnPeriod::Month1 => "1Month",
            ReturnPeriod::Months3 => "3Months",
            ReturnPeriod::Months6 => "6Months",
            ReturnPeriod::Year1 => "1Year",
            ReturnPeriod::Years5 => "5Years",
        }
    }

    pub fn days(self) -> i64 {
        match self {
            ReturnPeriod::Day1 => 1,
            ReturnPeriod::Week1 => 7,
            ReturnPeriod::Month1 => 30,
            ReturnPeriod::Months3 => 90,
            ReturnPeriod::Months6 => 180,
            ReturnPeriod::Year1 => 365,
            ReturnPeriod::Years5 => 5 * 365,
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }
}

/// Percentage return per look-back period; `None` where the series has no
/// observation at or before the target date (newly listed instruments, or
/// windows longer than the available history).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnSummary {
    values: [Option<f64>; 7],
}

impl ReturnSummary {
    pub fn get(&self, period: ReturnPeriod) -> Option<f64> {
        self.values[period.index()]
    }

    fn set(&mut self, period: ReturnPeriod, value: f64) {
        self.values[period.index()] = Some(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReturnPeriod, Option<f64>)> + '_ {
        ReturnPeriod::ALL.iter().map(|p| (*p, self.get(*p)))
    }
}

impl Serialize for ReturnSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ReturnPeriod::ALL.len()))?;
        for (period, value) in self.iter() {
            map.serialize_entry(period.label(), &value)?;
        }
        map.end()
    }
}

/// Compute trailing returns for every fixed period, anchored at the series'
/// final bar. An empty series yields all-absent values; that is a normal
/// "no data" state, not an error.
///
/// `series` must be chronological with unique dates.
pub fn compute_returns(series: &[PriceBar]) -> ReturnSummary {
    let mut summary = ReturnSummary::default();
    let Some(last) = series.last() else {
        return summary;
    };

    for period in ReturnPeriod::ALL {
        let target = last.date - Duration::days(period.days());
        // Series is sorted, so the as-of bar is found by binary search:
        // the last bar with date <= target.
        let idx = series.partition_point(|bar| bar.date <= target);
        if idx == 0 {
            continue;
        }
        let base = series[idx - 1].close;
        if base <= 0.0 {
            // A zero or negative close would produce inf/NaN; report the
            // period as absent instead.
            continue;
        }
        summary.set(period, round2(100.0 * (last.close - base) / base));
    }

    summary
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

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
    fn empty_series_is_all_absent() {
        let summary = compute_returns(&[]);
        for (_, value) in summary.iter() {
            assert_eq!(value, None);
        }
    }

    #[test]
    fn all_seven_periods_are_reported() {
        let series = vec![bar(2024, 1, 1, 100.0), bar(2024, 1, 2, 101.0)];
        let summary = compute_returns(&series);
        assert_eq!(summary.iter().count(), 7);
    }

    #[test]
    fn constant_price_yields_zero_everywhere_present() {
        // Six years of month-start bars at a constant close.
        let mut series = Vec::new();
        for year in 2019..=2024 {
            for month in 1..=12 {
                series.push(bar(year, month, 1, 42.0));
            }
        }
        let summary = compute_returns(&series);
        for (_, value) in summary.iter() {
            let v = value.expect("long history should cover every period");
            assert_relative_eq!(v, 0.0);
        }
    }

    #[test]
    fn exact_ten_percent_rounds_exactly() {
        let series = vec![bar(2024, 1, 1, 100.0), bar(2024, 1, 2, 110.0)];
        let summary = compute_returns(&series);
        assert_eq!(summary.get(ReturnPeriod::Day1), Some(10.0));
    }

    #[test]
    fn target_before_first_observation_is_absent() {
        // Two bars a day apart: nothing exists 7+ days back.
        let series = vec![bar(2024, 6, 3, 100.0), bar(2024, 6, 4, 105.0)];
        let summary = compute_returns(&series);
        assert_eq!(summary.get(ReturnPeriod::Week1), None);
        assert_eq!(summary.get(ReturnPeriod::Years5), None);
    }

    #[test]
    fn backfills_to_latest_bar_at_or_before_target() {
        // Last bar Monday 2024-06-10; 1-week target is 2024-06-03 (a Monday
        // with a bar), 1-day target is Sunday 2024-06-09 so the base must
        // backfill to Friday 2024-06-07.
        let series = vec![
            bar(2024, 6, 3, 100.0),
            bar(2024, 6, 7, 104.0),
            bar(2024, 6, 10, 110.0),
        ];
        let summary = compute_returns(&series);
        assert_eq!(summary.get(ReturnPeriod::Week1), Some(10.0));
        // (110 - 104) / 104 = 5.769...
        assert_eq!(summary.get(ReturnPeriod::Day1), Some(5.77));
    }

    #[test]
    fn non_positive_base_close_is_absent_not_infinite() {
        let series = vec![bar(2024, 6, 3, 0.0), bar(2024, 6, 10, 110.0)];
        let summary = compute_returns(&series);
        assert_eq!(summary.get(ReturnPeriod::Week1), None);
    }

    #[test]
    fn rounds_to_two_decimals() {
        // (103 - 99) / 99 * 100 = 4.0404... -> 4.04
        let series = vec![bar(2024, 6, 3, 99.0), bar(2024, 6, 10, 103.0)];
        let summary = compute_returns(&series);
        assert_eq!(summary.get(ReturnPeriod::Week1), Some(4.04));
    }

    #[test]
    fn serializes_as_label_keyed_map() {
        let series = vec![bar(2024, 1, 1, 100.0), bar(2024, 1, 2, 110.0)];
        let summary = compute_returns(&series);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["1Day"], serde_json::json!(10.0));
        assert_eq!(json["5Years"], serde_json::Value::Null);
    }
}
