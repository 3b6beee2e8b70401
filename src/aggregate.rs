//! Daily aggregation
//!
//! Groups rows by their day key and reduces an indicator column to one mean
//! per day, ascending. Grouping runs over an ordered map keyed by the day
//! string, so the output is sorted without a separate pass.

use std::collections::BTreeMap;

use crate::dates;
use crate::error::AnalysisError;
use crate::types::{DailyPoint, DailySeries, Table};

/// Aggregator for per-day indicator means
pub struct DailyAggregator;

impl DailyAggregator {
    /// Compute the mean of `indicator` for each distinct day in the table.
    ///
    /// Requires both the `day` column and the named indicator column.
    /// Output has exactly one entry per distinct day, ascending, with each
    /// rate in [0, 1].
    pub fn daily_mean(table: &Table, indicator: &str) -> Result<DailySeries, AnalysisError> {
        if table.is_empty() {
            return Err(AnalysisError::EmptyTable);
        }

        let days = table
            .day_keys()
            .ok_or_else(|| AnalysisError::MissingColumn("day".to_string()))?;
        let flags = table.indicator(indicator)?;

        let mut groups: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
        for (day, &flag) in days.iter().zip(flags) {
            let entry = groups.entry(day.as_str()).or_insert((0, 0));
            entry.0 += u64::from(flag);
            entry.1 += 1;
        }

        let points = groups
            .into_iter()
            .map(|(day, (sum, count))| {
                Ok(DailyPoint {
                    day: dates::parse_day(day)?,
                    rate: sum as f64 / count as f64,
                })
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;

        Ok(DailySeries { points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binarize::Binarizer;
    use crate::day::DayExtractor;
    use crate::types::Record;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn make_table(rows: &[(&str, &str)]) -> Table {
        let records = rows
            .iter()
            .map(|(date, status)| Record::new(*date, *status))
            .collect();
        let table = DayExtractor::with_day_column(Table::new(records)).unwrap();
        Binarizer::with_indicator(table, "Opened", "status").unwrap()
    }

    #[test]
    fn test_daily_mean_per_day() {
        let table = make_table(&[
            ("2021-01-01 08:00:00.000", "Opened"),
            ("2021-01-01 09:00:00.000", "Opened"),
            ("2021-01-01 10:00:00.000", "Error"),
            ("2021-01-01 11:00:00.000", "Clicked"),
            ("2021-01-02 08:00:00.000", "Opened"),
        ]);

        let series = DailyAggregator::daily_mean(&table, "Opened").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].day, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert!((series.points[0].rate - 0.5).abs() < 1e-12);
        assert!((series.points[1].rate - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_days_ascending_regardless_of_input_order() {
        let table = make_table(&[
            ("2021-02-10", "Opened"),
            ("2021-01-05", "Error"),
            ("2021-01-20", "Opened"),
        ]);

        let series = DailyAggregator::daily_mean(&table, "Opened").unwrap();
        let days = series.days();
        assert_eq!(days.len(), 3);
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_rates_within_unit_interval() {
        let table = make_table(&[
            ("2021-01-01", "Opened"),
            ("2021-01-01", "Error"),
            ("2021-01-02", "Error"),
        ]);

        let series = DailyAggregator::daily_mean(&table, "Opened").unwrap();
        assert!(series
            .rates()
            .iter()
            .all(|&r| (0.0..=1.0).contains(&r)));
    }

    #[test]
    fn test_requires_day_column() {
        let table = Table::new(vec![Record::new("2021-01-01", "Opened")]);
        let table = Binarizer::with_indicator(table, "Opened", "status").unwrap();
        assert!(matches!(
            DailyAggregator::daily_mean(&table, "Opened"),
            Err(AnalysisError::MissingColumn(name)) if name == "day"
        ));
    }

    #[test]
    fn test_requires_indicator_column() {
        let table =
            DayExtractor::with_day_column(Table::new(vec![Record::new("2021-01-01", "Opened")]))
                .unwrap();
        assert!(matches!(
            DailyAggregator::daily_mean(&table, "Opened"),
            Err(AnalysisError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(Vec::new());
        assert!(matches!(
            DailyAggregator::daily_mean(&table, "Opened"),
            Err(AnalysisError::EmptyTable)
        ));
    }
}
