//! Core types for the mailpulse pipeline
//!
//! This module defines the data that flows through each stage: raw log
//! records, the table with its derived columns, and the per-day rate series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::dates;
use crate::error::AnalysisError;

/// The four interaction types a campaign log can record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    Opened,
    Error,
    Clicked,
    Unsubscribed,
}

impl Interaction {
    /// All interaction types, in plot order
    pub const ALL: [Interaction; 4] = [
        Interaction::Opened,
        Interaction::Error,
        Interaction::Clicked,
        Interaction::Unsubscribed,
    ];

    /// The status value as it appears in the log (and as an indicator column name)
    pub fn as_str(&self) -> &'static str {
        match self {
            Interaction::Opened => "Opened",
            Interaction::Error => "Error",
            Interaction::Clicked => "Clicked",
            Interaction::Unsubscribed => "Unsubscribed",
        }
    }

    /// Short display label used in chart legends
    pub fn label(&self) -> &'static str {
        match self {
            Interaction::Opened => "Opens",
            Interaction::Error => "Errors",
            Interaction::Clicked => "Clicks",
            Interaction::Unsubscribed => "Unsubs",
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interaction {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Opened" => Ok(Interaction::Opened),
            "Error" => Ok(Interaction::Error),
            "Clicked" => Ok(Interaction::Clicked),
            "Unsubscribed" => Ok(Interaction::Unsubscribed),
            other => Err(AnalysisError::UnknownInteraction(other.to_string())),
        }
    }
}

/// One row of a campaign interaction log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Interaction timestamp, `YYYY-MM-DD HH:MM:SS.mmm` or `YYYY-MM-DD`
    pub date: String,
    /// Interaction status; only the four [`Interaction`] values are
    /// meaningful to the plotter, but any string is accepted upstream
    pub status: String,
}

impl Record {
    pub fn new(date: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            status: status.into(),
        }
    }

    /// Check that the record carries a non-empty status and a parseable date
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.date.is_empty() {
            return Err(AnalysisError::DateParse(String::new()));
        }
        if self.status.is_empty() {
            return Err(AnalysisError::InvalidRecord {
                index: 0,
                reason: "empty status".to_string(),
            });
        }
        dates::parse_date(&self.date)?;
        Ok(())
    }
}

/// An ordered sequence of records plus derived columns.
///
/// Derived columns (the day key and per-status indicators) are computed,
/// never authoritative. Every transformation consumes the table and returns
/// a new one, so repeated derivations never alias each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<Record>,
    day: Option<Vec<String>>,
    indicators: BTreeMap<String, Vec<u8>>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            day: None,
            indicators: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The day key column, if [`DayExtractor`](crate::day::DayExtractor) has run
    pub fn day_keys(&self) -> Option<&[String]> {
        self.day.as_deref()
    }

    /// Look up a text column by name: `date`, `status`, or `day`
    pub fn column(&self, name: &str) -> Result<Vec<&str>, AnalysisError> {
        match name {
            "date" => Ok(self.records.iter().map(|r| r.date.as_str()).collect()),
            "status" => Ok(self.records.iter().map(|r| r.status.as_str()).collect()),
            "day" => self
                .day
                .as_ref()
                .map(|d| d.iter().map(String::as_str).collect())
                .ok_or_else(|| AnalysisError::MissingColumn("day".to_string())),
            other => Err(AnalysisError::MissingColumn(other.to_string())),
        }
    }

    /// Look up a 0/1 indicator column appended by the binarizer
    pub fn indicator(&self, name: &str) -> Result<&[u8], AnalysisError> {
        self.indicators
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))
    }

    pub(crate) fn set_day_keys(&mut self, keys: Vec<String>) {
        debug_assert_eq!(keys.len(), self.records.len());
        self.day = Some(keys);
    }

    pub(crate) fn insert_indicator(&mut self, name: String, flags: Vec<u8>) {
        debug_assert_eq!(flags.len(), self.records.len());
        self.indicators.insert(name, flags);
    }

    /// Reorder rows and every derived column by the given permutation.
    /// `perm[i]` is the source index of output row `i`.
    pub(crate) fn permute(self, perm: &[usize]) -> Self {
        let records = perm.iter().map(|&i| self.records[i].clone()).collect();
        let day = self
            .day
            .as_ref()
            .map(|day| perm.iter().map(|&i| day[i].clone()).collect());
        let indicators = self
            .indicators
            .iter()
            .map(|(name, flags)| {
                (name.clone(), perm.iter().map(|&i| flags[i]).collect())
            })
            .collect();
        Self {
            records,
            day,
            indicators,
        }
    }
}

impl From<Vec<Record>> for Table {
    fn from(records: Vec<Record>) -> Self {
        Table::new(records)
    }
}

/// One day's rate for a single interaction type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Calendar day the rate belongs to
    pub day: NaiveDate,
    /// Mean indicator value for that day, in [0, 1]
    pub rate: f64,
}

/// Per-day rates for one interaction type, ascending by day.
///
/// Invariant: exactly one entry per distinct day present in the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub points: Vec<DailyPoint>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The rate values alone, in day order
    pub fn rates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.rate).collect()
    }

    /// The days alone, ascending
    pub fn days(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.day).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_interaction_round_trip() {
        for interaction in Interaction::ALL {
            let parsed: Interaction = interaction.as_str().parse().unwrap();
            assert_eq!(parsed, interaction);
        }
    }

    #[test]
    fn test_interaction_unknown() {
        let result = "Bounced".parse::<Interaction>();
        assert!(matches!(
            result,
            Err(AnalysisError::UnknownInteraction(s)) if s == "Bounced"
        ));
    }

    #[test]
    fn test_column_lookup() {
        let table = Table::new(vec![
            Record::new("2021-01-01", "Opened"),
            Record::new("2021-01-02", "Clicked"),
        ]);

        assert_eq!(table.column("status").unwrap(), vec!["Opened", "Clicked"]);
        assert_eq!(
            table.column("date").unwrap(),
            vec!["2021-01-01", "2021-01-02"]
        );
    }

    #[test]
    fn test_missing_columns() {
        let table = Table::new(vec![Record::new("2021-01-01", "Opened")]);

        assert!(matches!(
            table.column("day"),
            Err(AnalysisError::MissingColumn(name)) if name == "day"
        ));
        assert!(matches!(
            table.column("clicked_at"),
            Err(AnalysisError::MissingColumn(_))
        ));
        assert!(matches!(
            table.indicator("Opened"),
            Err(AnalysisError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_record_validate() {
        assert!(Record::new("2021-03-04 10:15:30.123", "Opened")
            .validate()
            .is_ok());
        assert!(Record::new("2021-03-04", "Opened").validate().is_ok());
        assert!(Record::new("", "Opened").validate().is_err());
        assert!(Record::new("2021-03-04", "").validate().is_err());
        assert!(Record::new("yesterday", "Opened").validate().is_err());
    }
}
