//! Day extraction
//!
//! This module buckets records by calendar day: it derives the `day` key
//! column from each record's date string and orders the table by it.
//! Lexical order on `YYYY-MM-DD` keys coincides with chronological order.

use crate::dates;
use crate::error::AnalysisError;
use crate::types::Table;

/// Day extractor for deriving and ordering the day key column
pub struct DayExtractor;

impl DayExtractor {
    /// Return the table with a `day` column derived from the date strings.
    ///
    /// Fails if any record's date string is too short to hold a day key.
    pub fn with_day_column(table: Table) -> Result<Table, AnalysisError> {
        let keys = table
            .records()
            .iter()
            .map(|r| dates::day_key(&r.date).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;

        let mut table = table;
        table.set_day_keys(keys);
        Ok(table)
    }

    /// Return the table with rows (and every derived column) stably sorted
    /// by day key ascending. Requires the `day` column.
    pub fn sort_by_day(table: Table) -> Result<Table, AnalysisError> {
        let keys = table
            .day_keys()
            .ok_or_else(|| AnalysisError::MissingColumn("day".to_string()))?;

        let mut perm: Vec<usize> = (0..keys.len()).collect();
        perm.sort_by_key(|&i| keys[i].as_str());
        Ok(table.permute(&perm))
    }
}
