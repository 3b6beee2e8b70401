//! Status binarization
//!
//! Maps a categorical column to a 0/1 indicator for one target value.
//! Matching is exact equality; no case folding or trimming.

use crate::error::AnalysisError;
use crate::types::Table;

/// Map a sequence to 0/1 indicators: 1 where an element equals `target`.
pub fn binarize<T: PartialEq>(values: &[T], target: &T) -> Vec<u8> {
    values.iter().map(|v| u8::from(v == target)).collect()
}

/// Binarizer for appending indicator columns to a table
pub struct Binarizer;

impl Binarizer {
    /// Return the table with a new indicator column named after `target`,
    /// derived from `source_column`.
    ///
    /// The table is consumed and rebuilt, so successive calls with
    /// different targets never alias one another.
    pub fn with_indicator(
        table: Table,
        target: &str,
        source_column: &str,
    ) -> Result<Table, AnalysisError> {
        let flags = {
            let values = table.column(source_column)?;
            values.iter().map(|v| u8::from(*v == target)).collect()
        };

        let mut table = table;
        table.insert_indicator(target.to_string(), flags);
        Ok(table)
    }
}
