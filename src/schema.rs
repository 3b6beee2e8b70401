//! Campaign log ingestion
//!
//! Parses interaction logs into [`Record`]s from the formats they arrive
//! in: newline-delimited JSON, a JSON array, or CSV with a header row
//! (`date,status`). Parsing is strict; per-record validation is a separate
//! pass so a report can list every bad row instead of stopping at the first.

use crate::error::AnalysisError;
use crate::types::Record;

/// One invalid record found during validation
#[derive(Debug)]
pub struct RecordIssue {
    /// Zero-based position in the input
    pub index: usize,
    pub error: AnalysisError,
}

/// Adapter for parsing raw log payloads into records
pub struct RecordAdapter;

impl RecordAdapter {
    /// Parse newline-delimited JSON, one record per line. Blank lines are
    /// skipped.
    pub fn parse_ndjson(input: &str) -> Result<Vec<Record>, AnalysisError> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str(line).map_err(AnalysisError::from))
            .collect()
    }

    /// Parse a JSON array of records
    pub fn parse_array(input: &str) -> Result<Vec<Record>, AnalysisError> {
        serde_json::from_str(input).map_err(AnalysisError::from)
    }

    /// Parse CSV with a `date,status` header row
    pub fn parse_csv(input: &str) -> Result<Vec<Record>, AnalysisError> {
        let mut reader = csv::Reader::from_reader(input.as_bytes());
        reader
            .deserialize()
            .map(|row| row.map_err(AnalysisError::from))
            .collect()
    }

    /// Validate every record, returning one issue per invalid row
    pub fn validate_records(records: &[Record]) -> Vec<RecordIssue> {
        records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                record
                    .validate()
                    .err()
                    .map(|error| RecordIssue { index, error })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_ndjson() {
        let input = concat!(
            r#"{"date": "2021-01-01 08:00:00.000", "status": "Opened"}"#,
            "\n\n",
            r#"{"date": "2021-01-02", "status": "Clicked"}"#,
            "\n",
        );

        let records = RecordAdapter::parse_ndjson(input).unwrap();
        assert_eq!(
            records,
            vec![
                Record::new("2021-01-01 08:00:00.000", "Opened"),
                Record::new("2021-01-02", "Clicked"),
            ]
        );
    }

    #[test]
    fn test_parse_ndjson_bad_line() {
        let input = "{\"date\": \"2021-01-01\", \"status\": \"Opened\"}\nnot json\n";
        assert!(matches!(
            RecordAdapter::parse_ndjson(input),
            Err(AnalysisError::Json(_))
        ));
    }

    #[test]
    fn test_parse_array() {
        let input = r#"[
            {"date": "2021-01-01", "status": "Opened"},
            {"date": "2021-01-01", "status": "Unsubscribed"}
        ]"#;

        let records = RecordAdapter::parse_array(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].status, "Unsubscribed");
    }

    #[test]
    fn test_parse_csv() {
        let input = "date,status\n2021-01-01 08:00:00.000,Opened\n2021-01-02,Error\n";

        let records = RecordAdapter::parse_csv(input).unwrap();
        assert_eq!(
            records,
            vec![
                Record::new("2021-01-01 08:00:00.000", "Opened"),
                Record::new("2021-01-02", "Error"),
            ]
        );
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let input = "date\n2021-01-01\n";
        assert!(matches!(
            RecordAdapter::parse_csv(input),
            Err(AnalysisError::Csv(_))
        ));
    }

    #[test]
    fn test_validate_records_reports_each_bad_row() {
        let records = vec![
            Record::new("2021-01-01", "Opened"),
            Record::new("not a date", "Opened"),
            Record::new("2021-01-02", ""),
        ];

        let issues = RecordAdapter::validate_records(&records);
        let indices: Vec<usize> = issues.iter().map(|i| i.index).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn test_validate_records_clean_input() {
        let records = vec![Record::new("2021-01-01", "Opened")];
        assert!(RecordAdapter::validate_records(&records).is_empty());
    }
}
