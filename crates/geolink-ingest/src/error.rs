//! Error types for school data ingestion.

use std::path::PathBuf;

use geolink_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading and partitioning input records.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    // === CSV Parsing Errors ===
    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Schema Errors ===
    /// Required column not found in the header row.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    // === Record Errors ===
    /// A row could not be turned into a valid record.
    #[error("invalid record at line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: ModelError,
    },

    /// The partitioned records violate a point set invariant.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::MissingColumn {
            column: "NLAT_IE".to_string(),
            path: PathBuf::from("/data/schools.csv"),
        };
        assert_eq!(
            err.to_string(),
            "required column 'NLAT_IE' not found in /data/schools.csv"
        );
    }

    #[test]
    fn test_error_from_model() {
        let model_err = ModelError::InvalidRecordId(String::new());
        let ingest_err: IngestError = model_err.into();
        assert!(matches!(ingest_err, IngestError::Model(_)));
    }
}
