use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by Retail Pulse.
#[derive(Error, Debug)]
pub enum PulseError {
    /// One or more required columns are absent from the input header.
    #[error("Missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be decoded.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// No CSV files were found under the given directory.
    #[error("No CSV files found in {0}")]
    NoDataFiles(PathBuf),

    /// A filter value does not appear in the loaded data.
    #[error("Unknown {dimension} filter value: {value}")]
    InvalidFilter { dimension: String, value: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the pulse crates.
pub type Result<T> = std::result::Result<T, PulseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_schema_lists_all_columns() {
        let err = PulseError::Schema {
            missing: vec!["price".to_string(), "invoice_date".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required column(s): price, invoice_date"
        );
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = PulseError::FileRead {
            path: PathBuf::from("/data/sales.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/data/sales.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_no_data_files() {
        let err = PulseError::NoDataFiles(PathBuf::from("/empty/dir"));
        assert_eq!(err.to_string(), "No CSV files found in /empty/dir");
    }

    #[test]
    fn test_error_display_invalid_filter() {
        let err = PulseError::InvalidFilter {
            dimension: "category".to_string(),
            value: "Toys".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown category filter value: Toys");
    }

    #[test]
    fn test_error_display_config() {
        let err = PulseError::Config("window must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: window must be at least 1"
        );
    }

    #[test]
    fn test_error_from_csv() {
        let data = "a,b\n1,2,3\n";
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_bytes());
        let csv_err = reader
            .records()
            .find_map(|r| r.err())
            .expect("ragged row must fail");
        let err: PulseError = csv_err.into();
        assert!(err.to_string().contains("Failed to parse CSV"));
    }
}
