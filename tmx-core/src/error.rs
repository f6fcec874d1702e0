/// Error types for the parsing layer
use thiserror::Error;

/// Main error type for loading daily temperature data
#[derive(Error, Debug)]
pub enum CoreError {
    /// Failed to read or parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    /// A row could not be turned into a record under the strict policy
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
}

/// Type alias for Results using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;
