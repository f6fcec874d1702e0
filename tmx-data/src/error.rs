/// Error types for the aggregation pipeline
use thiserror::Error;
use tmx_core::CoreError;

#[derive(Error, Debug)]
pub enum DataError {
    /// No records to window over, so there is no latest year
    #[error("No daily records available")]
    EmptyInput,

    /// A window must cover at least one calendar year
    #[error("Invalid window size: {0} years")]
    InvalidWindow(u32),

    /// Loading or parsing the input failed
    #[error(transparent)]
    Load(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, DataError>;
