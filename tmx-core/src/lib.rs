//! Core types for the temperature matrix heatmap.
//!
//! - `daily_record`: typed daily observations and the CSV parser
//! - `error`: error type shared by the parsing layer

pub mod daily_record;
pub mod error;

pub use daily_record::{DailyRecord, ParseOutcome, RawRow, RowDefect, RowPolicy};
pub use error::{CoreError, Result};
