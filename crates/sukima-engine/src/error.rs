//! Error types for sukima-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    Parse(String),

    #[error("Inverted range: end {end} is before start {start}")]
    InvertedRange { start: String, end: String },

    #[error("Unsupported year {0}: holidays are only computed for 1980-2099")]
    UnsupportedYear(i32),
}

pub type Result<T> = std::result::Result<T, EngineError>;
