//! Domain error types.

use std::fmt;

/// Which economic index table a lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexTable {
    Cpi,
    DividendYield,
}

impl fmt::Display for IndexTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexTable::Cpi => write!(f, "CPI"),
            IndexTable::DividendYield => write!(f, "dividend yield"),
        }
    }
}

/// Top-level error type for realreturns.
#[derive(Debug, thiserror::Error)]
pub enum ReturnsError {
    #[error("no {table} value for year {year}")]
    MissingIndexYear { table: IndexTable, year: i32 },

    #[error("invalid period ({start}, {end}): start year must precede end year")]
    InvalidPeriod { start: i32, end: i32 },

    #[error("invalid EMA span {span}: span must be at least 1")]
    InvalidSpan { span: usize },

    #[error("cannot draw {requested} distinct prices from {available} records in {year}")]
    InsufficientSamples {
        year: i32,
        available: usize,
        requested: usize,
    },

    #[error("duplicate result key {key}")]
    DuplicateKey { key: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ReturnsError {
    /// Process exit status for this error's category.
    pub fn exit_status(&self) -> u8 {
        match self {
            ReturnsError::Io(_) => 1,
            ReturnsError::ConfigParse { .. } | ReturnsError::ConfigInvalid { .. } => 2,
            ReturnsError::MissingIndexYear { .. } => 3,
            ReturnsError::Data { .. } => 4,
            ReturnsError::InvalidPeriod { .. }
            | ReturnsError::InvalidSpan { .. }
            | ReturnsError::InsufficientSamples { .. }
            | ReturnsError::DuplicateKey { .. } => 5,
        }
    }
}

impl From<&ReturnsError> for std::process::ExitCode {
    fn from(err: &ReturnsError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
