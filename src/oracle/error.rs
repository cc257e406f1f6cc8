use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("vectors file not found at path: {path}")]
    VectorsNotFound { path: PathBuf },

    #[error("failed to read vectors file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("vectors file is not valid UTF-8: {path}")]
    InvalidEncoding { path: PathBuf },

    #[error("malformed vector on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("vector on line {line} has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid oracle configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type OracleResult<T> = Result<T, OracleError>;
