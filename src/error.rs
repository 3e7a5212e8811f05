use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO Error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse Error at {path}:{line} column {column}: {value:?}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        value: String,
    },

    #[error("Empty dataset: no trajectory rows in the selected files")]
    EmptyDataset,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Prediction shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },

    #[error("Prediction row order does not match the window at row {row}: expected object {expected}, got {actual}")]
    RowOrderMismatch { row: usize, expected: i64, actual: i64 },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
