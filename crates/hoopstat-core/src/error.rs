// Error taxonomy for loading, resolving and exporting season tables.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The source has no header line at all.
    #[error("input file is empty: {path}")]
    EmptyInput { path: PathBuf },

    #[error("missing required column for {field}; tried candidates: {}", candidates.join(", "))]
    MissingColumn {
        field: &'static str,
        candidates: Vec<String>,
    },
}

impl StatsError {
    /// Map an `io::Error` on `path`, keeping not-found distinct from other failures.
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            StatsError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StatsError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
