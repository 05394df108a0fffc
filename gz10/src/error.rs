//! Error types for catalog access and record generation

use std::path::PathBuf;

use gz10_core::FormatError;

/// Errors raised while opening shards, resolving identifiers and building records
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The build was configured without usable inputs
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// A shard file could not be opened or mapped
    #[error("Failed to read shard {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A shard file is not a well-formed container
    #[error("Invalid shard {path}: {reason}")]
    InvalidShard { path: PathBuf, reason: FormatError },
    /// A column required by the active variant is absent
    #[error("Shard {path} has no column '{column}'")]
    MissingColumn { path: PathBuf, column: String },
    /// A requested identifier is not in the shard's identifier column
    #[error("Object id {key} not found in shard {path}")]
    NotFound { key: String, path: PathBuf },
    /// A row index past the end of the shard; indicates a resolver/accessor mismatch
    #[error("Row {row} out of bounds for shard with {len} rows")]
    IndexOutOfBounds { row: usize, len: usize },
}

impl Error {
    /// Whether the error ends the whole generation rather than one shard or id
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Configuration(_) | Error::IndexOutOfBounds { .. })
    }

    /// Whether the error ends the current shard, letting generation move on
    pub fn is_shard_level(&self) -> bool {
        matches!(
            self,
            Error::Io { .. } | Error::InvalidShard { .. } | Error::MissingColumn { .. }
        )
    }

    pub(crate) fn invalid_shard(path: impl Into<PathBuf>, reason: FormatError) -> Self {
        Error::InvalidShard {
            path: path.into(),
            reason,
        }
    }
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;
