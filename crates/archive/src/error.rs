//! Error types for archive read and write operations.

use std::io;
use std::path::Path;

use thiserror::Error;

/// Result alias for archive operations.
pub type ArchiveResult<T> = std::result::Result<T, ArchiveError>;

/// Errors raised while writing or reading result archives.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The file opens as a container but violates the archive layout.
    #[error("malformed archive: {0}")]
    Malformed(String),

    /// The archive declares a version token this build does not read.
    #[error("unsupported archive version {0:?}")]
    UnsupportedVersion(String),

    /// Zip-level container failure.
    #[error("archive container: {0}")]
    Container(#[from] zip::result::ZipError),

    /// The payload tree cannot be archived as given.
    #[error("unarchivable payload: {0}")]
    Payload(String),

    /// The identity record could not be encoded.
    #[error("encode metadata.yaml: {0}")]
    MetadataEncode(#[from] serde_yaml::Error),

    /// Filesystem failure, with the path that caused it.
    #[error("{context}: {source}")]
    Io {
        /// Path or operation that failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl ArchiveError {
    /// Reject an archive whose layout violates the format contract.
    pub fn malformed(reason: impl Into<String>) -> Self {
        ArchiveError::Malformed(reason.into())
    }

    /// Reject an archive that lacks a required entry.
    pub fn missing_entry(entry: &str) -> Self {
        ArchiveError::Malformed(format!("missing required entry {}", entry))
    }

    /// Attach path context to an I/O failure.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        ArchiveError::Io {
            context: path.as_ref().display().to_string(),
            source,
        }
    }
}
