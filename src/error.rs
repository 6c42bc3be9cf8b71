//! Unified error types for ampoule.
//!
//! This module provides a single error type that wraps layer errors and
//! presents a consistent interface to users of the crate facade.

use thiserror::Error;

use ampoule_archive::ArchiveError;
use ampoule_core::{FormatError, SemanticTypeError};

/// All ampoule errors.
///
/// This is the canonical error type for every operation on results. Layer
/// errors (archive, format, semantic type) convert into it losslessly.
#[derive(Debug, Error)]
pub enum Error {
    /// A result type was constructed directly instead of through a factory.
    #[error("{type_name} cannot be instantiated directly; open an archive with {factory} or use a producer factory")]
    IllegalConstruction {
        /// The type whose constructor was called.
        type_name: &'static str,
        /// The factory that should have been used instead.
        factory: &'static str,
    },

    /// A typed call site received the other result kind.
    #[error("result type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        /// What the call site asked for.
        expected: String,
        /// What the archive actually holds.
        actual: String,
    },

    /// Archive container or layout failure.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Directory-format codec failure.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Semantic type rendering rejected.
    #[error(transparent)]
    SemanticType(#[from] SemanticTypeError),

    /// Filesystem failure while staging payload, with the path that
    /// caused it.
    #[error("{context}: {source}")]
    Io {
        /// Path or operation that failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for ampoule operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn illegal_construction(type_name: &'static str) -> Self {
        Error::IllegalConstruction {
            type_name,
            factory: "PipelineResult::load",
        }
    }

    pub(crate) fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    /// Check if this error reports a malformed archive.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::Archive(ArchiveError::Malformed(_)))
    }

    /// Check if this error reports an archive version this build cannot
    /// read.
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, Error::Archive(ArchiveError::UnsupportedVersion(_)))
    }

    /// Check if this error reports a result kind mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }

    /// Check if this error reports direct construction of a result type.
    pub fn is_illegal_construction(&self) -> bool {
        matches!(self, Error::IllegalConstruction { .. })
    }
}
