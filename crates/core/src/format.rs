//! Pluggable directory-format codecs.
//!
//! A directory format owns the bytes under a result's payload tree. The
//! archive layer treats payload as opaque files; a codec is resolved by name
//! only at the two ends where payload is produced or consumed: producer
//! factories writing a fresh payload, and views materializing one back into
//! memory.
//!
//! Formats are looked up in a [`FormatRegistry`]; most callers use the
//! process-wide registry behind [`FormatRegistry::global`].

use std::any::Any;
use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use thiserror::Error;

/// In-memory payload value passed across the codec seam.
///
/// Each format documents the concrete view type it owns and downcasts to it.
pub type Payload = Box<dyn Any + Send>;

/// Errors raised at the codec seam.
#[derive(Debug, Error)]
pub enum FormatError {
    /// No codec is registered under the requested name.
    #[error("no directory format registered under {0:?}")]
    Unknown(String),

    /// A payload value was not the view type the format owns.
    #[error("payload is not a {expected}")]
    PayloadType {
        /// The view type the format expected.
        expected: &'static str,
    },

    /// An on-disk payload tree violates the format's own contract.
    #[error("invalid {format} payload: {reason}")]
    Invalid {
        /// Name of the format that rejected the tree.
        format: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Filesystem failure while reading or writing payload bytes.
    #[error("{context}: {source}")]
    Io {
        /// The path or operation that failed.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl FormatError {
    /// Reject an on-disk tree as invalid for `format`.
    pub fn invalid(format: impl Into<String>, reason: impl Into<String>) -> Self {
        FormatError::Invalid {
            format: format.into(),
            reason: reason.into(),
        }
    }

    /// Attach path context to an I/O failure.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        FormatError::Io {
            context: path.as_ref().display().to_string(),
            source,
        }
    }
}

/// Capability interface for one payload directory layout.
///
/// An implementation reads and writes exactly one in-memory view type:
/// [`read`](DirectoryFormat::read) must return a payload that downcasts to
/// it, and [`write`](DirectoryFormat::write) must accept it. Implementations
/// are shared across threads by the registry, so they hold no mutable state.
pub trait DirectoryFormat: Send + Sync {
    /// Canonical name, recorded verbatim in artifact identity records.
    fn name(&self) -> &str;

    /// Materialize the payload tree under `dir` as an in-memory value.
    fn read(&self, dir: &Path) -> Result<Payload, FormatError>;

    /// Write `payload` into the existing, empty directory `dir`.
    fn write(&self, payload: &Payload, dir: &Path) -> Result<(), FormatError>;
}

impl std::fmt::Debug for dyn DirectoryFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryFormat")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// Name-keyed directory-format lookup.
///
/// Registration replaces any codec previously held under the same name, so
/// re-registering during repeated initialization is harmless.
pub struct FormatRegistry {
    formats: RwLock<HashMap<String, Arc<dyn DirectoryFormat>>>,
}

static GLOBAL: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::new);

impl FormatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        FormatRegistry {
            formats: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry used by producer factories and views.
    pub fn global() -> &'static FormatRegistry {
        &GLOBAL
    }

    /// Register `format` under its canonical name, replacing any previous
    /// registration of that name.
    pub fn register(&self, format: Arc<dyn DirectoryFormat>) {
        let name = format.name().to_string();
        self.formats.write().insert(name, format);
    }

    /// Resolve a codec by name.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn DirectoryFormat>, FormatError> {
        self.formats
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| FormatError::Unknown(name.to_string()))
    }

    /// Whether a codec is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.formats.read().contains_key(name)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
