//! Fundamental result vocabulary.
//!
//! This module defines the types every other layer speaks in terms of:
//! - [`ResultKind`]: the two concrete result kinds

use std::fmt;

/// The two concrete kinds of pipeline result.
///
/// A kind is fully determined by an archive's identity record: records that
/// name a directory format describe artifacts, records without one describe
/// visualizations. There is no third kind and no open extension point.
///
/// # Examples
///
/// ```
/// use ampoule_core::ResultKind;
///
/// assert_eq!(ResultKind::Artifact.extension(), "qza");
/// assert_eq!(ResultKind::Visualization.extension(), "qzv");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    /// Structured data payload owned by a named directory format.
    Artifact,
    /// Opaque rendered bundle (typically HTML) with no format contract.
    Visualization,
}

impl ResultKind {
    /// Canonical filename extension for archives of this kind, without the
    /// leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ResultKind::Artifact => "qza",
            ResultKind::Visualization => "qzv",
        }
    }

    /// Kind name as rendered in messages and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Artifact => "Artifact",
            ResultKind::Visualization => "Visualization",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
