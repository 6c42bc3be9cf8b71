//! Opaque semantic type descriptors.
//!
//! The full type algebra of a pipeline system lives outside this crate.
//! Archives only need a descriptor with structural equality and a canonical
//! one-line rendering, recorded verbatim in the identity record and restored
//! verbatim on reload.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rendering of the fixed sentinel type carried by every visualization.
pub const VISUALIZATION_TYPE: &str = "Visualization";

/// Rejected semantic type renderings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticTypeError {
    /// The rendering was empty.
    #[error("semantic type is empty")]
    Empty,

    /// The rendering must fit on a single identity-record line.
    #[error("semantic type contains control character {0:?}")]
    ControlCharacter(char),
}

/// Opaque descriptor classifying a result's contents.
///
/// Equality is structural: two descriptors are the same type exactly when
/// their renderings are equal. The archive layer never inspects a rendering
/// beyond the visualization sentinel check.
///
/// # Examples
///
/// ```
/// use ampoule_core::SemanticType;
///
/// let a = SemanticType::parse("SampleTable[Counts]").unwrap();
/// let b = SemanticType::parse("SampleTable[Counts]").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "SampleTable[Counts]");
/// assert!(!a.is_visualization());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticType {
    rendering: String,
}

impl SemanticType {
    /// Parse a descriptor from its canonical rendering.
    ///
    /// Any non-empty string without control characters is accepted; nesting
    /// brackets and spaces are part of the rendering, not syntax this crate
    /// interprets.
    pub fn parse(rendering: &str) -> Result<Self, SemanticTypeError> {
        if rendering.is_empty() {
            return Err(SemanticTypeError::Empty);
        }
        if let Some(c) = rendering.chars().find(|c| c.is_control()) {
            return Err(SemanticTypeError::ControlCharacter(c));
        }
        Ok(SemanticType {
            rendering: rendering.to_string(),
        })
    }

    /// The fixed sentinel type carried by every visualization.
    pub fn visualization() -> Self {
        SemanticType {
            rendering: VISUALIZATION_TYPE.to_string(),
        }
    }

    /// Whether this descriptor is the visualization sentinel.
    pub fn is_visualization(&self) -> bool {
        self.rendering == VISUALIZATION_TYPE
    }

    /// Canonical rendering, exactly as written to the identity record.
    pub fn name(&self) -> &str {
        &self.rendering
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rendering)
    }
}

impl FromStr for SemanticType {
    type Err = SemanticTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticType::parse(s)
    }
}
