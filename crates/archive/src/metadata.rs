//! The identity record stored in every archive as `metadata.yaml`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity fields of an archived result.
///
/// This struct is both the serde model of the `metadata.yaml` entry and the
/// projection returned by peek. It never carries payload.
///
/// `format` discriminates the two result kinds: artifact records name the
/// directory format owning their payload, visualization records carry null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Identity of the result; must match the archive's root directory name.
    pub uuid: Uuid,
    /// Canonical rendering of the result's semantic type.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Directory-format name for artifacts, `None` for visualizations.
    #[serde(default)]
    pub format: Option<String>,
}

impl ResultMetadata {
    /// Build a record from its fields.
    pub fn new(uuid: Uuid, type_name: impl Into<String>, format: Option<String>) -> Self {
        ResultMetadata {
            uuid,
            type_name: type_name.into(),
            format,
        }
    }

    /// Whether the record describes an artifact (a directory format is named).
    pub fn is_artifact(&self) -> bool {
        self.format.is_some()
    }
}
