//! Visualizations: terminal, human-facing result bundles.

use std::fmt;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use ampoule_archive::{ResultMetadata, WriteOptions};
use ampoule_core::{ResultKind, SemanticType};

use crate::error::{Error, Result};
use crate::payload::PayloadStore;
use crate::result::{save_archive, PipelineResult};

/// A visualization: an opaque rendered bundle, usually HTML, addressed to
/// people rather than to downstream pipeline steps.
///
/// Every visualization carries the fixed sentinel semantic type and no
/// directory format; its payload is copied byte for byte and never
/// interpreted. Producers build one with
/// [`Visualization::from_data_dir`]; consumers reopen archives with
/// [`PipelineResult::load`] or [`Visualization::load`].
pub struct Visualization {
    uuid: Uuid,
    semantic_type: SemanticType,
    store: PayloadStore,
}

impl Visualization {
    /// Direct construction is not part of the API; this always fails.
    ///
    /// Open an existing archive with [`PipelineResult::load`] or
    /// [`Visualization::load`], or produce a new visualization with
    /// [`Visualization::from_data_dir`].
    pub fn new() -> Result<Self> {
        Err(Error::illegal_construction("Visualization"))
    }

    /// Produce a new visualization from a rendered bundle rooted at `dir`.
    ///
    /// The tree under `dir` is copied into scratch space owned by the new
    /// value; `dir` itself is left untouched. A fresh UUID is minted.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let store = PayloadStore::copied_from(dir.as_ref())?;
        Ok(Visualization {
            uuid: Uuid::new_v4(),
            semantic_type: SemanticType::visualization(),
            store,
        })
    }

    /// Load an archive that must hold a visualization.
    ///
    /// Fails with a type mismatch if `path` holds an artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match PipelineResult::load(path)? {
            PipelineResult::Visualization(visualization) => Ok(visualization),
            PipelineResult::Artifact(_) => Err(Error::type_mismatch(
                ResultKind::Visualization.as_str(),
                ResultKind::Artifact.as_str(),
            )),
        }
    }

    /// Save this visualization to `path`, normalizing the extension to
    /// `.qzv`.
    ///
    /// Returns the path actually written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        self.save_with(path, &WriteOptions::default())
    }

    /// Save with explicit archive options.
    pub fn save_with(&self, path: impl AsRef<Path>, options: &WriteOptions) -> Result<PathBuf> {
        save_archive(
            &self.metadata_record(),
            self.store.data_dir(),
            path.as_ref(),
            ResultKind::Visualization,
            options,
        )
    }

    /// The visualization's identity.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// The sentinel semantic type every visualization carries.
    pub fn semantic_type(&self) -> &SemanticType {
        &self.semantic_type
    }

    /// The rendered bundle, for serving or inspection.
    ///
    /// The returned path is inside scratch space owned by this value and
    /// disappears when it is dropped.
    pub fn data_dir(&self) -> &Path {
        self.store.data_dir()
    }

    /// Identity record as it will be written to `metadata.yaml`.
    pub(crate) fn metadata_record(&self) -> ResultMetadata {
        ResultMetadata::new(self.uuid, self.semantic_type.name(), None)
    }

    /// Assemble a visualization out of an unpacked archive's parts.
    pub(crate) fn from_parts(uuid: Uuid, store: PayloadStore) -> Self {
        Visualization {
            uuid,
            semantic_type: SemanticType::visualization(),
            store,
        }
    }
}

impl fmt::Display for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", ResultKind::Visualization, self.uuid)
    }
}

impl fmt::Debug for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visualization")
            .field("uuid", &self.uuid)
            .finish_non_exhaustive()
    }
}
