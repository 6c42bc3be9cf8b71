//! Data artifacts: results whose payload is owned by a directory format.

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use ampoule_archive::{ResultMetadata, WriteOptions};
use ampoule_core::{FormatError, FormatRegistry, Payload, ResultKind, SemanticType};

use crate::error::{Error, Result};
use crate::payload::PayloadStore;
use crate::result::{save_archive, PipelineResult};

/// A data artifact: a semantic type plus a payload tree owned by a named
/// directory format.
///
/// Artifacts come into existence through [`Artifact::from_payload`] (or
/// [`Artifact::from_view`]) on the producer side and through
/// [`PipelineResult::load`] / [`Artifact::load`] on the consumer side. The
/// payload lives in scratch space owned by this value and disappears when it
/// is dropped; [`Artifact::save`] is what makes an artifact durable.
pub struct Artifact {
    uuid: Uuid,
    semantic_type: SemanticType,
    format: String,
    store: PayloadStore,
}

impl Artifact {
    /// Direct construction is not part of the API; this always fails.
    ///
    /// Open an existing archive with [`PipelineResult::load`] or
    /// [`Artifact::load`], or produce a new artifact with
    /// [`Artifact::from_payload`].
    pub fn new() -> Result<Self> {
        Err(Error::illegal_construction("Artifact"))
    }

    /// Produce a new artifact by staging `payload` through the directory
    /// format registered under `format`.
    ///
    /// A fresh UUID is minted; producing the same payload twice yields two
    /// distinct artifacts. The visualization sentinel is not a data type and
    /// is rejected here.
    pub fn from_payload(
        semantic_type: SemanticType,
        format: &str,
        payload: Payload,
    ) -> Result<Self> {
        if semantic_type.is_visualization() {
            return Err(Error::type_mismatch(
                "an artifact data type",
                "the Visualization sentinel",
            ));
        }
        let codec = FormatRegistry::global().lookup(format)?;
        let store = PayloadStore::stage()?;
        codec.write(&payload, store.data_dir())?;
        Ok(Artifact {
            uuid: Uuid::new_v4(),
            semantic_type,
            format: format.to_string(),
            store,
        })
    }

    /// Produce a new artifact from a concrete view value.
    ///
    /// Convenience over [`Artifact::from_payload`] for callers holding the
    /// view type directly.
    pub fn from_view<V: Any + Send>(
        semantic_type: SemanticType,
        format: &str,
        view: V,
    ) -> Result<Self> {
        Self::from_payload(semantic_type, format, Box::new(view))
    }

    /// Load an archive that must hold an artifact.
    ///
    /// Fails with a type mismatch if `path` holds a visualization.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match PipelineResult::load(path)? {
            PipelineResult::Artifact(artifact) => Ok(artifact),
            PipelineResult::Visualization(_) => Err(Error::type_mismatch(
                ResultKind::Artifact.as_str(),
                ResultKind::Visualization.as_str(),
            )),
        }
    }

    /// Materialize the payload as view `V` through this artifact's format.
    pub fn view<V: Any>(&self) -> Result<V> {
        let codec = FormatRegistry::global().lookup(&self.format)?;
        let payload = codec.read(self.store.data_dir())?;
        match payload.downcast::<V>() {
            Ok(view) => Ok(*view),
            Err(_) => Err(Error::Format(FormatError::PayloadType {
                expected: std::any::type_name::<V>(),
            })),
        }
    }

    /// Save this artifact to `path`, normalizing the extension to `.qza`.
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
            ResultKind::Artifact,
            options,
        )
    }

    /// The artifact's identity.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// The semantic type recorded for this artifact.
    pub fn semantic_type(&self) -> &SemanticType {
        &self.semantic_type
    }

    /// Name of the directory format owning the payload.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Identity record as it will be written to `metadata.yaml`.
    pub(crate) fn metadata_record(&self) -> ResultMetadata {
        ResultMetadata::new(
            self.uuid,
            self.semantic_type.name(),
            Some(self.format.clone()),
        )
    }

    /// Assemble an artifact out of an unpacked archive's parts.
    pub(crate) fn from_parts(
        uuid: Uuid,
        semantic_type: SemanticType,
        format: String,
        store: PayloadStore,
    ) -> Self {
        Artifact {
            uuid,
            semantic_type,
            format,
            store,
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}",
            ResultKind::Artifact,
            self.semantic_type,
            self.uuid
        )
    }
}

impl fmt::Debug for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifact")
            .field("uuid", &self.uuid)
            .field("semantic_type", &self.semantic_type)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
