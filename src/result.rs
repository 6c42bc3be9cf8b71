//! The closed union over the two result kinds and the archive-facing
//! lifecycle operations.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use ampoule_archive::{
    ArchiveError, ArchiveReader, ArchiveWriter, ResultMetadata, WriteOptions,
};
use ampoule_core::{ResultKind, SemanticType, VISUALIZATION_TYPE};

use crate::artifact::Artifact;
use crate::error::Result;
use crate::extension::ensure_extension;
use crate::payload::PayloadStore;
use crate::visualization::Visualization;

/// Any pipeline result: either an [`Artifact`] or a [`Visualization`].
///
/// The union is closed; there is no third kind. Code that does not care
/// which kind an archive holds loads through this type, and code that does
/// care matches on it or uses the typed loaders on each kind.
pub enum PipelineResult {
    /// Data artifact backed by a directory format.
    Artifact(Artifact),
    /// Rendered visualization bundle.
    Visualization(Visualization),
}

impl PipelineResult {
    /// Direct construction is not part of the API; this always fails.
    ///
    /// Results only come from [`PipelineResult::load`] or from the producer
    /// factories on [`Artifact`] and [`Visualization`].
    pub fn new() -> Result<Self> {
        Err(crate::error::Error::illegal_construction("PipelineResult"))
    }

    /// Load an archive, yielding whichever result kind it holds.
    ///
    /// The archive is fully unpacked into scratch space owned by the
    /// returned value. The kind is decided by the identity record alone:
    /// a named format means artifact, a null format means visualization.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let unpacked = ArchiveReader::unpack(path)?;
        let (metadata, store) = PayloadStore::adopt(unpacked);

        let result = match metadata.format {
            Some(format) => {
                let semantic_type = SemanticType::parse(&metadata.type_name)?;
                if semantic_type.is_visualization() {
                    return Err(ArchiveError::malformed(
                        "artifact archive declares the visualization sentinel type",
                    )
                    .into());
                }
                PipelineResult::Artifact(Artifact::from_parts(
                    metadata.uuid,
                    semantic_type,
                    format,
                    store,
                ))
            }
            None => {
                if metadata.type_name != VISUALIZATION_TYPE {
                    return Err(ArchiveError::malformed(format!(
                        "visualization archive declares type {:?} instead of the sentinel",
                        metadata.type_name
                    ))
                    .into());
                }
                PipelineResult::Visualization(Visualization::from_parts(metadata.uuid, store))
            }
        };

        debug!("loaded {} from {}", result, path.display());
        Ok(result)
    }

    /// Read an archive's identity record without unpacking payload.
    ///
    /// Cost is independent of payload size.
    pub fn peek(path: impl AsRef<Path>) -> Result<ResultMetadata> {
        Ok(ArchiveReader::peek(path.as_ref())?)
    }

    /// Materialize an archive's contents under `output_dir` for manual
    /// inspection, returning the written `<uuid>/` root.
    ///
    /// No result value is constructed; this is a filesystem operation.
    pub fn extract(path: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
        Ok(ArchiveReader::extract(path.as_ref(), output_dir.as_ref())?)
    }

    /// Save this result to `path`, normalizing the extension for its kind.
    ///
    /// Returns the path actually written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        match self {
            PipelineResult::Artifact(artifact) => artifact.save(path),
            PipelineResult::Visualization(visualization) => visualization.save(path),
        }
    }

    /// Save with explicit archive options.
    pub fn save_with(&self, path: impl AsRef<Path>, options: &WriteOptions) -> Result<PathBuf> {
        match self {
            PipelineResult::Artifact(artifact) => artifact.save_with(path, options),
            PipelineResult::Visualization(visualization) => {
                visualization.save_with(path, options)
            }
        }
    }

    /// Which kind this result is.
    pub fn kind(&self) -> ResultKind {
        match self {
            PipelineResult::Artifact(_) => ResultKind::Artifact,
            PipelineResult::Visualization(_) => ResultKind::Visualization,
        }
    }

    /// The result's identity.
    pub fn uuid(&self) -> Uuid {
        match self {
            PipelineResult::Artifact(artifact) => artifact.uuid(),
            PipelineResult::Visualization(visualization) => visualization.uuid(),
        }
    }

    /// The result's semantic type.
    pub fn semantic_type(&self) -> &SemanticType {
        match self {
            PipelineResult::Artifact(artifact) => artifact.semantic_type(),
            PipelineResult::Visualization(visualization) => visualization.semantic_type(),
        }
    }
}

impl From<Artifact> for PipelineResult {
    fn from(artifact: Artifact) -> Self {
        PipelineResult::Artifact(artifact)
    }
}

impl From<Visualization> for PipelineResult {
    fn from(visualization: Visualization) -> Self {
        PipelineResult::Visualization(visualization)
    }
}

impl fmt::Display for PipelineResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineResult::Artifact(artifact) => fmt::Display::fmt(artifact, f),
            PipelineResult::Visualization(visualization) => fmt::Display::fmt(visualization, f),
        }
    }
}

impl fmt::Debug for PipelineResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineResult::Artifact(artifact) => fmt::Debug::fmt(artifact, f),
            PipelineResult::Visualization(visualization) => fmt::Debug::fmt(visualization, f),
        }
    }
}

/// Normalize the destination for `kind`, write the archive, and hand back
/// the path written. Shared by both kinds' save paths.
pub(crate) fn save_archive(
    record: &ResultMetadata,
    data_dir: &Path,
    path: &Path,
    kind: ResultKind,
    options: &WriteOptions,
) -> Result<PathBuf> {
    let dest = ensure_extension(path, kind.extension());
    ArchiveWriter::new(options).write(record, data_dir, &dest)?;
    debug!("saved {} {} to {}", kind, record.uuid, dest.display());
    Ok(dest)
}
