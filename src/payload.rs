//! Scratch-backed payload storage shared by both result kinds.
//!
//! Every live result owns the on-disk tree its payload lives in. Producer
//! factories stage a fresh tree; loading adopts the scratch directory an
//! archive was unpacked into. Either way the tree lives exactly as long as
//! the result value does.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

use ampoule_archive::{layout, ResultMetadata, UnpackedArchive};

use crate::error::{Error, Result};

/// Owner of a result's payload tree.
///
/// The scratch directory is deleted when the store is dropped, which is why
/// results hand out paths only for the duration of a borrow.
#[derive(Debug)]
pub(crate) struct PayloadStore {
    // Held only for its Drop; the tree lives under it.
    _scratch: TempDir,
    data_dir: PathBuf,
}

impl PayloadStore {
    /// Fresh store with an empty payload directory for a producer to fill.
    pub(crate) fn stage() -> Result<Self> {
        let scratch = tempfile::Builder::new()
            .prefix("ampoule-")
            .tempdir()
            .map_err(|e| Error::io("create scratch directory", e))?;
        let data_dir = scratch.path().join(layout::DATA_DIRNAME);
        fs::create_dir(&data_dir).map_err(|e| Error::io(data_dir.display().to_string(), e))?;
        Ok(PayloadStore {
            _scratch: scratch,
            data_dir,
        })
    }

    /// Store seeded by copying the tree under `dir`.
    pub(crate) fn copied_from(dir: &Path) -> Result<Self> {
        let store = Self::stage()?;
        copy_tree(dir, &store.data_dir)?;
        Ok(store)
    }

    /// Adopt the scratch directory of a fully unpacked archive.
    pub(crate) fn adopt(archive: UnpackedArchive) -> (ResultMetadata, Self) {
        let (metadata, root_dir, scratch) = archive.into_parts();
        let data_dir = root_dir.join(layout::DATA_DIRNAME);
        (
            metadata,
            PayloadStore {
                _scratch: scratch,
                data_dir,
            },
        )
    }

    /// The payload directory this store owns.
    pub(crate) fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Copy every file and directory under `src` into `dst`, preserving
/// relative structure.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| {
            Error::io(src.display().to_string(), std::io::Error::from(e))
        })?;
        let rel = entry.path().strip_prefix(src).map_err(|_| {
            Error::io(
                entry.path().display().to_string(),
                std::io::Error::new(std::io::ErrorKind::Other, "path escaped its copy root"),
            )
        })?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| Error::io(target.display().to_string(), e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::io(parent.display().to_string(), e))?;
            }
            fs::copy(entry.path(), &target)
                .map_err(|e| Error::io(entry.path().display().to_string(), e))?;
        }
    }
    Ok(())
}
