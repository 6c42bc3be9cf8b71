//! Archive reader.
//!
//! All read operations pass the same gate before touching anything else:
//! the file must open as a zip container, hold exactly one top-level
//! directory named by a UUID, and carry a VERSION entry with a supported
//! token. Peek and unpack additionally parse the identity record; extract
//! does not, it is a pure filesystem materialization.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;
use uuid::Uuid;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{ArchiveError, ArchiveResult};
use crate::layout;
use crate::metadata::ResultMetadata;

/// Reader for result archives.
///
/// Stateless; every operation opens its archive fresh and validates it
/// before use.
pub struct ArchiveReader;

impl ArchiveReader {
    /// Read the identity record without touching payload bytes.
    ///
    /// Cost is governed by the container's central directory and the two
    /// identity entries, not by payload size.
    pub fn peek(path: &Path) -> ArchiveResult<ResultMetadata> {
        let mut zip = open_container(path)?;
        let root = validate_layout(&mut zip)?;
        read_metadata(&mut zip, &root)
    }

    /// Unpack the whole archive into a fresh scratch directory.
    ///
    /// The returned [`UnpackedArchive`] owns the scratch directory; the
    /// unpacked tree disappears when it is dropped.
    pub fn unpack(path: &Path) -> ArchiveResult<UnpackedArchive> {
        let mut zip = open_container(path)?;
        let root = validate_layout(&mut zip)?;
        let metadata = read_metadata(&mut zip, &root)?;

        let scratch = tempfile::Builder::new()
            .prefix("ampoule-")
            .tempdir()
            .map_err(|e| ArchiveError::io("scratch directory", e))?;
        materialize(&mut zip, scratch.path())?;

        let root_dir = scratch.path().join(&root.name);
        // Formats may legitimately write zero payload files; views still
        // expect the payload directory to exist.
        let data_dir = root_dir.join(layout::DATA_DIRNAME);
        fs::create_dir_all(&data_dir).map_err(|e| ArchiveError::io(&data_dir, e))?;

        debug!("unpacked {} into {}", path.display(), root_dir.display());
        Ok(UnpackedArchive {
            metadata,
            root_dir,
            scratch,
        })
    }

    /// Materialize the archive's member set under `output_dir` and return
    /// the written root directory `output_dir/<uuid>`.
    ///
    /// `output_dir` is created if absent and is not cleared first; files
    /// already present are overwritten member by member. The identity record
    /// is materialized but not parsed.
    pub fn extract(path: &Path, output_dir: &Path) -> ArchiveResult<PathBuf> {
        let mut zip = open_container(path)?;
        let root = validate_layout(&mut zip)?;

        fs::create_dir_all(output_dir).map_err(|e| ArchiveError::io(output_dir, e))?;
        materialize(&mut zip, output_dir)?;

        debug!("extracted {} under {}", path.display(), output_dir.display());
        Ok(output_dir.join(&root.name))
    }
}

/// A fully unpacked archive.
///
/// Holds the scratch directory alive; dropping this value deletes the
/// unpacked tree.
#[derive(Debug)]
pub struct UnpackedArchive {
    metadata: ResultMetadata,
    root_dir: PathBuf,
    scratch: TempDir,
}

impl UnpackedArchive {
    /// The parsed identity record.
    pub fn metadata(&self) -> &ResultMetadata {
        &self.metadata
    }

    /// The unpacked `<uuid>/` directory.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// The unpacked payload directory.
    pub fn data_dir(&self) -> PathBuf {
        self.root_dir.join(layout::DATA_DIRNAME)
    }

    /// Split into the record, the root directory, and the scratch guard
    /// that keeps the tree alive.
    pub fn into_parts(self) -> (ResultMetadata, PathBuf, TempDir) {
        (self.metadata, self.root_dir, self.scratch)
    }
}

/// The archive's single validated root directory.
struct ValidatedRoot {
    name: String,
    uuid: Uuid,
}

fn open_container(path: &Path) -> ArchiveResult<ZipArchive<File>> {
    let file = File::open(path).map_err(|e| ArchiveError::io(path, e))?;
    Ok(ZipArchive::new(file)?)
}

/// Checks shared by every read operation: exactly one top-level directory,
/// named by a UUID, with a supported VERSION entry beneath it.
fn validate_layout(zip: &mut ZipArchive<File>) -> ArchiveResult<ValidatedRoot> {
    let mut roots = BTreeSet::new();
    for name in zip.file_names() {
        let top = name.split('/').next().unwrap_or(name);
        roots.insert(top.to_string());
    }

    if roots.len() > 1 {
        let found = roots.into_iter().collect::<Vec<_>>().join(", ");
        return Err(ArchiveError::malformed(format!(
            "expected a single top-level directory, found: {}",
            found
        )));
    }
    let name = roots
        .into_iter()
        .next()
        .ok_or_else(|| ArchiveError::malformed("archive has no entries"))?;

    let uuid = Uuid::parse_str(&name).map_err(|_| {
        ArchiveError::malformed(format!("top-level directory {:?} is not a result uuid", name))
    })?;

    let version = read_entry(zip, &layout::version_entry(&name))?;
    let token = version.trim();
    if !layout::SUPPORTED_VERSIONS.contains(&token) {
        return Err(ArchiveError::UnsupportedVersion(token.to_string()));
    }

    Ok(ValidatedRoot { name, uuid })
}

/// Read one UTF-8 entry into a string, reporting absence as a layout error.
fn read_entry(zip: &mut ZipArchive<File>, entry: &str) -> ArchiveResult<String> {
    let mut file = match zip.by_name(entry) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Err(ArchiveError::missing_entry(entry)),
        Err(e) => return Err(ArchiveError::Container(e)),
    };
    let mut text = String::new();
    file.read_to_string(&mut text)
        .map_err(|e| ArchiveError::io(entry, e))?;
    Ok(text)
}

/// Parse the identity record and check that it agrees with the root
/// directory name.
fn read_metadata(zip: &mut ZipArchive<File>, root: &ValidatedRoot) -> ArchiveResult<ResultMetadata> {
    let text = read_entry(zip, &layout::metadata_entry(&root.name))?;
    let metadata: ResultMetadata = serde_yaml::from_str(&text).map_err(|e| {
        ArchiveError::malformed(format!("{}: {}", layout::METADATA_FILENAME, e))
    })?;

    if metadata.uuid != root.uuid {
        return Err(ArchiveError::malformed(format!(
            "identity record uuid {} does not match archive root {}",
            metadata.uuid, root.name
        )));
    }
    Ok(metadata)
}

/// Write every member beneath `dest`, creating parent directories as needed.
/// Existing files are overwritten; nothing is cleared first.
fn materialize(zip: &mut ZipArchive<File>, dest: &Path) -> ArchiveResult<()> {
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let raw_name = entry.name().to_string();
        let rel = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => {
                return Err(ArchiveError::malformed(format!(
                    "entry {:?} escapes the archive root",
                    raw_name
                )));
            }
        };

        let target = dest.join(rel);
        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|e| ArchiveError::io(&target, e))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| ArchiveError::io(parent, e))?;
        }
        let mut out = File::create(&target).map_err(|e| ArchiveError::io(&target, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| ArchiveError::io(&target, e))?;
    }
    Ok(())
}
