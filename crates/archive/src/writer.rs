//! Archive writer.
//!
//! Stages an identity record and a payload tree into a single-file result
//! archive. The destination is written atomically: bytes go to a sibling
//! temporary file which is renamed into place only after the container is
//! complete.

use std::fs::File;
use std::io::{self, Seek, Write};
use std::path::{Component, Path};

use tempfile::NamedTempFile;
use tracing::debug;
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::error::{ArchiveError, ArchiveResult};
use crate::layout;
use crate::metadata::ResultMetadata;

/// Compression applied to archive entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Deflate every entry. The default.
    Deflated,
    /// Store entries uncompressed.
    Stored,
}

/// Options controlling archive creation.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Entry compression method.
    pub compression: Compression,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            compression: Compression::Deflated,
        }
    }
}

/// Writer for result archives.
///
/// Stateless apart from its options; one writer can produce any number of
/// archives.
pub struct ArchiveWriter {
    options: WriteOptions,
}

impl ArchiveWriter {
    /// Create a writer with the given options.
    pub fn new(options: &WriteOptions) -> Self {
        ArchiveWriter {
            options: options.clone(),
        }
    }

    /// Write an archive for `metadata`, with the payload tree rooted at
    /// `data_dir`, to the file `dest`.
    ///
    /// `dest` either appears complete or not at all: a failed write leaves no
    /// partial archive behind.
    pub fn write(
        &self,
        metadata: &ResultMetadata,
        data_dir: &Path,
        dest: &Path,
    ) -> ArchiveResult<()> {
        let parent = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(parent).map_err(|e| ArchiveError::io(dest, e))?;
        self.write_to(metadata, data_dir, tmp.as_file())?;
        tmp.persist(dest).map_err(|e| ArchiveError::io(dest, e.error))?;
        debug!("wrote archive {} for {}", dest.display(), metadata.uuid);
        Ok(())
    }

    /// Write an archive to any seekable sink.
    pub fn write_to<W: Write + Seek>(
        &self,
        metadata: &ResultMetadata,
        data_dir: &Path,
        writer: W,
    ) -> ArchiveResult<()> {
        let method = match self.options.compression {
            Compression::Deflated => zip::CompressionMethod::Deflated,
            Compression::Stored => zip::CompressionMethod::Stored,
        };
        let options = FileOptions::default().compression_method(method);
        let root = metadata.uuid.to_string();
        let mut zip = ZipWriter::new(writer);

        // Version gate first, then the identity record.
        zip.start_file(layout::version_entry(&root), options)?;
        zip.write_all(layout::FORMAT_VERSION.as_bytes())
            .map_err(|e| ArchiveError::io(layout::VERSION_FILENAME, e))?;
        zip.write_all(b"\n")
            .map_err(|e| ArchiveError::io(layout::VERSION_FILENAME, e))?;

        zip.start_file(layout::metadata_entry(&root), options)?;
        let record = serde_yaml::to_string(metadata)?;
        zip.write_all(record.as_bytes())
            .map_err(|e| ArchiveError::io(layout::METADATA_FILENAME, e))?;

        // Payload files in stable name order. Directories are implied by
        // their children; empty directories are not archived.
        let mut file_count = 0usize;
        for entry in WalkDir::new(data_dir).sort_by_file_name() {
            let entry = entry.map_err(|e| ArchiveError::io(data_dir, io::Error::from(e)))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(data_dir)
                .map_err(|_| payload_error(entry.path()))?;

            zip.start_file(entry_name(&root, rel)?, options)?;
            let mut src =
                File::open(entry.path()).map_err(|e| ArchiveError::io(entry.path(), e))?;
            io::copy(&mut src, &mut zip).map_err(|e| ArchiveError::io(entry.path(), e))?;
            file_count += 1;
        }

        zip.finish()?;
        debug!("staged {} payload files for {}", file_count, root);
        Ok(())
    }
}

fn payload_error(path: &Path) -> ArchiveError {
    ArchiveError::Payload(format!(
        "{} is outside the payload directory",
        path.display()
    ))
}

/// Archive entry name for one payload file, with forward slashes regardless
/// of the host separator.
fn entry_name(root: &str, rel: &Path) -> ArchiveResult<String> {
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| {
                    ArchiveError::Payload(format!("file name {:?} is not valid UTF-8", part))
                })?;
                parts.push(part);
            }
            _ => {
                return Err(ArchiveError::Payload(format!(
                    "path {} contains a non-plain component",
                    rel.display()
                )));
            }
        }
    }
    Ok(layout::data_entry(root, &parts.join("/")))
}
