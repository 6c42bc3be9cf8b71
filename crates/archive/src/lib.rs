//! Result archives - portable, self-describing containers.
//!
//! This crate implements the on-disk side of ampoule: a result is persisted
//! as a single zip file whose only top-level entry is a directory named by
//! the result's UUID:
//!
//! ```text
//! deduped-table.qza
//! └── <uuid>/
//!     ├── VERSION          # archive format version token
//!     ├── metadata.yaml    # identity record: uuid, type, format
//!     └── data/            # payload tree, opaque to this crate
//! ```
//!
//! ## Usage
//!
//! Write an archive from a staged payload tree:
//! ```ignore
//! let writer = ArchiveWriter::new(&WriteOptions::default());
//! writer.write(&record, &data_dir, Path::new("./table.qza"))?;
//! ```
//!
//! Inspect identity without paying for payload:
//! ```ignore
//! let record = ArchiveReader::peek(Path::new("./table.qza"))?;
//! ```
//!
//! Unpack into scratch space, or materialize next to the archive:
//! ```ignore
//! let unpacked = ArchiveReader::unpack(Path::new("./table.qza"))?;
//! let root = ArchiveReader::extract(Path::new("./table.qza"), Path::new("./out"))?;
//! ```
//!
//! ## Design principles
//!
//! - **Validated**: no operation touches an archive that fails the layout
//!   or version gate
//! - **Atomic**: writes land complete or not at all
//! - **Inspectable**: standard tools (unzip, less) can read every entry
//! - **Payload-agnostic**: bytes under `data/` are never interpreted here

pub mod error;
pub mod layout;
pub mod metadata;
pub mod reader;
pub mod writer;

pub use error::{ArchiveError, ArchiveResult};
pub use metadata::ResultMetadata;
pub use reader::{ArchiveReader, UnpackedArchive};
pub use writer::{ArchiveWriter, Compression, WriteOptions};
