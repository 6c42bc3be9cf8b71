//! # Ampoule
//!
//! Sealed, self-describing result archives for analysis pipelines.
//!
//! Pipelines produce two kinds of results: data **artifacts**, whose payload
//! is owned by a named directory format, and **visualizations**, opaque
//! rendered bundles addressed to people. Ampoule persists either kind as a
//! single zip archive (`.qza` / `.qzv`) that carries its own identity,
//! reloads it with full fidelity, inspects it without paying for payload,
//! and extracts it for manual reading.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ampoule::prelude::*;
//!
//! // Producer side: stage a payload through a registered directory format.
//! let table = Artifact::from_view(
//!     SemanticType::parse("SampleTable")?,
//!     "SampleTableDirectoryFormat",
//!     counts,
//! )?;
//! let written = table.save("results/table")?;        // -> results/table.qza
//!
//! // Consumer side: full reload, cheap inspection, or extraction.
//! let result = PipelineResult::load(&written)?;
//! let identity = PipelineResult::peek(&written)?;
//! let root = PipelineResult::extract(&written, "unpacked")?;
//! ```
//!
//! ## Archive layout
//!
//! ```text
//! table.qza
//! └── <uuid>/
//!     ├── VERSION          # archive format version token
//!     ├── metadata.yaml    # identity record: uuid, type, format
//!     └── data/            # payload tree
//! ```
//!
//! ## Lifecycle
//!
//! - Results come into existence only through producer factories
//!   ([`Artifact::from_payload`], [`Visualization::from_data_dir`]) or
//!   through [`PipelineResult::load`]; every result is complete and typed
//!   from birth
//! - A live result owns the scratch directory holding its payload; dropping
//!   it deletes the tree, saving it is what makes it durable
//! - [`PipelineResult::peek`] reads identity without unpacking;
//!   [`PipelineResult::extract`] materializes the raw tree without
//!   constructing a result

#![warn(missing_docs)]

mod artifact;
mod error;
mod extension;
mod payload;
mod result;
mod visualization;

pub mod prelude;

// Re-export main entry points
pub use artifact::Artifact;
pub use error::{Error, Result};
pub use result::PipelineResult;
pub use visualization::Visualization;

// Re-export the archive layer types that appear in this crate's API
pub use ampoule_archive::{
    ArchiveError, ArchiveReader, ArchiveWriter, Compression, ResultMetadata, UnpackedArchive,
    WriteOptions,
};

// Re-export the shared vocabulary
pub use ampoule_core::{
    DirectoryFormat, FormatError, FormatRegistry, Payload, ResultKind, SemanticType,
    SemanticTypeError, VISUALIZATION_TYPE,
};
