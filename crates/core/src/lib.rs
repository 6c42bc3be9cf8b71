//! Core vocabulary for ampoule results.
//!
//! This crate carries the types shared by every layer of the workspace:
//!
//! - [`ResultKind`]: the two result kinds and their canonical extensions
//! - [`SemanticType`]: opaque descriptor classifying a result's contents
//! - [`DirectoryFormat`]: the pluggable payload codec seam
//! - [`FormatRegistry`]: name-keyed codec lookup for producers and views
//!
//! Nothing here touches archives or the filesystem layout; that lives in
//! `ampoule-archive`.

pub mod format;
pub mod semantic;
pub mod types;

pub use format::{DirectoryFormat, FormatError, FormatRegistry, Payload};
pub use semantic::{SemanticType, SemanticTypeError, VISUALIZATION_TYPE};
pub use types::ResultKind;
