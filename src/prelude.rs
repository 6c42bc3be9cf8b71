//! Convenient imports for ampoule.
//!
//! This module re-exports the most commonly used types so you can get
//! started with a single import:
//!
//! ```ignore
//! use ampoule::prelude::*;
//!
//! let result = PipelineResult::load("./table.qza")?;
//! println!("{} {}", result.kind(), result.uuid());
//! ```

// Result kinds and the union over them
pub use crate::{Artifact, PipelineResult, Visualization};

// Error handling
pub use crate::{Error, Result};

// Identity and archive surface
pub use crate::{ResultMetadata, WriteOptions};

// Format seam
pub use crate::{DirectoryFormat, FormatRegistry, Payload};

// Shared vocabulary
pub use crate::{ResultKind, SemanticType};
