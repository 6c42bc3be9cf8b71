//! On-disk layout of result archives.
//!
//! Every archive is a zip container holding a single top-level directory
//! named by the result's UUID:
//!
//! ```text
//! <uuid>/
//! ├── VERSION          # archive format version token
//! ├── metadata.yaml    # identity record: uuid, type, format
//! └── data/            # payload tree, opaque to this crate
//! ```
//!
//! Entry names always use forward slashes, independent of the host platform.

/// Name of the version entry inside the archive root.
pub const VERSION_FILENAME: &str = "VERSION";

/// Name of the identity record inside the archive root.
pub const METADATA_FILENAME: &str = "metadata.yaml";

/// Name of the payload directory inside the archive root.
pub const DATA_DIRNAME: &str = "data";

/// Version token written into every new archive.
pub const FORMAT_VERSION: &str = "1";

/// Version tokens this build knows how to read.
pub const SUPPORTED_VERSIONS: &[&str] = &["1"];

/// Entry name of the version file under `root`.
pub fn version_entry(root: &str) -> String {
    format!("{}/{}", root, VERSION_FILENAME)
}

/// Entry name of the identity record under `root`.
pub fn metadata_entry(root: &str) -> String {
    format!("{}/{}", root, METADATA_FILENAME)
}

/// Entry name of one payload file under `root`, from its slash-separated
/// path relative to the payload directory.
pub fn data_entry(root: &str, rel: &str) -> String {
    format!("{}/{}/{}", root, DATA_DIRNAME, rel)
}
