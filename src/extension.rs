//! Filename extension normalization applied by save.
//!
//! Saves append the canonical extension rather than replacing whatever the
//! caller supplied: `table` becomes `table.qza`, `table.zip` becomes
//! `table.zip.qza`, and `table.qza` is left alone. The caller's stem is
//! never rewritten.

use std::path::{Path, PathBuf};

/// Return `path` carrying `extension` as its final extension, appending it
/// unless it is already there.
pub(crate) fn ensure_extension(path: &Path, extension: &str) -> PathBuf {
    match path.extension() {
        Some(existing) if existing == extension => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_os_string();
            name.push(".");
            name.push(extension);
            PathBuf::from(name)
        }
    }
}
