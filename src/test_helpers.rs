//! Shared test utilities for the html2jsonp test suite.
//!
//! Fixture trees are built ad hoc in temp directories — template files are
//! tiny text blobs, so tests write exactly the files they need instead of
//! copying a fixture directory.

use std::path::{Path, PathBuf};

/// Write `content` at `rel` under `base`, creating parent directories.
///
/// Returns the full path. Panics on failure (test-only code).
pub fn write_file(base: &Path, rel: &str, content: &str) -> PathBuf {
    let path = base.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}
