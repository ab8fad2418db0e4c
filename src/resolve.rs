//! File-set resolution: expanding `[[files]]` blocks into concrete mappings.
//!
//! Each `src` entry in a [`FilesSpec`](crate::config::FilesSpec) is either a
//! glob pattern or a literal path:
//!
//! - **Glob patterns** (anything containing `*`, `?`, `[` or `{`) are
//!   matched against a sorted walk of the base directory, so expansion
//!   order is deterministic across runs and platforms. A pattern matching
//!   nothing contributes nothing.
//! - **Literal paths** pass through unconditionally — including paths that
//!   do not exist on disk. The batch compiler owns the existence check and
//!   the per-file warning; the resolver never silently drops a configured
//!   source.
//!
//! Mappings are kept in configuration order, with exact duplicates
//! (same source and destination) collapsed to their first occurrence.
//!
//! All mapping paths are base-directory-relative, forward-slash-normalized
//! strings: the compiler's name derivation is pure string algebra, and the
//! `check --json` plan stays readable and machine-stable.

use crate::config::FilesSpec;
use crate::naming;
use globset::Glob;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },
    #[error("IO error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One (source path, configured destination) pair, ready for compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMapping {
    /// Source path, relative to the base directory.
    pub source: String,
    /// Configured destination as spelled in the config (directory or file).
    pub dest: String,
}

/// Expand all mapping groups against `base_dir`.
pub fn resolve_files(
    specs: &[FilesSpec],
    base_dir: &Path,
) -> Result<Vec<FileMapping>, ResolveError> {
    let mut mappings = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for spec in specs {
        // One walk per spec serves all of its glob entries.
        let candidates = if spec.src.iter().any(|s| is_glob_pattern(s)) {
            walk_files(base_dir)?
        } else {
            Vec::new()
        };

        for entry in &spec.src {
            if is_glob_pattern(entry) {
                let matcher = Glob::new(&naming::normalize_separators(entry))
                    .map_err(|source| ResolveError::Pattern {
                        pattern: entry.clone(),
                        source,
                    })?
                    .compile_matcher();

                for candidate in &candidates {
                    if matcher.is_match(candidate) {
                        push_unique(&mut mappings, &mut seen, candidate.clone(), &spec.dest);
                    }
                }
            } else {
                let literal = naming::normalize_separators(entry);
                push_unique(&mut mappings, &mut seen, literal, &spec.dest);
            }
        }
    }

    Ok(mappings)
}

fn push_unique(
    mappings: &mut Vec<FileMapping>,
    seen: &mut HashSet<(String, String)>,
    source: String,
    dest: &str,
) {
    if seen.insert((source.clone(), dest.to_string())) {
        mappings.push(FileMapping {
            source,
            dest: dest.to_string(),
        });
    }
}

/// Does this src entry need glob expansion?
fn is_glob_pattern(entry: &str) -> bool {
    entry.chars().any(|c| matches!(c, '*' | '?' | '[' | '{'))
}

/// All files under `base_dir`, as sorted, base-relative, slash-normalized
/// strings.
fn walk_files(base_dir: &Path) -> Result<Vec<String>, ResolveError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(base_dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            let rel = entry.path().strip_prefix(base_dir).unwrap_or(entry.path());
            files.push(naming::normalize_separators(&rel.to_string_lossy()));
        }
    }
    Ok(files)
}
