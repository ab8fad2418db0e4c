//! Centralized output-name derivation for compiled templates.
//!
//! Destination file names are derived from source paths with plain string
//! algebra — no filesystem access — so the same input path produces the same
//! output name on every platform. Both separator conventions are accepted:
//! backslashes are normalized to forward slashes before any parsing.
//!
//! Two derivations exist, matching the two destination modes of the batch
//! compiler:
//! - [`base_name`] feeds the directory-destination mode
//!   (`<dir>/<base_name>.<ext>`)
//! - [`replace_extension`] feeds the file-destination mode (output written
//!   alongside the source with its extension swapped)

/// Normalize backslash separators to forward slashes.
///
/// Applied unconditionally, not just on Windows hosts, so that a path
/// recorded on one platform names the same output on another.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// The last path segment with its final extension (if any) stripped.
///
/// Multiple dots split on the *last* dot:
/// - `"a/b/c.tmpl.html"` → `"c.tmpl"`
/// - `"c.html"` → `"c"` (no directory prefix needed)
/// - `"a/b/c"` → `"c"` (no extension to strip)
/// - `"a/b/.gitignore"` → `".gitignore"` (leading-dot name, no extension)
pub fn base_name(path: &str) -> String {
    let normalized = normalize_separators(path);
    let segment = normalized.rsplit('/').next().unwrap_or(&normalized);
    match segment.rfind('.') {
        Some(idx) if idx > 0 => segment[..idx].to_string(),
        _ => segment.to_string(),
    }
}

/// Replace everything after the last `.` in the path with `new_ext`.
///
/// The dot boundary is the last dot anywhere in the normalized path. Paths
/// without a dot get `.new_ext` appended:
/// - `"a/b/c.html"` + `"js"` → `"a/b/c.js"`
/// - `"a/b/c"` + `"js"` → `"a/b/c.js"`
pub fn replace_extension(path: &str, new_ext: &str) -> String {
    let normalized = normalize_separators(path);
    match normalized.rfind('.') {
        Some(idx) => format!("{}{}", &normalized[..=idx], new_ext),
        None => format!("{normalized}.{new_ext}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_single_extension() {
        assert_eq!(base_name("a/b/c.html"), "c");
    }

    #[test]
    fn base_name_splits_on_last_dot() {
        assert_eq!(base_name("a/b/c.tmpl.html"), "c.tmpl");
    }

    #[test]
    fn base_name_without_directory_prefix() {
        assert_eq!(base_name("c.html"), "c");
        assert_eq!(base_name("c.tmpl.html"), "c.tmpl");
    }

    #[test]
    fn base_name_without_extension() {
        assert_eq!(base_name("a/b/c"), "c");
        assert_eq!(base_name("c"), "c");
    }

    #[test]
    fn base_name_with_backslash_separators() {
        assert_eq!(base_name("a\\b\\c.html"), "c");
        assert_eq!(base_name("a\\b/c.tmpl.html"), "c.tmpl");
    }

    #[test]
    fn base_name_leading_dot_segment_kept_whole() {
        assert_eq!(base_name("a/b/.gitignore"), ".gitignore");
    }

    #[test]
    fn replace_extension_swaps_last_extension() {
        assert_eq!(replace_extension("a/b/c.html", "js"), "a/b/c.js");
    }

    #[test]
    fn replace_extension_appends_when_no_dot() {
        assert_eq!(replace_extension("a/b/c", "js"), "a/b/c.js");
    }

    #[test]
    fn replace_extension_uses_last_dot() {
        assert_eq!(replace_extension("a/b/c.tmpl.html", "js"), "a/b/c.tmpl.js");
    }

    #[test]
    fn replace_extension_normalizes_separators() {
        assert_eq!(replace_extension("a\\b\\c.html", "js"), "a/b/c.js");
    }

    #[test]
    fn replace_extension_without_directory_prefix() {
        assert_eq!(replace_extension("c.html", "js"), "c.js");
        assert_eq!(replace_extension("c", "js"), "c.js");
    }

    #[test]
    fn normalize_separators_leaves_forward_slashes() {
        assert_eq!(normalize_separators("a/b/c"), "a/b/c");
        assert_eq!(normalize_separators("a\\b\\c"), "a/b/c");
    }
}
