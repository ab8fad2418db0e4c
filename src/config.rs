//! Build configuration module.
//!
//! Handles loading, validating, and merging the `html2jsonp.toml` config
//! file. User values are merged on top of stock defaults, so a config file
//! is sparse — override just the values you want:
//!
//! ```toml
//! [options]
//! strip = true
//! function_name = "loadTemplate"
//!
//! [[files]]
//! src = ["templates/**/*.html"]
//! dest = "build/"
//! ```
//!
//! Unknown keys are rejected to catch typos early. A missing config file
//! yields the stock defaults (and an empty file set).
//!
//! ## Configuration Options
//!
//! ```toml
//! [options]
//! quote_char = "'"              # Literal delimiter (single character)
//! indent_string = "  "          # Indent unit in generated files
//! strip = false                 # Collapse line breaks in embedded content
//! function_name = "jsonpCallback"
//! file_header_string = ""       # Prepended verbatim (plus newline) if set
//! file_footer_string = ""       # Appended verbatim (plus newline) if set
//! target = "js"                 # Output format ("js" is the only format)
//!
//! [[files]]
//! src = ["templates/**/*.html"] # Glob patterns or literal paths
//! dest = "build/"               # Directory target, or a file target
//!
//! [processing]
//! # max_workers = 4             # Omit for auto = CPU cores
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full build configuration loaded from `html2jsonp.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Transform options shared by every file in the batch.
    pub options: TransformOptions,
    /// Source → destination mapping groups.
    pub files: Vec<FilesSpec>,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl BuildConfig {
    /// Validate config values. Unknown `target` names are not checked here —
    /// the batch compiler resolves the target and fails the whole batch
    /// before touching any file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.options.validate()
    }
}

/// Options controlling the escape/wrap transform.
///
/// Immutable for the duration of a batch; every field has a stock default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformOptions {
    /// Single character used as the string-literal delimiter.
    pub quote_char: char,
    /// Whitespace unit used to indent the generated literal.
    pub indent_string: String,
    /// Collapse line breaks (and adjacent indentation) in the content.
    pub strip: bool,
    /// Name of the callback the generated file invokes.
    pub function_name: String,
    /// Text prepended to each generated file (a newline is added after it).
    pub file_header_string: String,
    /// Text appended to each generated file (a newline is added after it).
    pub file_footer_string: String,
    /// Output format name. `"js"` is the only supported format.
    pub target: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            quote_char: '\'',
            indent_string: "  ".to_string(),
            strip: false,
            function_name: "jsonpCallback".to_string(),
            file_header_string: String::new(),
            file_footer_string: String::new(),
            target: "js".to_string(),
        }
    }
}

impl TransformOptions {
    /// Validate option values.
    ///
    /// `quote_char` is already a single character by construction (the TOML
    /// layer rejects longer strings); a backslash would collide with the
    /// escape prefix and whitespace would collide with strip-mode boundary
    /// handling, so both are rejected here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quote_char == '\\' {
            return Err(ConfigError::Validation(
                "options.quote_char must not be a backslash".into(),
            ));
        }
        if self.quote_char.is_whitespace() {
            return Err(ConfigError::Validation(
                "options.quote_char must not be whitespace".into(),
            ));
        }
        if self.function_name.is_empty() {
            return Err(ConfigError::Validation(
                "options.function_name must not be empty".into(),
            ));
        }
        if !self
            .indent_string
            .chars()
            .all(|c| c == ' ' || c == '\t')
        {
            return Err(ConfigError::Validation(
                "options.indent_string must contain only spaces and tabs".into(),
            ));
        }
        Ok(())
    }
}

/// One source → destination mapping group.
///
/// Each entry in `src` is either a glob pattern (expanded against the base
/// directory) or a literal path (passed through even when absent, so the
/// compiler can warn about it).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilesSpec {
    /// Glob patterns or literal source paths.
    pub src: Vec<String>,
    /// Destination: a directory (existing, or spelled with a trailing `/`)
    /// or an explicit file target.
    pub dest: String,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel compile workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_workers(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BuildConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (including arrays like `files`) replace
///   base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BuildConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BuildConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the build config from the given file path.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the stock defaults.
pub fn load_config(path: &Path) -> Result<BuildConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# html2jsonp Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Transform options (shared by every file in the batch)
# ---------------------------------------------------------------------------
[options]
# String-literal delimiter in generated files. Exactly one character;
# backslash and whitespace are rejected.
quote_char = "'"

# Indent unit in generated files (spaces and tabs only).
indent_string = "  "

# Collapse line breaks and their surrounding indentation in the embedded
# content, producing one continuous logical line.
strip = false

# Name of the callback the generated file invokes.
function_name = "jsonpCallback"

# Text prepended / appended to each generated file (a newline is added
# after each when non-empty).
file_header_string = ""
file_footer_string = ""

# Output format. "js" (JSONP-style JavaScript) is the only format.
target = "js"

# ---------------------------------------------------------------------------
# File mappings - repeat the [[files]] block for each mapping group
# ---------------------------------------------------------------------------
# [[files]]
# # Glob patterns are expanded against the base directory; literal paths
# # pass through unchanged (and are warned about when missing).
# src = ["templates/**/*.html"]
# # A directory destination collects outputs as <dir>/<name>.js; any other
# # destination writes each output alongside its source with a .js extension.
# dest = "build/"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel compile workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_workers = 4
"##
}
