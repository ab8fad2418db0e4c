//! Batch compilation: source templates → generated JSONP files.
//!
//! For each resolved mapping the compiler reads the source text, escapes and
//! wraps it for the configured [`Target`], attaches the optional header and
//! footer, normalizes line endings to the platform linefeed, and writes the
//! result to the computed destination.
//!
//! ## Destination Rules
//!
//! - Destination is a **directory** (exists as one on disk, or is spelled
//!   with a trailing `/`): the output lands at
//!   `<dir>/<base name of source>.<target extension>`.
//! - Any other destination: the output is written alongside its source,
//!   with the extension replaced (`templates/a.html` → `templates/a.js`).
//!
//! ## Failure Policy
//!
//! - An unknown `target` name is fatal for the whole batch and is checked
//!   before any file is touched.
//! - A missing source file is recorded, warned about, and skipped; the
//!   batch continues.
//! - Read/write failures propagate up unmodified; there are no retries.
//!
//! ## Parallelism
//!
//! Units are independent (each writes its own destination, nothing shared
//! but the read-only options), so the batch runs under a rayon parallel
//! iterator. Outcomes are collected in mapping order, keeping the printed
//! report deterministic regardless of scheduling.

use crate::config::TransformOptions;
use crate::escape::NewlinePolicy;
use crate::naming;
use crate::resolve::FileMapping;
use crate::wrap::Target;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Unknown target \"{0}\"")]
    UnknownTarget(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Platform linefeed used for generated files.
#[cfg(windows)]
pub const LINEFEED: &str = "\r\n";
#[cfg(not(windows))]
pub const LINEFEED: &str = "\n";

/// A single input file read into memory, owned for one compile.
#[derive(Debug)]
pub struct SourceUnit {
    pub mapping: FileMapping,
    pub content: String,
}

/// The compiled output text and its destination, ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledUnit {
    /// Destination path, relative to the base directory.
    pub dest: String,
    /// Final file contents, line endings already normalized.
    pub text: String,
}

/// One written output file, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct WrittenFile {
    pub source: String,
    pub dest: String,
}

/// Outcome of a whole batch.
#[derive(Debug)]
pub struct CompileResult {
    /// Files written, in mapping order.
    pub written: Vec<WrittenFile>,
    /// Sources that were configured but absent on disk, in mapping order.
    pub missing: Vec<String>,
    /// The resolved output target.
    pub target: Target,
}

/// A dry-run view of one mapping, as shown by `check`.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    pub source: String,
    pub dest: String,
    /// Whether the source currently exists on disk.
    pub exists: bool,
}

enum UnitOutcome {
    Written(WrittenFile),
    Missing(String),
}

/// Compile and write every mapping in the batch.
pub fn compile(
    mappings: &[FileMapping],
    options: &TransformOptions,
    base_dir: &Path,
) -> Result<CompileResult, CompileError> {
    let target = resolve_target(options)?;

    let outcomes: Vec<UnitOutcome> = mappings
        .par_iter()
        .map(|mapping| compile_and_write(mapping, options, target, base_dir))
        .collect::<Result<Vec<_>, CompileError>>()?;

    let mut written = Vec::new();
    let mut missing = Vec::new();
    for outcome in outcomes {
        match outcome {
            UnitOutcome::Written(file) => written.push(file),
            UnitOutcome::Missing(source) => missing.push(source),
        }
    }

    Ok(CompileResult {
        written,
        missing,
        target,
    })
}

/// Resolve the plan without writing anything. Used by `check`.
pub fn plan(
    mappings: &[FileMapping],
    options: &TransformOptions,
    base_dir: &Path,
) -> Result<Vec<PlanEntry>, CompileError> {
    let target = resolve_target(options)?;

    Ok(mappings
        .iter()
        .map(|mapping| PlanEntry {
            source: mapping.source.clone(),
            dest: destination_for(mapping, target, base_dir),
            exists: base_dir.join(&mapping.source).exists(),
        })
        .collect())
}

/// The whole-batch target check: unknown names fail before any file is read.
fn resolve_target(options: &TransformOptions) -> Result<Target, CompileError> {
    Target::from_name(&options.target)
        .ok_or_else(|| CompileError::UnknownTarget(options.target.clone()))
}

fn compile_and_write(
    mapping: &FileMapping,
    options: &TransformOptions,
    target: Target,
    base_dir: &Path,
) -> Result<UnitOutcome, CompileError> {
    let source_path = base_dir.join(&mapping.source);
    if !source_path.exists() {
        return Ok(UnitOutcome::Missing(mapping.source.clone()));
    }

    let content = fs::read_to_string(&source_path)?;
    let unit = SourceUnit {
        mapping: mapping.clone(),
        content,
    };
    let dest = destination_for(&unit.mapping, target, base_dir);
    let compiled = compile_unit(&unit, options, target, dest);

    let dest_path = base_dir.join(&compiled.dest);
    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&dest_path, &compiled.text)?;

    Ok(UnitOutcome::Written(WrittenFile {
        source: unit.mapping.source,
        dest: compiled.dest,
    }))
}

/// Pure transform of one unit: escape, wrap, attach header/footer,
/// normalize line endings. No I/O.
pub fn compile_unit(
    unit: &SourceUnit,
    options: &TransformOptions,
    target: Target,
    dest: String,
) -> CompiledUnit {
    let policy = NewlinePolicy::from_strip(options.strip);
    let wrapped = target.wrap(
        &unit.content,
        &options.function_name,
        options.quote_char,
        &options.indent_string,
        policy,
    );

    let mut text = String::with_capacity(wrapped.len());
    if !options.file_header_string.is_empty() {
        text.push_str(&options.file_header_string);
        text.push('\n');
    }
    text.push_str(&wrapped);
    if !options.file_footer_string.is_empty() {
        text.push_str(&options.file_footer_string);
        text.push('\n');
    }

    CompiledUnit {
        dest,
        text: normalize_line_endings(&text),
    }
}

/// Compute the destination path for a mapping.
///
/// A destination that exists as a directory, or is spelled with a trailing
/// slash, collects outputs by base name; anything else means "next to the
/// source, extension swapped".
pub fn destination_for(mapping: &FileMapping, target: Target, base_dir: &Path) -> String {
    let is_directory =
        mapping.dest.ends_with('/') || base_dir.join(&mapping.dest).is_dir();

    if is_directory {
        let dir = mapping.dest.trim_end_matches('/');
        let name = naming::base_name(&mapping.source);
        let ext = target.file_extension();
        if dir.is_empty() {
            format!("{name}.{ext}")
        } else {
            format!("{dir}/{name}.{ext}")
        }
    } else {
        naming::replace_extension(&mapping.source, target.file_extension())
    }
}

/// Rewrite `\r\n` and `\n` line endings to the platform linefeed.
/// A carriage return on its own is content and passes through.
pub fn normalize_line_endings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                out.push_str(LINEFEED);
            }
            '\n' => out.push_str(LINEFEED),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_file;
    use std::fs;
    use tempfile::TempDir;

    fn mapping(source: &str, dest: &str) -> FileMapping {
        FileMapping {
            source: source.to_string(),
            dest: dest.to_string(),
        }
    }

    #[test]
    fn compiles_greeting_template() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "greeting.html", "Hello,\n  World!");

        let result = compile(
            &[mapping("greeting.html", "out/")],
            &TransformOptions::default(),
            tmp.path(),
        )
        .unwrap();

        assert_eq!(result.written.len(), 1);
        assert_eq!(result.written[0].dest, "out/greeting.js");

        let text = fs::read_to_string(tmp.path().join("out/greeting.js")).unwrap();
        assert_eq!(text, "jsonpCallback(\n  'Hello,\\n' +\n    '  World!'\n)");
    }

    #[test]
    fn strip_scenario_collapses_lines() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "greeting.html", "Hello,\n  World!");

        let options = TransformOptions {
            strip: true,
            ..TransformOptions::default()
        };
        compile(&[mapping("greeting.html", "out/")], &options, tmp.path()).unwrap();

        let text = fs::read_to_string(tmp.path().join("out/greeting.js")).unwrap();
        assert_eq!(text, "jsonpCallback(\n  'Hello,World!'\n)");
    }

    #[test]
    fn batch_with_missing_source_continues() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.html", "a");
        write_file(tmp.path(), "b.html", "b");

        let result = compile(
            &[
                mapping("a.html", "out/"),
                mapping("gone.html", "out/"),
                mapping("b.html", "out/"),
            ],
            &TransformOptions::default(),
            tmp.path(),
        )
        .unwrap();

        assert_eq!(result.written.len(), 2);
        assert_eq!(result.missing, vec!["gone.html"]);
        assert!(tmp.path().join("out/a.js").exists());
        assert!(tmp.path().join("out/b.js").exists());
    }

    #[test]
    fn unknown_target_aborts_before_any_write() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.html", "a");

        let options = TransformOptions {
            target: "coffee".to_string(),
            ..TransformOptions::default()
        };
        let result = compile(&[mapping("a.html", "out/")], &options, tmp.path());

        assert!(matches!(result, Err(CompileError::UnknownTarget(_))));
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn file_destination_writes_alongside_source() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "pages/a.html", "a");

        let result = compile(
            &[mapping("pages/a.html", "bundle.js")],
            &TransformOptions::default(),
            tmp.path(),
        )
        .unwrap();

        assert_eq!(result.written[0].dest, "pages/a.js");
        assert!(tmp.path().join("pages/a.js").exists());
    }

    #[test]
    fn existing_directory_destination_without_trailing_slash() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.html", "a");
        fs::create_dir_all(tmp.path().join("out")).unwrap();

        let result = compile(
            &[mapping("a.html", "out")],
            &TransformOptions::default(),
            tmp.path(),
        )
        .unwrap();

        assert_eq!(result.written[0].dest, "out/a.js");
    }

    #[test]
    fn header_and_footer_are_attached() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.html", "hi");

        let options = TransformOptions {
            file_header_string: "/* generated */".to_string(),
            file_footer_string: ";".to_string(),
            ..TransformOptions::default()
        };
        compile(&[mapping("a.html", "out/")], &options, tmp.path()).unwrap();

        let text = fs::read_to_string(tmp.path().join("out/a.js")).unwrap();
        assert_eq!(text, "/* generated */\njsonpCallback(\n  'hi'\n);\n");
    }

    #[test]
    fn crlf_sources_are_normalized() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.html", "one\r\ntwo");

        compile(
            &[mapping("a.html", "out/")],
            &TransformOptions::default(),
            tmp.path(),
        )
        .unwrap();

        let text = fs::read_to_string(tmp.path().join("out/a.js")).unwrap();
        assert_eq!(text, "jsonpCallback(\n  'one\\n' +\n    'two'\n)");
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.html", "it's <b>here</b>\n  done");

        let mappings = [mapping("a.html", "out/")];
        compile(&mappings, &TransformOptions::default(), tmp.path()).unwrap();
        let first = fs::read_to_string(tmp.path().join("out/a.js")).unwrap();
        compile(&mappings, &TransformOptions::default(), tmp.path()).unwrap();
        let second = fs::read_to_string(tmp.path().join("out/a.js")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn plan_reports_destinations_without_writing() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.html", "a");

        let entries = plan(
            &[mapping("a.html", "out/"), mapping("gone.html", "x.js")],
            &TransformOptions::default(),
            tmp.path(),
        )
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].dest, "out/a.js");
        assert!(entries[0].exists);
        assert_eq!(entries[1].dest, "gone.js");
        assert!(!entries[1].exists);
        assert!(!tmp.path().join("out").exists());
    }

    #[test]
    fn plan_rejects_unknown_target() {
        let tmp = TempDir::new().unwrap();
        let options = TransformOptions {
            target: "amd".to_string(),
            ..TransformOptions::default()
        };
        assert!(matches!(
            plan(&[mapping("a.html", "out/")], &options, tmp.path()),
            Err(CompileError::UnknownTarget(_))
        ));
    }

    #[test]
    fn normalize_line_endings_rewrites_crlf() {
        assert_eq!(normalize_line_endings("a\r\nb\nc"), "a\nb\nc".replace('\n', LINEFEED));
        assert_eq!(normalize_line_endings("a\rb"), "a\rb");
    }

    #[test]
    fn compile_unit_is_pure_string_composition() {
        let unit = SourceUnit {
            mapping: mapping("a.html", "out/"),
            content: "x".to_string(),
        };
        let compiled = compile_unit(
            &unit,
            &TransformOptions::default(),
            Target::Js,
            "out/a.js".to_string(),
        );
        assert_eq!(compiled.dest, "out/a.js");
        assert_eq!(compiled.text, "jsonpCallback(\n  'x'\n)");
    }
}
