//! CLI output formatting for builds and plan checks.
//!
//! Each display has a `format_*` function (returns lines, no I/O, no side
//! effects) for testability and a `print_*` wrapper that writes to
//! stdout/stderr. Warnings go to stderr; report lines and the batch summary
//! go to stdout.
//!
//! ## Build
//!
//! ```text
//! Source file "templates/gone.html" not found.        (stderr)
//! 001 templates/a.html → build/a.js
//! 002 templates/b.html → build/b.js
//! Successfully converted 2 templates to js.
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 templates/a.html → build/a.js
//! 002 templates/gone.html → build/gone.js (missing)
//! 2 templates planned
//! ```

use crate::compile::{CompileResult, PlanEntry};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Warning for a configured source that is absent on disk.
pub fn format_missing_warning(source: &str) -> String {
    format!("Source file \"{source}\" not found.")
}

/// One `source → dest` report line.
pub fn format_written_line(index: usize, source: &str, dest: &str) -> String {
    format!("{} {} → {}", format_index(index), source, dest)
}

/// The single post-batch summary line.
pub fn format_summary(written: usize, target_name: &str) -> String {
    format!("Successfully converted {written} templates to {target_name}.")
}

/// All stdout lines for a finished batch: per-file reports plus summary.
pub fn format_compile_output(result: &CompileResult) -> Vec<String> {
    let mut lines: Vec<String> = result
        .written
        .iter()
        .enumerate()
        .map(|(i, file)| format_written_line(i + 1, &file.source, &file.dest))
        .collect();
    lines.push(format_summary(result.written.len(), result.target.name()));
    lines
}

/// All stdout lines for a resolved plan.
pub fn format_plan(entries: &[PlanEntry]) -> Vec<String> {
    let mut lines: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let marker = if entry.exists { "" } else { " (missing)" };
            format!(
                "{} {} → {}{}",
                format_index(i + 1),
                entry.source,
                entry.dest,
                marker
            )
        })
        .collect();
    lines.push(format!("{} templates planned", entries.len()));
    lines
}

/// Print a finished batch: warnings to stderr, report to stdout.
pub fn print_compile_output(result: &CompileResult) {
    for source in &result.missing {
        eprintln!("{}", format_missing_warning(source));
    }
    for line in format_compile_output(result) {
        println!("{line}");
    }
}

/// Print a resolved plan to stdout.
pub fn print_plan(entries: &[PlanEntry]) {
    for line in format_plan(entries) {
        println!("{line}");
    }
}
