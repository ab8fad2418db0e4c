//! # html2jsonp
//!
//! A build-time transform: compiles text template files (typically markup)
//! into JavaScript source files that embed the original content as a string
//! literal passed to a named callback invocation — "JSONP-style" wrapping —
//! optionally framed by caller-supplied header/footer text.
//!
//! ```text
//! greeting.html          greeting.js
//! ─────────────          ──────────────────────────
//! Hello,            →    jsonpCallback(
//!   World!                 'Hello,\n' +
//!                            '  World!'
//!                        )
//! ```
//!
//! # Architecture: Resolve → Compile → Write
//!
//! The pipeline is deliberately thin:
//!
//! ```text
//! 1. Resolve   html2jsonp.toml  →  (source, dest) mappings
//! 2. Compile   each source      →  escaped, wrapped, framed text
//! 3. Write     each result      →  computed destination path
//! ```
//!
//! The compile step is pure string transformation — escaping and wrapping
//! never touch the filesystem — so the core of the tool is unit-testable
//! without fixtures, and units are independent enough to compile in
//! parallel without changing output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `html2jsonp.toml` loading, stock defaults, merging, validation |
//! | [`resolve`] | Expands `[[files]]` glob patterns into concrete mappings |
//! | [`naming`] | Destination-name derivation: base names and extension swaps |
//! | [`escape`] | Content escaping with the two newline policies (preserve/strip) |
//! | [`wrap`] | Callback-invocation assembly and the output-target registry |
//! | [`compile`] | Batch driver: read, transform, frame, normalize, write |
//! | [`output`] | CLI output formatting — report lines, warnings, summary |
//!
//! # Design Decisions
//!
//! ## Two Newline Policies
//!
//! Embedded content either keeps its visual line structure in the generated
//! source (each line break becomes a closed-and-reopened literal joined
//! with `+`) or is collapsed to one logical line with all line-boundary
//! whitespace removed. The policy is a two-variant enum selected per batch,
//! not a flag threaded through string replacements.
//!
//! ## Deterministic Output
//!
//! Generated files are meant to be committed or diffed: expansion order is
//! sorted, wrapping is byte-stable, and repeated runs over unchanged input
//! produce identical files.
//!
//! ## Partial-Failure Batches
//!
//! A configured source that is missing on disk is warned about and skipped;
//! the rest of the batch proceeds. Only configuration errors (an unknown
//! output target, an invalid glob, a bad option value) abort the whole run.

pub mod compile;
pub mod config;
pub mod escape;
pub mod naming;
pub mod output;
pub mod resolve;
pub mod wrap;

#[cfg(test)]
pub(crate) mod test_helpers;
