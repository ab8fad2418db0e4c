//! Content escaping for embedding raw template text in a quoted literal.
//!
//! The transformation runs in a strict order, and each step only ever sees
//! untouched input characters — later steps never re-process the escape
//! sequences emitted by earlier ones:
//!
//! 1. Every literal backslash becomes `\\`.
//! 2. Every occurrence of the configured quote character gets a `\` prefix.
//! 3. Line breaks are rewritten according to the selected [`NewlinePolicy`].
//!
//! The guarantee: placed verbatim between two quote-character delimiters,
//! the result is a single valid JavaScript string expression whose decoded
//! value equals the original input (`Preserve`), or the original input with
//! every line break and its adjacent indentation removed (`Strip`).
//!
//! ## Newline policies
//!
//! `Preserve` keeps the visual line structure of the template in the
//! generated source by closing the literal at each line break, concatenating
//! with `+`, and reopening an indented literal on the next physical line:
//!
//! ```text
//! 'Hello,\n' +
//!     '  World!'
//! ```
//!
//! `Strip` collapses each line break together with the horizontal whitespace
//! around it, producing one continuous logical line — the usual choice for
//! markup where inter-tag whitespace is noise.
//!
//! Both policies treat `\r\n` as a single line break. A carriage return not
//! followed by a line feed is ordinary content and passes through.

/// How line breaks in the source content are rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewlinePolicy {
    /// Close the literal, concatenate with `+`, reopen on the next line.
    Preserve,
    /// Delete each line break and the horizontal whitespace around it.
    Strip,
}

impl NewlinePolicy {
    /// Select the policy from the `strip` configuration flag.
    pub fn from_strip(strip: bool) -> Self {
        if strip {
            NewlinePolicy::Strip
        } else {
            NewlinePolicy::Preserve
        }
    }
}

/// Escape `content` for embedding between `quote_char` delimiters.
pub fn escape_content(
    content: &str,
    quote_char: char,
    indent: &str,
    policy: NewlinePolicy,
) -> String {
    let escaped = escape_delimiters(content, quote_char);
    match policy {
        NewlinePolicy::Preserve => continue_literal(&escaped, quote_char, indent),
        NewlinePolicy::Strip => strip_line_breaks(&escaped),
    }
}

/// Steps 1 and 2: double backslashes, backslash-prefix the quote character.
///
/// A single pass handles both without double-processing: each input
/// character is mapped to its final form exactly once.
fn escape_delimiters(content: &str, quote_char: char) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            c if c == quote_char => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Replace each line break with an escaped-newline literal continuation.
///
/// The continuation closes the current literal, concatenates with `+`, and
/// reopens a new literal indented by two indent units, so the expression
/// stays one logical string while the generated file mirrors the template's
/// line structure.
fn continue_literal(escaped: &str, quote_char: char, indent: &str) -> String {
    let continuation = format!("\\n{quote_char} +\n{indent}{indent}{quote_char}");
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                out.push_str(&continuation);
            }
            '\n' => out.push_str(&continuation),
            c => out.push(c),
        }
    }
    out
}

/// Delete each line break and the runs of spaces/tabs on either side of it.
///
/// Horizontal whitespace is buffered until the next non-whitespace character
/// decides its fate: a line break discards it, anything else flushes it
/// through unchanged. Whitespace directly after a line break is dropped as
/// part of the same boundary.
fn strip_line_breaks(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut pending_ws = String::new();
    let mut at_line_boundary = false;
    let mut chars = escaped.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ' ' | '\t' => {
                if !at_line_boundary {
                    pending_ws.push(c);
                }
            }
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                pending_ws.clear();
                at_line_boundary = true;
            }
            '\n' => {
                pending_ws.clear();
                at_line_boundary = true;
            }
            c => {
                out.push_str(&pending_ws);
                pending_ws.clear();
                at_line_boundary = false;
                out.push(c);
            }
        }
    }
    // Trailing whitespace with no line break after it is content, keep it.
    out.push_str(&pending_ws);
    out
}
