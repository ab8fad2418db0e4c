//! Assembly of escaped content into a callback-invocation expression.
//!
//! No semantic transformation happens here — the contract is exact, stable
//! formatting so that repeated runs over unchanged input produce
//! byte-identical output (diff-stable generated files):
//!
//! ```text
//! jsonpCallback(
//!   'escaped content'
//! )
//! ```
//!
//! One indent level before the literal, closing parenthesis unindented on
//! its own line.
//!
//! [`Target`] is the extension point for additional output formats: each
//! target name maps to a wrapping implementation and an output file
//! extension. `js` is the only populated entry.

use crate::escape::{NewlinePolicy, escape_content};

/// An output format for compiled templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// JSONP-style JavaScript: the content as the sole argument of a named
    /// callback invocation.
    Js,
}

impl Target {
    /// Look up a target by its configured name. `None` for unknown names;
    /// the batch compiler turns that into a fatal error before any file is
    /// processed.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "js" => Some(Target::Js),
            _ => None,
        }
    }

    /// The configured name, for display in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Target::Js => "js",
        }
    }

    /// Extension of generated files for this target.
    pub fn file_extension(&self) -> &'static str {
        match self {
            Target::Js => "js",
        }
    }

    /// Escape `content` and wrap it in this target's invocation form.
    pub fn wrap(
        &self,
        content: &str,
        function_name: &str,
        quote_char: char,
        indent: &str,
        policy: NewlinePolicy,
    ) -> String {
        match self {
            Target::Js => {
                let escaped = escape_content(content, quote_char, indent, policy);
                wrap_literal(&escaped, function_name, quote_char, indent)
            }
        }
    }
}

/// Wrap already-escaped content in a callback invocation.
pub fn wrap_literal(
    escaped: &str,
    function_name: &str,
    quote_char: char,
    indent: &str,
) -> String {
    format!("{function_name}(\n{indent}{quote_char}{escaped}{quote_char}\n)")
}
