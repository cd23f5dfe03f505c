//! `{name}`-delimited text templates for SQL assembly.
//!
//! Placeholders are written `{name}` rather than the more conventional
//! `<name>` because the templated text is SQL: comparison operators like
//! `a < b AND b > c` must never be mistaken for placeholder delimiters.

use std::fmt::Display;

/// A text template with named `{placeholder}` slots.
///
/// [`SqlTemplate::render`] walks the template text once, left to right;
/// bound values are emitted verbatim and never re-scanned, so a value that
/// itself contains placeholder-shaped text passes through untouched.
/// Placeholders with no binding are left untouched in the output.
#[derive(Debug, Clone)]
pub struct SqlTemplate {
    text: String,
    bindings: Vec<(String, String)>,
}

impl SqlTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bindings: Vec::new(),
        }
    }

    /// Bind `{name}` to a value; the value's `Display` form is substituted.
    pub fn add(&mut self, name: impl Into<String>, value: impl Display) -> &mut Self {
        self.bindings.push((name.into(), value.to_string()));
        self
    }

    /// Substitute every bound placeholder and return the resulting text.
    ///
    /// A single pass over the template text. Substituted values are not
    /// re-interpreted: a bound value containing `{name}` text is user data,
    /// not a placeholder.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            if let Some(end) = after.find('}') {
                let name = &after[..end];
                if let Some((_, value)) = self.bindings.iter().find(|(n, _)| n == name) {
                    out.push_str(value);
                    rest = &after[end + 1..];
                    continue;
                }
            }
            // Not a bound placeholder: keep the brace literally and keep
            // scanning after it.
            out.push('{');
            rest = after;
        }
        out.push_str(rest);
        out
    }
}
