//! JSON-lite output writer.

use jsonlite_tree::{Document, Value};

use crate::options::FormatOptions;

/// Writer that renders documents as JSON-lite text.
///
/// Inline output has no optional whitespace at all. Multi-line output puts
/// each entry on its own line; empty objects are always written as `{}`.
pub struct DocumentWriter {
    out: String,
    options: FormatOptions,
    depth: usize,
}

impl DocumentWriter {
    /// Create a new writer with default options.
    pub fn new() -> Self {
        Self::with_options(FormatOptions::default())
    }

    /// Create a new writer with the given options.
    pub fn with_options(options: FormatOptions) -> Self {
        Self {
            out: String::new(),
            options,
            depth: 0,
        }
    }

    /// Consume the writer and return the output.
    pub fn finish(self) -> String {
        self.out
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Write a document at the current position.
    pub fn write_document(&mut self, doc: &Document) {
        if doc.is_empty() {
            self.out.push_str("{}");
            return;
        }

        self.out.push('{');
        self.depth += 1;
        for (i, (key, value)) in doc.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline();
            self.write_string(key);
            self.out.push(':');
            if !self.options.force_inline {
                self.out.push(' ');
            }
            match value {
                Value::String(s) => self.write_string(s),
                Value::Object(o) => self.write_document(o),
            }
        }
        self.depth -= 1;
        self.newline();
        self.out.push('}');
    }

    /// Write stored string text between quotes.
    fn write_string(&mut self, s: &str) {
        self.out.push('"');
        self.out.push_str(s);
        self.out.push('"');
    }

    /// Start a new line at the current indentation (multi-line output only).
    fn newline(&mut self) {
        if self.options.force_inline {
            return;
        }
        self.out.push('\n');
        let width = self.depth * self.options.indent_width;
        self.out.extend(std::iter::repeat_n(' ', width));
    }
}

impl Default for DocumentWriter {
    fn default() -> Self {
        Self::new()
    }
}
