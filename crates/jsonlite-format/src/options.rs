//! Formatting options for JSON-lite output.

/// Options for JSON-lite output.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Spaces per nesting level in multi-line output (default: 4).
    ///
    /// Always spaces: tabs are not whitespace in JSON-lite.
    pub indent_width: usize,

    /// Write everything on one line with no optional whitespace (default: false)
    pub force_inline: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            force_inline: false,
        }
    }
}

impl FormatOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force all output onto a single line.
    pub fn inline(mut self) -> Self {
        self.force_inline = true;
        self
    }

    /// Use one line per entry, indented by nesting depth.
    pub fn multiline(mut self) -> Self {
        self.force_inline = false;
        self
    }

    /// Set the indentation width.
    pub fn indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}
