#![doc = include_str!("../README.md")]
//! Formatting utilities for JSON-lite.
//!
//! Documents store strings in escaped form, so the writer emits stored text
//! verbatim. [`escape`] and [`unescape`] convert between that form and plain
//! text for callers building documents by hand or exporting them.

mod options;
mod scalar;
mod writer;

pub use options::FormatOptions;
pub use scalar::{escape, needs_escape, unescape};
pub use writer::DocumentWriter;

use jsonlite_tree::Document;

/// Format a document as JSON-lite text.
///
/// The output has no leading or trailing whitespace outside the outer braces.
pub fn format_document(doc: &Document, options: FormatOptions) -> String {
    let mut writer = DocumentWriter::with_options(options);
    writer.write_document(doc);
    writer.finish()
}
