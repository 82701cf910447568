#![doc = include_str!("../README.md")]

use jsonlite_tree::Document;

mod span;
pub use span::Span;

mod error;
pub use error::{MAX_SOURCE_LEN, MalformedDocumentError, ParseErrorKind};

mod diagnostic;

mod options;
pub use options::ParseOptions;

mod scanner;
pub use scanner::{ESCAPABLE, is_escapable};

mod parser;
pub use parser::Parser;

/// Parse a JSON-lite document with default options.
pub fn parse(source: &str) -> Result<Document, MalformedDocumentError> {
    Parser::new().parse(source)
}

/// Check a quoted string on its own and return the text between the quotes.
///
/// This is the same check the parser applies to every key and string value:
/// the text must be wrapped in `"`, every backslash must be followed by one
/// of [`ESCAPABLE`], and no unescaped `"` may appear inside. Error spans are
/// relative to `raw`.
///
/// ```
/// use jsonlite_parse::{ParseErrorKind, validate_string};
///
/// assert_eq!(validate_string(r#""tab\there""#), Ok(r#"tab\there"#));
/// assert_eq!(
///     validate_string(r#""bad\q""#).unwrap_err().kind,
///     ParseErrorKind::InvalidEscape('q'),
/// );
/// ```
pub fn validate_string(raw: &str) -> Result<&str, MalformedDocumentError> {
    error::source_end(raw.len())?;
    scanner::validate_quoted(raw, 0)
}
