//! Parse errors.

use std::fmt;

use crate::Span;

/// Longest input the parser accepts; spans store `u32` offsets.
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize;

/// The grammar rule a malformed document broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The text does not start with `{` and end with `}`.
    MissingBraces,
    /// A member does not start with a quoted key.
    ExpectedKey,
    /// The key is `""`.
    EmptyKey,
    /// A string runs to the end of its enclosing object without a closing quote.
    UnterminatedString,
    /// A string is not wrapped in quotation marks.
    MissingQuotes,
    /// A `"` inside string content is not preceded by a backslash.
    UnescapedQuote,
    /// A backslash is followed by something other than `t`, `n`, `"` or `\`.
    InvalidEscape(char),
    /// String content ends with a lone backslash.
    TrailingBackslash,
    /// A key is not followed by `:`.
    MissingColon,
    /// Nothing follows the `:` of a member.
    MissingValue,
    /// A value starts with neither `"` nor `{`.
    InvalidValue(char),
    /// A nested object has no matching `}`.
    UnclosedObject,
    /// A member is followed by something other than `,` or the end of the object.
    MissingComma,
    /// The text is longer than a byte offset can address.
    InputTooLarge,
    /// Objects are nested deeper than the configured limit.
    NestingTooDeep {
        /// The configured maximum depth.
        limit: usize,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::MissingBraces => write!(f, "missing brackets around document"),
            ParseErrorKind::ExpectedKey => write!(f, "expected a quoted key"),
            ParseErrorKind::EmptyKey => write!(f, "empty key"),
            ParseErrorKind::UnterminatedString => write!(f, "unterminated string"),
            ParseErrorKind::MissingQuotes => write!(f, "missing quotation marks"),
            ParseErrorKind::UnescapedQuote => write!(f, "quotation mark not escaped"),
            ParseErrorKind::InvalidEscape(c) => {
                write!(f, "invalid escape character '{}'", c.escape_debug())
            }
            ParseErrorKind::TrailingBackslash => write!(f, "backslash not escaped"),
            ParseErrorKind::MissingColon => write!(f, "missing ':' after key"),
            ParseErrorKind::MissingValue => write!(f, "missing value"),
            ParseErrorKind::InvalidValue(c) => {
                write!(f, "invalid value starting with '{}'", c.escape_debug())
            }
            ParseErrorKind::UnclosedObject => write!(f, "unclosed object"),
            ParseErrorKind::MissingComma => write!(f, "missing ',' between members"),
            ParseErrorKind::InputTooLarge => {
                write!(f, "input longer than {} bytes", MAX_SOURCE_LEN)
            }
            ParseErrorKind::NestingTooDeep { limit } => {
                write!(f, "objects nested deeper than {limit} levels")
            }
        }
    }
}

/// The input is not a well-formed JSON-lite document.
///
/// Parsing stops at the first violation; no partial document is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedDocumentError {
    /// Which rule was violated.
    pub kind: ParseErrorKind,
    /// Where in the source.
    pub span: Span,
}

impl MalformedDocumentError {
    /// Create a new error.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for MalformedDocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.span.start)
    }
}

impl std::error::Error for MalformedDocumentError {}

/// Offset one past the last byte of a `len`-byte input, if it fits in a span.
pub(crate) fn source_end(len: usize) -> Result<u32, MalformedDocumentError> {
    u32::try_from(len)
        .map_err(|_| MalformedDocumentError::new(ParseErrorKind::InputTooLarge, Span::new(0, 0)))
}
