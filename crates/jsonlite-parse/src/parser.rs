//! Recursive parser for JSON-lite documents.

use jsonlite_tree::Document;
use tracing::{debug, trace};

use crate::error::source_end;
use crate::scanner::{Delimited, Scanner, validate_quoted};
use crate::{MalformedDocumentError, ParseErrorKind, ParseOptions, Span};

/// Parser for JSON-lite documents.
///
/// A parser holds only its options, so one instance can be shared freely and
/// used for any number of inputs.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// The options this parser was created with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a complete document.
    ///
    /// The first character must be `{` and the last `}`; surrounding
    /// whitespace is rejected like any other stray input. Inputs longer than
    /// [`MAX_SOURCE_LEN`](crate::MAX_SOURCE_LEN) bytes fail with
    /// [`ParseErrorKind::InputTooLarge`].
    pub fn parse(&self, source: &str) -> Result<Document, MalformedDocumentError> {
        debug!(len = source.len(), "parsing");
        let span = outer_span(source)?;
        let doc = self.parse_object(source, span, 1)?;
        debug!(entries = doc.len(), "parsed");
        Ok(doc)
    }

    /// Parse the object at `span`, which includes both braces.
    ///
    /// Nested objects are located first and then parsed by a recursive call
    /// on their own span.
    fn parse_object(
        &self,
        source: &str,
        span: Span,
        depth: usize,
    ) -> Result<Document, MalformedDocumentError> {
        if depth > self.options.max_depth {
            return Err(MalformedDocumentError::new(
                ParseErrorKind::NestingTooDeep {
                    limit: self.options.max_depth,
                },
                Span::new(span.start, span.start + 1),
            ));
        }
        trace!(?span, depth, "object");

        let mut doc = Document::new();
        let mut scanner = Scanner::new(source, span.start + 1, span.end - 1);
        // Set after a comma: the body may not end until another member appears.
        let mut member_required = false;

        loop {
            // Key
            scanner.skip_whitespace();
            if scanner.is_at_end() {
                if member_required {
                    return Err(scanner.error_here(ParseErrorKind::ExpectedKey));
                }
                break;
            }
            if scanner.peek() != Some('"') {
                return Err(scanner.error_here(ParseErrorKind::ExpectedKey));
            }
            let key_span = scanner.scan_delimited(Delimited::String)?;
            let key = validate_quoted(key_span.slice(source), key_span.start)?;
            if key.is_empty() {
                return Err(MalformedDocumentError::new(ParseErrorKind::EmptyKey, key_span));
            }

            // Colon
            scanner.skip_whitespace();
            if scanner.peek() != Some(':') {
                return Err(scanner.error_here(ParseErrorKind::MissingColon));
            }
            scanner.advance();

            // Value
            scanner.skip_whitespace();
            match scanner.peek() {
                Some('"') => {
                    let value_span = scanner.scan_delimited(Delimited::String)?;
                    let value = validate_quoted(value_span.slice(source), value_span.start)?;
                    trace!(key, value, "string member");
                    doc.set_string(key, value);
                }
                Some('{') => {
                    let value_span = scanner.scan_delimited(Delimited::Object)?;
                    let value = self.parse_object(source, value_span, depth + 1)?;
                    trace!(key, entries = value.len(), "object member");
                    doc.set_object(key, value);
                }
                Some(c) => return Err(scanner.error_here(ParseErrorKind::InvalidValue(c))),
                None => return Err(scanner.error_here(ParseErrorKind::MissingValue)),
            }

            // Separator
            scanner.skip_whitespace();
            match scanner.peek() {
                None => break,
                Some(',') => {
                    scanner.advance();
                    member_required = true;
                }
                Some(_) => return Err(scanner.error_here(ParseErrorKind::MissingComma)),
            }
        }

        Ok(doc)
    }
}

/// Span of the whole input, after checking it is wrapped in braces.
fn outer_span(source: &str) -> Result<Span, MalformedDocumentError> {
    let end = source_end(source.len())?;
    let missing = |start: usize, c: Option<char>| {
        let len = c.map_or(0, char::len_utf8);
        MalformedDocumentError::new(
            ParseErrorKind::MissingBraces,
            Span::new(start as u32, (start + len) as u32),
        )
    };

    let first = source.chars().next();
    if first != Some('{') {
        return Err(missing(0, first));
    }
    let last = source.chars().next_back();
    if source.len() < 2 || last != Some('}') {
        let len = last.map_or(0, char::len_utf8);
        return Err(missing(source.len() - len, last));
    }

    Ok(Span::new(0, end))
}

#[cfg(test)]
mod tests;
