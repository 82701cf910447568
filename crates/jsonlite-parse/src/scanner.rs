//! Character-level scanning of object bodies.
//!
//! There is no token stream. The parser walks an object body with a
//! [`Scanner`], and whenever a value starts it asks the scanner for the span of
//! the whole delimited string or object. Object spans are parsed again
//! recursively by the caller.

use tracing::trace;

use crate::{MalformedDocumentError, ParseErrorKind, Span};

/// Characters allowed after a backslash inside a string.
pub const ESCAPABLE: [char; 4] = ['t', 'n', '"', '\\'];

/// Whether `c` may follow a backslash inside a string.
#[inline]
pub fn is_escapable(c: char) -> bool {
    ESCAPABLE.contains(&c)
}

/// Whitespace between tokens. Only space and newline count.
#[inline]
fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\n'
}

/// What kind of delimited span to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimited {
    /// `"..."`
    String,
    /// `{...}`
    Object,
}

/// States of the delimited-span matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// On the opening delimiter.
    SeekStart,
    /// Inside a string; the next unescaped `"` ends it.
    InString,
    /// Inside an object. Braces count only outside quotes, and the span ends
    /// at the first `}` seen at depth zero.
    InObject { depth: u32, in_quote: bool },
    /// Past the closing delimiter.
    Done,
}

/// A cursor over one object body.
///
/// The scanner never looks at or past `end`, which is the offset of the
/// body's closing brace, so a string or nested object that is not closed
/// before it is reported as unterminated.
pub(crate) struct Scanner<'src> {
    /// The full source text.
    source: &'src str,
    /// Current byte position in `source`.
    pos: u32,
    /// Byte offset the scanner must not reach.
    end: u32,
}

impl<'src> Scanner<'src> {
    /// Create a scanner for `source[start..end]`.
    pub(crate) fn new(source: &'src str, start: u32, end: u32) -> Self {
        debug_assert!(start <= end && end as usize <= source.len());
        Self {
            source,
            pos: start,
            end,
        }
    }

    /// Check if we're at the end of the body.
    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.end
    }

    /// Peek at the next character without consuming it.
    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.source[self.pos as usize..self.end as usize]
            .chars()
            .next()
    }

    /// Advance by one character and return it.
    #[inline]
    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8() as u32;
        Some(c)
    }

    /// Skip spaces and newlines.
    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.advance();
        }
    }

    /// Span of the next character, or an empty span at the end of the body.
    pub(crate) fn next_char_span(&self) -> Span {
        let len = self.peek().map_or(0, char::len_utf8) as u32;
        Span::new(self.pos, self.pos + len)
    }

    /// Error at the next character.
    pub(crate) fn error_here(&self, kind: ParseErrorKind) -> MalformedDocumentError {
        MalformedDocumentError::new(kind, self.next_char_span())
    }

    /// Match a delimited string or object starting at the cursor.
    ///
    /// The cursor must be on the opening `"` or `{`. On success the cursor is
    /// left just past the closing delimiter and the returned span covers both
    /// delimiters.
    ///
    /// A backslash always consumes the character after it, so `\"` never
    /// closes a string. Whether that character is a legal escape is decided
    /// later by [`validate_quoted`].
    pub(crate) fn scan_delimited(
        &mut self,
        what: Delimited,
    ) -> Result<Span, MalformedDocumentError> {
        let start = self.pos;
        let mut state = ScanState::SeekStart;

        loop {
            if state == ScanState::Done {
                let span = Span::new(start, self.pos);
                trace!(?what, ?span, "matched");
                return Ok(span);
            }

            let Some(c) = self.peek() else {
                let kind = match what {
                    Delimited::String => ParseErrorKind::UnterminatedString,
                    Delimited::Object => ParseErrorKind::UnclosedObject,
                };
                return Err(MalformedDocumentError::new(
                    kind,
                    Span::new(start, start + 1),
                ));
            };
            self.advance();

            state = match state {
                ScanState::SeekStart => match what {
                    Delimited::String => ScanState::InString,
                    Delimited::Object => ScanState::InObject {
                        depth: 0,
                        in_quote: false,
                    },
                },
                ScanState::InString => match c {
                    '"' => ScanState::Done,
                    '\\' => {
                        self.advance();
                        ScanState::InString
                    }
                    _ => ScanState::InString,
                },
                ScanState::InObject {
                    depth,
                    in_quote: true,
                } => match c {
                    '"' => ScanState::InObject {
                        depth,
                        in_quote: false,
                    },
                    '\\' => {
                        self.advance();
                        state
                    }
                    _ => state,
                },
                ScanState::InObject {
                    depth,
                    in_quote: false,
                } => match c {
                    '"' => ScanState::InObject {
                        depth,
                        in_quote: true,
                    },
                    '{' => {
                        trace!(depth = depth + 1, "nested brace");
                        ScanState::InObject {
                            depth: depth + 1,
                            in_quote: false,
                        }
                    }
                    '}' if depth == 0 => ScanState::Done,
                    '}' => ScanState::InObject {
                        depth: depth - 1,
                        in_quote: false,
                    },
                    _ => state,
                },
                ScanState::Done => unreachable!("handled before reading"),
            };
        }
    }
}

/// Check a quoted string and return the text between its quotes.
///
/// `offset` is the position of `raw` in the full source and is added to the
/// span of any error. Escape sequences are checked but left as written.
pub(crate) fn validate_quoted(raw: &str, offset: u32) -> Result<&str, MalformedDocumentError> {
    let err = |kind, start: usize, len: usize| {
        let span = Span::new(start as u32, (start + len) as u32).shift(offset);
        Err(MalformedDocumentError::new(kind, span))
    };

    if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
        return err(ParseErrorKind::MissingQuotes, 0, raw.len());
    }
    let content = &raw[1..raw.len() - 1];

    // Position (in `raw`) of a backslash still waiting for its escapable.
    let mut pending_backslash: Option<usize> = None;
    for (i, c) in content.char_indices() {
        let at = i + 1;
        if let Some(backslash) = pending_backslash.take() {
            if !is_escapable(c) {
                return err(
                    ParseErrorKind::InvalidEscape(c),
                    backslash,
                    at + c.len_utf8() - backslash,
                );
            }
        } else if c == '\\' {
            pending_backslash = Some(at);
        } else if c == '"' {
            return err(ParseErrorKind::UnescapedQuote, at, 1);
        }
    }

    if let Some(backslash) = pending_backslash {
        return err(ParseErrorKind::TrailingBackslash, backslash, 1);
    }

    Ok(content)
}
