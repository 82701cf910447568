//! Escaping between plain text and the form JSON-lite strings are stored in.

use std::borrow::Cow;

/// Whether `s` contains characters that must be escaped inside a string.
pub fn needs_escape(s: &str) -> bool {
    s.chars().any(|c| matches!(c, '"' | '\\' | '\n' | '\t'))
}

/// Escape plain text for use as a JSON-lite string.
///
/// Returns the escaped content (without surrounding quotes). Only `"`, `\`,
/// newline and tab are escaped; everything else is written as is.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !needs_escape(s) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            c => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Decode the escape sequences of a stored JSON-lite string.
///
/// The input should be string content as stored in a document (without the
/// surrounding quotes). A backslash that does not start one of the four
/// known escapes is kept as is.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('\\') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    Cow::Owned(result)
}
