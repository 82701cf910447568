//! Diagnostic rendering for parse errors.

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::{MalformedDocumentError, ParseErrorKind};

impl MalformedDocumentError {
    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with source context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let report = self.build_report(filename);
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let range: std::ops::Range<usize> = self.span.into();
        let (label, help) = describe(&self.kind);

        let report = Report::build(ReportKind::Error, (filename, range.clone()))
            .with_message(self.kind.to_string())
            .with_label(
                Label::new((filename, range))
                    .with_message(label)
                    .with_color(Color::Red),
            );
        match help {
            Some(help) => report.with_help(help),
            None => report,
        }
    }
}

/// Label text and optional help line for each kind of error.
fn describe(kind: &ParseErrorKind) -> (&'static str, Option<&'static str>) {
    match kind {
        ParseErrorKind::MissingBraces => (
            "document must start with '{' and end with '}'",
            Some("nothing, not even whitespace, may appear outside the outermost braces"),
        ),
        ParseErrorKind::ExpectedKey => (
            "expected '\"' to start a key",
            Some("members look like \"key\": \"value\" or \"key\": { ... }"),
        ),
        ParseErrorKind::EmptyKey => ("key is empty", Some("keys must contain at least one character")),
        ParseErrorKind::UnterminatedString => (
            "string starts here",
            Some("add a closing '\"' before the end of the enclosing object"),
        ),
        ParseErrorKind::MissingQuotes => ("not a quoted string", None),
        ParseErrorKind::UnescapedQuote => ("unescaped '\"'", Some("write \\\" for a literal quotation mark")),
        ParseErrorKind::InvalidEscape(_) => ("invalid escape", Some("valid escapes are: \\t, \\n, \\\", \\\\")),
        ParseErrorKind::TrailingBackslash => ("lone backslash", Some("write \\\\ for a literal backslash")),
        ParseErrorKind::MissingColon => ("expected ':' here", Some("separate a key from its value with ':'")),
        ParseErrorKind::MissingValue => ("expected a value here", Some("values are strings or objects")),
        ParseErrorKind::InvalidValue(_) => (
            "not a string or object",
            Some("JSON-lite has no numbers, booleans, arrays or null; quote the value"),
        ),
        ParseErrorKind::UnclosedObject => ("object opened here", Some("add a closing '}'")),
        ParseErrorKind::MissingComma => ("expected ',' or end of object", Some("separate members with ','")),
        ParseErrorKind::InputTooLarge => ("input starts here", Some("split the document into smaller files")),
        ParseErrorKind::NestingTooDeep { .. } => ("nesting limit reached here", None),
    }
}
