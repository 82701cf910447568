use super::*;
use crate::error::source_end;
use crate::{MAX_SOURCE_LEN, parse};
use facet_testhelpers::test;

fn parse_err(source: &str) -> MalformedDocumentError {
    match parse(source) {
        Ok(doc) => panic!("expected {source:?} to be rejected, got {doc:?}"),
        Err(e) => e,
    }
}

fn kind(source: &str) -> ParseErrorKind {
    parse_err(source).kind
}

// =========================================================================
// Well-formed documents
// =========================================================================

#[test]
fn test_empty_object() {
    let doc = parse("{ }").unwrap();
    assert!(doc.string_keys().is_empty());
    assert!(doc.object_keys().is_empty());

    assert!(parse("{}").unwrap().is_empty());
    assert!(parse("{\n \n}").unwrap().is_empty());
}

#[test]
fn test_string_value() {
    let doc = parse(r#"{ "name":"sam doe" }"#).unwrap();
    assert_eq!(doc.get_string("name"), Some("sam doe"));
    assert_eq!(doc.get_object("name"), None);
}

#[test]
fn test_object_value() {
    let doc = parse(r#"{ "name":{"first":"sam", "last":"doe" } }"#).unwrap();
    let name = doc.get_object("name").expect("name should be an object");
    assert_eq!(name.get_string("first"), Some("sam"));
    assert_eq!(name.get_string("last"), Some("doe"));
    assert_eq!(doc.get_string("name"), None);
}

#[test]
fn test_close_brace_inside_string() {
    let doc = parse(r#"{ "name":{"first":"sam}", "last":"doe" } }"#).unwrap();
    let name = doc.get_object("name").unwrap();
    assert_eq!(name.get_string("first"), Some("sam}"));
    assert_eq!(name.get_string("last"), Some("doe"));
}

#[test]
fn test_both_braces_inside_string() {
    let doc = parse(r#"{ "name":{"first":"sam", "last":"doe{}" }   }"#).unwrap();
    let name = doc.get_object("name").unwrap();
    assert_eq!(name.get_string("first"), Some("sam"));
    assert_eq!(name.get_string("last"), Some("doe{}"));
}

#[test]
fn test_double_braces_inside_string() {
    let doc = parse(r#"{ "name":{"first":"sam", "last":"doe{{}}" }   }"#).unwrap();
    let name = doc.get_object("name").unwrap();
    assert_eq!(name.get_string("first"), Some("sam"));
    assert_eq!(name.get_string("last"), Some("doe{{}}"));
}

#[test]
fn test_empty_nested_object() {
    let doc = parse(r#"{ "name":{"first":"sam", "last": {} }   }"#).unwrap();
    let name = doc.get_object("name").unwrap();
    assert_eq!(name.get_string("first"), Some("sam"));
    assert_eq!(name.get_string("last"), None);
    assert!(name.get_object("last").is_some_and(|last| last.is_empty()));
}

#[test]
fn test_triple_nested_empty_objects() {
    let doc = parse(r#"{"name":{"first":"sam","last":{"test":{}}}}"#).unwrap();
    let name = doc.get_object("name").unwrap();
    assert_eq!(name.get_string("first"), Some("sam"));

    let test = name
        .get_object("last")
        .and_then(|last| last.get_object("test"))
        .expect("name.last.test should be an object");
    assert!(test.string_keys().is_empty());
    assert!(test.object_keys().is_empty());
}

#[test]
fn test_whitespace_around_tokens() {
    let doc = parse("{\n  \"a\" :  \"1\" ,\n  \"b\"\n:\n{ \"c\" : \"2\" }\n}").unwrap();
    assert_eq!(doc.get_string("a"), Some("1"));
    assert_eq!(
        doc.get_path("b.c").and_then(jsonlite_tree::Value::as_str),
        Some("2")
    );
}

#[test]
fn test_escapes_are_kept_verbatim() {
    let doc = parse(r#"{"q":"say \"hi\"", "t":"a\tb", "n":"a\nb", "b":"back\\slash"}"#).unwrap();
    assert_eq!(doc.get_string("q"), Some(r#"say \"hi\""#));
    assert_eq!(doc.get_string("t"), Some(r#"a\tb"#));
    assert_eq!(doc.get_string("n"), Some(r#"a\nb"#));
    assert_eq!(doc.get_string("b"), Some(r#"back\\slash"#));
}

#[test]
fn test_escaped_backslash_before_closing_quote() {
    let doc = parse(r#"{"path":"C:\\", "next":"x"}"#).unwrap();
    assert_eq!(doc.get_string("path"), Some(r#"C:\\"#));
    assert_eq!(doc.get_string("next"), Some("x"));
}

#[test]
fn test_escaped_quote_in_key() {
    let doc = parse(r#"{"a\"b":"c"}"#).unwrap();
    assert_eq!(doc.get_string(r#"a\"b"#), Some("c"));
}

#[test]
fn test_braces_and_punctuation_in_keys() {
    let doc = parse(r#"{"{k}":"v", "a,b:c":{}}"#).unwrap();
    assert_eq!(doc.get_string("{k}"), Some("v"));
    assert!(doc.get_object("a,b:c").is_some());
}

#[test]
fn test_duplicate_key_last_wins() {
    let doc = parse(r#"{"k":"one", "k":{"x":"y"}}"#).unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.get_string("k"), None);
    assert_eq!(
        doc.get_object("k").and_then(|k| k.get_string("x")),
        Some("y")
    );

    let doc = parse(r#"{"k":{}, "k":"two"}"#).unwrap();
    assert_eq!(doc.get_string("k"), Some("two"));
}

#[test]
fn test_empty_string_value() {
    let doc = parse(r#"{"k":""}"#).unwrap();
    assert_eq!(doc.get_string("k"), Some(""));
}

#[test]
fn test_non_ascii_content() {
    let doc = parse(r#"{"名前":"Zoë {ü}"}"#).unwrap();
    assert_eq!(doc.get_string("名前"), Some("Zoë {ü}"));
}

#[test]
fn test_raw_newline_inside_string() {
    let doc = parse("{\"k\":\"line one\nline two\"}").unwrap();
    assert_eq!(doc.get_string("k"), Some("line one\nline two"));
}

// =========================================================================
// Malformed documents
// =========================================================================

#[test]
fn test_missing_outer_braces() {
    assert_eq!(kind(""), ParseErrorKind::MissingBraces);
    assert_eq!(kind("{"), ParseErrorKind::MissingBraces);
    assert_eq!(kind("}"), ParseErrorKind::MissingBraces);
    assert_eq!(kind(r#""name":"sam""#), ParseErrorKind::MissingBraces);
    assert_eq!(kind(r#"{"name":"sam""#), ParseErrorKind::MissingBraces);
    assert_eq!(kind(r#""name":"sam"}"#), ParseErrorKind::MissingBraces);
}

#[test]
fn test_whitespace_outside_braces_is_rejected() {
    let err = parse_err(" { }");
    assert_eq!(err.kind, ParseErrorKind::MissingBraces);
    assert_eq!(err.span, Span::new(0, 1));

    let err = parse_err("{ }\n");
    assert_eq!(err.kind, ParseErrorKind::MissingBraces);
    assert_eq!(err.span, Span::new(3, 4));
}

#[test]
fn test_trailing_garbage_is_rejected() {
    assert_eq!(kind(r#"{"a":"b"}}"#), ParseErrorKind::MissingComma);
    assert_eq!(kind(r#"{"a":"b"} {"c":"d"}"#), ParseErrorKind::MissingComma);
}

#[test]
fn test_unterminated_string() {
    assert_eq!(kind(r#"{"name":"sam}"#), ParseErrorKind::UnterminatedString);
    assert_eq!(kind(r#"{"name}"#), ParseErrorKind::UnterminatedString);
    assert_eq!(kind(r#"{"name":"sam\"}"#), ParseErrorKind::UnterminatedString);
}

#[test]
fn test_unescaped_internal_quote() {
    assert_eq!(kind(r#"{"name":"sa"m"}"#), ParseErrorKind::MissingComma);
    assert_eq!(kind(r#"{"na"me":"sam"}"#), ParseErrorKind::MissingColon);
}

#[test]
fn test_invalid_escape() {
    let err = parse_err(r#"{"name":"sa\qm"}"#);
    assert_eq!(err.kind, ParseErrorKind::InvalidEscape('q'));
    assert_eq!(err.span, Span::new(11, 13));

    assert_eq!(kind(r#"{"na\rme":"sam"}"#), ParseErrorKind::InvalidEscape('r'));
    assert_eq!(kind(r#"{"a":"\u0041"}"#), ParseErrorKind::InvalidEscape('u'));
    assert_eq!(kind(r#"{"a":"\/"}"#), ParseErrorKind::InvalidEscape('/'));
}

#[test]
fn test_invalid_escape_inside_nested_object() {
    let source = r#"{"outer":{"inner":"x\qy"}}"#;
    let err = parse_err(source);
    assert_eq!(err.kind, ParseErrorKind::InvalidEscape('q'));
    assert_eq!(err.span.slice(source), r#"\q"#);
}

#[test]
fn test_missing_colon() {
    let err = parse_err(r#"{"name" "sam"}"#);
    assert_eq!(err.kind, ParseErrorKind::MissingColon);
    assert_eq!(err.span, Span::new(8, 9));

    assert_eq!(kind(r#"{"name"}"#), ParseErrorKind::MissingColon);
    assert_eq!(kind(r#"{"name" x : "sam"}"#), ParseErrorKind::MissingColon);
}

#[test]
fn test_missing_comma() {
    let err = parse_err(r#"{"a":"1" "b":"2"}"#);
    assert_eq!(err.kind, ParseErrorKind::MissingComma);
    assert_eq!(err.span, Span::new(9, 10));

    assert_eq!(kind(r#"{"a":{} "b":"2"}"#), ParseErrorKind::MissingComma);
}

#[test]
fn test_missing_value() {
    assert_eq!(kind(r#"{"name":}"#), ParseErrorKind::MissingValue);
    assert_eq!(kind(r#"{"name":   }"#), ParseErrorKind::MissingValue);
}

#[test]
fn test_invalid_value() {
    assert_eq!(kind(r#"{"n":42}"#), ParseErrorKind::InvalidValue('4'));
    assert_eq!(kind(r#"{"n":true}"#), ParseErrorKind::InvalidValue('t'));
    assert_eq!(kind(r#"{"n":null}"#), ParseErrorKind::InvalidValue('n'));
    assert_eq!(kind(r#"{"n":["a"]}"#), ParseErrorKind::InvalidValue('['));
}

#[test]
fn test_unclosed_nested_object() {
    let source = r#"{"a":{"b":"c"}"#;
    let err = parse_err(source);
    assert_eq!(err.kind, ParseErrorKind::UnclosedObject);
    assert_eq!(err.span, Span::new(5, 6));
}

#[test]
fn test_expected_key() {
    assert_eq!(kind(r#"{name:"sam"}"#), ParseErrorKind::ExpectedKey);
    assert_eq!(kind(r#"{,"a":"b"}"#), ParseErrorKind::ExpectedKey);
    assert_eq!(kind(r#"{"a":"b",}"#), ParseErrorKind::ExpectedKey);
    assert_eq!(kind(r#"{"a":"b",,"c":"d"}"#), ParseErrorKind::ExpectedKey);
}

#[test]
fn test_empty_key() {
    let err = parse_err(r#"{"":"v"}"#);
    assert_eq!(err.kind, ParseErrorKind::EmptyKey);
    assert_eq!(err.span, Span::new(1, 3));
}

#[test]
fn test_tab_is_not_whitespace() {
    assert_eq!(kind("{\t\"a\":\"b\"}"), ParseErrorKind::ExpectedKey);
    assert_eq!(kind("{\"a\":\t\"b\"}"), ParseErrorKind::InvalidValue('\t'));
}

#[test]
fn test_error_in_nested_object_spans_are_absolute() {
    let source = r#"{"a":{"b":{"c" "d"}}}"#;
    let err = parse_err(source);
    assert_eq!(err.kind, ParseErrorKind::MissingColon);
    assert_eq!(err.span.slice(source), "\"");
    assert_eq!(err.span.start, 15);
}

#[test]
fn test_error_display() {
    insta::assert_snapshot!(parse_err(r#"{"name" "sam"}"#).to_string(), @"missing ':' after key at offset 8");
    insta::assert_snapshot!(parse_err(r#"{"a":"\q"}"#).to_string(), @"invalid escape character 'q' at offset 6");
    insta::assert_snapshot!(parse_err("{ }\n").to_string(), @"missing brackets around document at offset 3");
}

// =========================================================================
// Options
// =========================================================================

#[test]
fn test_nesting_limit() {
    let parser = Parser::with_options(ParseOptions::new().max_depth(3));
    assert_eq!(parser.options().max_depth, 3);
    assert!(parser.parse(r#"{"a":{"b":{}}}"#).is_ok());

    let source = r#"{"a":{"b":{"c":{}}}}"#;
    let err = parser.parse(source).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::NestingTooDeep { limit: 3 });
    assert_eq!(err.span, Span::new(15, 16));
}

#[test]
fn test_default_nesting_limit() {
    let depth = ParseOptions::default().max_depth;
    let nested = |levels: usize| {
        let mut source = String::new();
        for _ in 1..levels {
            source.push_str("{\"k\":");
        }
        source.push_str("{}");
        for _ in 1..levels {
            source.push('}');
        }
        source
    };

    assert!(parse(&nested(depth)).is_ok());
    assert_eq!(
        kind(&nested(depth + 1)),
        ParseErrorKind::NestingTooDeep { limit: depth }
    );
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_input_length_limit() {
    assert_eq!(source_end(13), Ok(13));
    assert_eq!(source_end(MAX_SOURCE_LEN), Ok(u32::MAX));

    let err = source_end(MAX_SOURCE_LEN + 1).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InputTooLarge);
    assert_eq!(err.span, Span::new(0, 0));
    insta::assert_snapshot!(err.to_string(), @"input longer than 4294967295 bytes at offset 0");
}

#[test]
fn test_parser_is_reusable() {
    let parser = Parser::new();
    assert_eq!(parser.options().max_depth, ParseOptions::default().max_depth);
    let first = parser.parse(r#"{"a":"1"}"#).unwrap();
    assert!(parser.parse(r#"{"a" "1"}"#).is_err());
    let second = parser.parse(r#"{"a":"1"}"#).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parse_from_threads() {
    let parser = Parser::new();
    std::thread::scope(|s| {
        for i in 0..4 {
            let parser = &parser;
            s.spawn(move || {
                let source = format!(r#"{{"n":"{i}"}}"#);
                let doc = parser.parse(&source).unwrap();
                assert_eq!(doc.get_string("n"), Some(i.to_string().as_str()));
            });
        }
    });
}
