//! エラー位置のテスト
//!
//! 文法ごとに、どの入力でどの位置のどの種類のエラーになるかを表で確認する。
//! 位置はすべてバイトオフセット。

use shiguredo_header_value::charset::CharsetHeaderValue;
use shiguredo_header_value::encoded_text::EncodedText;
use shiguredo_header_value::etag::ETag;
use shiguredo_header_value::language::LanguageTag;
use shiguredo_header_value::link::Link;
use shiguredo_header_value::media_type::MediaType;
use shiguredo_header_value::token::TokenHeaderValue;
use shiguredo_header_value::{HeaderError, ParseError, header};

#[derive(Debug, PartialEq)]
enum Expected {
    Invalid(char, usize),
    Missing(&'static str, usize),
}

fn classify(e: ParseError) -> Expected {
    match e {
        ParseError::InvalidCharacter {
            character, offset, ..
        } => Expected::Invalid(character, offset),
        ParseError::Missing { what, offset, .. } => Expected::Missing(what, offset),
        other => panic!("unexpected error: {:?}", other),
    }
}

fn media_type(input: &str) -> Expected {
    classify(MediaType::parse(input).unwrap_err())
}

#[test]
fn test_media_type_positions() {
    let cases = [
        ("type/;", Expected::Missing("sub type", 5)),
        ("type/", Expected::Missing("sub type", 5)),
        ("/subtype", Expected::Missing("type", 0)),
        ("", Expected::Missing("media type", 0)),
        ("te xt/html", Expected::Invalid(' ', 2)),
        ("text", Expected::Missing("'/'", 4)),
        ("text/html; charset", Expected::Missing("'='", 18)),
        ("text/html; charset=", Expected::Missing("parameter value", 19)),
        ("text/html; name=\"abc", Expected::Missing("closing '\"'", 20)),
        ("text/html, text/plain", Expected::Invalid(',', 9)),
        ("text/plain (comment", Expected::Missing("')'", 19)),
        ("text/html;", Expected::Missing("parameter name", 10)),
        ("text/html;;;", Expected::Invalid(';', 10)),
    ];
    for (input, expected) in cases {
        assert_eq!(media_type(input), expected, "input: {:?}", input);
    }
}

#[test]
fn test_list_positions() {
    assert_eq!(
        classify(CharsetHeaderValue::parse_list("utf-8,,iso-8859-1").unwrap_err()),
        Expected::Invalid(',', 6)
    );
    assert_eq!(
        classify(LanguageTag::parse_list("en, ").unwrap_err()),
        Expected::Missing("language tag", 4)
    );
    assert_eq!(
        classify(TokenHeaderValue::parse_list("gzip br").unwrap_err()),
        Expected::Invalid('b', 5)
    );
    assert_eq!(
        classify(Link::parse_list("</a>, <https://example.com").unwrap_err()),
        Expected::Missing("'>'", 26)
    );
}

#[test]
fn test_language_tag_positions() {
    let cases = [
        ("en--US", Expected::Invalid('-', 3)),
        ("en, de-abcdefghij", Expected::Invalid('i', 15)),
        ("1en", Expected::Invalid('1', 0)),
        ("en-", Expected::Missing("subtag", 3)),
        ("en-US, fr-", Expected::Missing("subtag", 10)),
    ];
    for (input, expected) in cases {
        let e = LanguageTag::parse_list(input).unwrap_err();
        assert_eq!(classify(e), expected, "input: {:?}", input);
    }
}

#[test]
fn test_token_parameter_positions() {
    assert_eq!(
        classify(TokenHeaderValue::parse("gzip;").unwrap_err()),
        Expected::Missing("parameter name", 5)
    );
    assert_eq!(
        classify(TokenHeaderValue::parse_list("gzip; , br").unwrap_err()),
        Expected::Invalid(',', 6)
    );
}

#[test]
fn test_etag_positions() {
    assert_eq!(
        classify(ETag::parse("W/abc").unwrap_err()),
        Expected::Invalid('a', 2)
    );
    assert_eq!(
        classify(ETag::parse("\"abc").unwrap_err()),
        Expected::Missing("closing '\"'", 4)
    );
    assert_eq!(
        classify(ETag::parse("\"a\" \"b\"").unwrap_err()),
        Expected::Invalid('"', 4)
    );
}

#[test]
fn test_encoded_text_positions() {
    assert_eq!(
        classify(EncodedText::parse("UTF-8'en'%4").unwrap_err()),
        Expected::Missing("hex digit", 11)
    );
    assert_eq!(
        classify(EncodedText::parse("UTF-8'en'%zz").unwrap_err()),
        Expected::Invalid('z', 10)
    );
}

#[test]
fn test_multibyte_offset() {
    // "日本" は 6 バイト
    assert_eq!(media_type("text/plain; a=b 日本"), Expected::Invalid('日', 16));
}

#[test]
fn test_messages() {
    let e = MediaType::parse("type/;").unwrap_err();
    assert_eq!(e.to_string(), "Missing sub type at 5 in \"type/;\"");

    let e = MediaType::parse("/subtype").unwrap_err();
    assert_eq!(e.to_string(), "Missing type at 0 in \"/subtype\"");

    let e = MediaType::parse("te xt/html").unwrap_err();
    assert_eq!(e.to_string(), "Invalid character ' ' at 2 in \"te xt/html\"");

    let e = MediaType::parse("text/html; q=abc").unwrap_err();
    assert_eq!(
        e.to_string(),
        "Failed to convert \"q\" value \"abc\", message: invalid float literal"
    );
    assert_eq!(e.offset(), None);
}

#[test]
fn test_header_error_wraps_parse_error() {
    let e = header::CONTENT_TYPE.parse("type/;").unwrap_err();
    assert_eq!(
        e.to_string(),
        "Header \"Content-Type\": invalid value \"type/;\": Missing sub type at 5 in \"type/;\""
    );
    let HeaderError::Parse { source, .. } = e else {
        panic!("expected parse error");
    };
    assert_eq!(source.offset(), Some(5));
}

#[test]
fn test_list_fails_as_a_whole() {
    // 最後の要素だけが不正でもリスト全体がエラー
    assert!(MediaType::parse_list("text/html, application/json, image/").is_err());
    assert!(ETag::parse_list("\"a\", \"b\", c").is_err());
}
