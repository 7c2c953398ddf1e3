//! 任意入力に対する堅牢性のプロパティテスト

use proptest::prelude::*;
use shiguredo_header_value::boundary::MediaTypeBoundary;
use shiguredo_header_value::charset::CharsetHeaderValue;
use shiguredo_header_value::content_disposition::ContentDisposition;
use shiguredo_header_value::encoded_text::EncodedText;
use shiguredo_header_value::etag::ETag;
use shiguredo_header_value::language::LanguageTag;
use shiguredo_header_value::link::Link;
use shiguredo_header_value::media_type::MediaType;
use shiguredo_header_value::token::TokenHeaderValue;
use shiguredo_header_value::{HeaderValueLimits, ParseError};

// ヘッダー値に現れやすい文字を多めに含む入力
fn header_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9/;=,\"\\\\ \t()*<>'%W-]{0,48}".prop_map(|s| s),
        "\\PC{0,24}".prop_map(|s| s),
        ".{0,24}".prop_map(|s| s),
    ]
}

// エラー位置は常に入力の文字境界を指す
fn assert_offset<T>(input: &str, result: Result<T, ParseError>) -> Result<(), TestCaseError> {
    if let Err(e) = result {
        if let Some(offset) = e.offset() {
            prop_assert!(input.is_char_boundary(offset), "offset {} in {:?}", offset, input);
        }
        // Display が panic しないこと
        let _ = e.to_string();
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_parsers_never_panic(input in header_like()) {
        assert_offset(&input, MediaType::parse(&input))?;
        assert_offset(&input, MediaType::parse_list(&input))?;
        assert_offset(&input, CharsetHeaderValue::parse_list(&input))?;
        assert_offset(&input, LanguageTag::parse_list(&input))?;
        assert_offset(&input, TokenHeaderValue::parse_list(&input))?;
        assert_offset(&input, ETag::parse(&input))?;
        assert_offset(&input, ETag::parse_list(&input))?;
        assert_offset(&input, ContentDisposition::parse(&input))?;
        assert_offset(&input, Link::parse_list(&input))?;
        assert_offset(&input, EncodedText::parse(&input))?;
        assert_offset(&input, MediaTypeBoundary::parse(&input))?;
    }
}

// パースに成功した値は Display の出力を再パースしても同じ値になる
proptest! {
    #[test]
    fn prop_parsed_media_type_display_reparses(input in header_like()) {
        if let Ok(mt) = MediaType::parse(&input) {
            let reparsed = MediaType::parse(&mt.to_string()).unwrap();
            prop_assert_eq!(reparsed, mt);
        }
    }
}

// 制限を超える入力は内容に関わらず拒否される
proptest! {
    #[test]
    fn prop_length_limit(input in "[a-z]{9,32}/[a-z]{1,8}") {
        let limits = HeaderValueLimits {
            max_value_length: 8,
            ..HeaderValueLimits::default()
        };
        let result = MediaType::parse_with_limits(&input, &limits);
        prop_assert!(
            matches!(result, Err(ParseError::LimitExceeded { .. })),
            "unexpected: {:?}",
            result
        );
    }
}
