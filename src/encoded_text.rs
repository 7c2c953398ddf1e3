//! RFC 5987 拡張パラメータ値
//!
//! ```text
//! ext-value     = charset  "'" [ language ] "'" value-chars
//! value-chars   = *( pct-encoded / attr-char )
//! pct-encoded   = "%" HEXDIG HEXDIG
//! ```
//!
//! 復号できる文字セットは UTF-8、ISO-8859-1、US-ASCII。
//!
//! ```rust
//! use shiguredo_header_value::encoded_text::EncodedText;
//!
//! let text = EncodedText::parse("UTF-8'ja'%E3%83%86%E3%82%B9%E3%83%88.txt").unwrap();
//! assert_eq!(text.value(), "テスト.txt");
//! assert_eq!(text.language().map(|l| l.value()), Some("ja"));
//! assert_eq!(text.to_string(), "UTF-8'ja'%E3%83%86%E3%82%B9%E3%83%88.txt");
//! ```

use core::fmt;

use crate::charset::CharsetName;
use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::language::LanguageTagName;
use crate::limits::HeaderValueLimits;
use crate::predicate::{ATTR_CHAR, AsciiSet, CHARSET, LANGUAGE_TAG};

/// ext-value の charset 部分 (区切りの `'` を含まない)
const EXT_CHARSET: AsciiSet = CHARSET.remove("'");

/// RFC 5987 拡張パラメータ値 (復号済み)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    charset: CharsetName,
    language: Option<LanguageTagName>,
    value: String,
}

impl EncodedText {
    /// 値を作成
    ///
    /// 値が文字セットで表現できなければエラー。
    pub fn new(
        charset: CharsetName,
        language: Option<LanguageTagName>,
        value: &str,
    ) -> Result<Self, ParseError> {
        encode_bytes(&charset, value)?;
        Ok(EncodedText {
            charset,
            language,
            value: value.to_string(),
        })
    }

    /// UTF-8 の値を作成
    pub fn utf8(value: &str) -> Self {
        EncodedText {
            charset: CharsetName::UTF_8,
            language: None,
            value: value.to_string(),
        }
    }

    /// `charset'language'value` をパース
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with_limits(input, &HeaderValueLimits::default())
    }

    /// 制限付きでパース
    pub fn parse_with_limits(input: &str, limits: &HeaderValueLimits) -> Result<Self, ParseError> {
        limits.check_length(input)?;
        let mut cursor = Cursor::new(input);
        let charset = cursor.take_while(EXT_CHARSET);
        if charset.is_empty() {
            return Err(cursor.unexpected("charset"));
        }
        let charset = CharsetName::new(charset)?;
        if !cursor.eat('\'') {
            return Err(cursor.unexpected("'\\''"));
        }
        let language = cursor.take_while(LANGUAGE_TAG);
        let language = if language.is_empty() {
            None
        } else {
            Some(LanguageTagName::new(language)?)
        };
        if !cursor.eat('\'') {
            return Err(cursor.unexpected("'\\''"));
        }

        let mut bytes = Vec::new();
        while let Some(c) = cursor.current() {
            if c == '%' {
                cursor.next();
                let high = hex_digit(&cursor)?;
                cursor.next();
                let low = hex_digit(&cursor)?;
                cursor.next();
                bytes.push((high << 4) | low);
            } else if ATTR_CHAR.contains(c) {
                bytes.push(c as u8);
                cursor.next();
            } else {
                return Err(cursor.invalid_character());
            }
        }

        let value = decode_bytes(&charset, bytes)?;
        Ok(EncodedText {
            charset,
            language,
            value,
        })
    }

    /// 文字セット
    pub fn charset(&self) -> &CharsetName {
        &self.charset
    }

    /// 言語タグ
    pub fn language(&self) -> Option<&LanguageTagName> {
        self.language.as_ref()
    }

    /// 復号済みの値
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for EncodedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'", self.charset)?;
        if let Some(language) = &self.language {
            write!(f, "{}", language)?;
        }
        f.write_str("'")?;
        // new / parse で検査済みなので失敗しない
        let bytes = encode_bytes(&self.charset, &self.value).map_err(|_| fmt::Error)?;
        for byte in bytes {
            if byte < 0x80 && ATTR_CHAR.contains(byte as char) {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "%{:02X}", byte)?;
            }
        }
        Ok(())
    }
}

fn hex_digit(cursor: &Cursor<'_>) -> Result<u8, ParseError> {
    let c = cursor.current_or_missing("hex digit")?;
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| cursor.invalid_character())
}

fn decode_bytes(charset: &CharsetName, bytes: Vec<u8>) -> Result<String, ParseError> {
    if *charset == CharsetName::UTF_8 {
        String::from_utf8(bytes).map_err(|e| ParseError::invalid_argument(e.to_string()))
    } else if *charset == CharsetName::ISO_8859_1 {
        Ok(bytes.into_iter().map(char::from).collect())
    } else if *charset == CharsetName::US_ASCII {
        if let Some(byte) = bytes.iter().find(|b| !b.is_ascii()) {
            return Err(ParseError::invalid_argument(format!(
                "Byte 0x{:02X} is not US-ASCII",
                byte
            )));
        }
        Ok(bytes.into_iter().map(char::from).collect())
    } else {
        Err(unsupported(charset))
    }
}

fn encode_bytes(charset: &CharsetName, value: &str) -> Result<Vec<u8>, ParseError> {
    if *charset == CharsetName::UTF_8 {
        return Ok(value.as_bytes().to_vec());
    }
    let max: u8 = if *charset == CharsetName::ISO_8859_1 {
        0xFF
    } else if *charset == CharsetName::US_ASCII {
        0x7F
    } else {
        return Err(unsupported(charset));
    };
    value
        .chars()
        .map(|c| {
            u8::try_from(c)
                .ok()
                .filter(|&b| b <= max)
                .ok_or_else(|| {
                    ParseError::invalid_argument(format!(
                        "Character {:?} cannot be encoded in {}",
                        c, charset
                    ))
                })
        })
        .collect()
}

fn unsupported(charset: &CharsetName) -> ParseError {
    ParseError::invalid_argument(format!("Unsupported charset {}", charset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_utf8() {
        let text = EncodedText::parse("UTF-8''%E2%82%AC%20rates").unwrap();
        assert_eq!(text.value(), "€ rates");
        assert_eq!(text.charset(), &CharsetName::UTF_8);
        assert_eq!(text.language(), None);
        assert_eq!(text.to_string(), "UTF-8''%E2%82%AC%20rates");
    }

    #[test]
    fn test_parse_iso_8859_1() {
        let text = EncodedText::parse("iso-8859-1'en'%A3%20rates").unwrap();
        assert_eq!(text.value(), "£ rates");
        assert_eq!(text.to_string(), "ISO-8859-1'en'%A3%20rates");
    }

    #[test]
    fn test_parse_lowercase_hex() {
        let text = EncodedText::parse("utf-8''%c3%a9").unwrap();
        assert_eq!(text.value(), "é");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            EncodedText::parse("'en'abc"),
            Err(ParseError::invalid_character("'en'abc", 0))
        );
        assert_eq!(
            EncodedText::parse("UTF-8"),
            Err(ParseError::missing("'\\''", "UTF-8", 5))
        );
        assert_eq!(
            EncodedText::parse("UTF-8''%2"),
            Err(ParseError::missing("hex digit", "UTF-8''%2", 9))
        );
        assert_eq!(
            EncodedText::parse("UTF-8''%zz"),
            Err(ParseError::invalid_character("UTF-8''%zz", 8))
        );
        assert_eq!(
            EncodedText::parse("UTF-8''a b"),
            Err(ParseError::invalid_character("UTF-8''a b", 8))
        );
        assert!(EncodedText::parse("UTF-8''%FF").is_err());
        assert!(EncodedText::parse("US-ASCII''%80").is_err());
        assert!(EncodedText::parse("Shift_JIS''%82%A0").is_err());
    }

    #[test]
    fn test_parse_with_limits() {
        let limits = HeaderValueLimits {
            max_value_length: 10,
            ..HeaderValueLimits::default()
        };
        assert!(EncodedText::parse_with_limits("UTF-8''abc", &limits).is_ok());
        assert!(matches!(
            EncodedText::parse_with_limits("UTF-8''abcd", &limits),
            Err(ParseError::LimitExceeded {
                what: "header value",
                size: 11,
                limit: 10,
            })
        ));
        let long = format!("UTF-8''{}", "a".repeat(8 * 1024));
        assert!(matches!(
            EncodedText::parse(&long),
            Err(ParseError::LimitExceeded { .. })
        ));
    }

    #[test]
    fn test_new_checks_encodable() {
        assert!(EncodedText::new(CharsetName::ISO_8859_1, None, "café").is_ok());
        assert!(EncodedText::new(CharsetName::ISO_8859_1, None, "日本").is_err());
        assert!(EncodedText::new(CharsetName::US_ASCII, None, "é").is_err());
        assert!(EncodedText::new(CharsetName::EUC_JP, None, "a").is_err());
    }

    #[test]
    fn test_display_encodes_non_attr_chars() {
        let text = EncodedText::utf8("a b;c");
        assert_eq!(text.to_string(), "UTF-8''a%20b%3Bc");
        assert_eq!(EncodedText::parse(&text.to_string()), Ok(text));
    }
}
