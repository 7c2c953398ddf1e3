//! multipart boundary (RFC 2046 Section 5.1.1)
//!
//! ```text
//! boundary      = 0*69<bchars> bcharsnospace
//! bchars        = bcharsnospace / " "
//! bcharsnospace = DIGIT / ALPHA / "'" / "(" / ")" /
//!                 "+" / "_" / "," / "-" / "." /
//!                 "/" / ":" / "=" / "?"
//! ```

use core::fmt;

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::grammar::{quoted_string, skip_whitespace, write_quoted};
use crate::limits::HeaderValueLimits;
use crate::predicate::{BOUNDARY, RFC2045_TOKEN};

/// multipart boundary
///
/// 長さは 1 以上 [`MediaTypeBoundary::MAX_LENGTH`] 未満。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaTypeBoundary(String);

impl MediaTypeBoundary {
    /// boundary の長さの上限 (この値は含まない)
    pub const MAX_LENGTH: usize = 70;

    /// boundary を作成
    pub fn new(value: &str) -> Result<Self, ParseError> {
        if value.is_empty() {
            return Err(ParseError::invalid_argument("Boundary is empty"));
        }
        if value.len() >= Self::MAX_LENGTH {
            return Err(ParseError::invalid_argument(format!(
                "Boundary length {} must be less than {}",
                value.len(),
                Self::MAX_LENGTH
            )));
        }
        if value.ends_with(' ') {
            return Err(ParseError::invalid_argument(format!(
                "Boundary {:?} ends with space",
                value
            )));
        }
        if let Some(c) = value.chars().find(|&c| c != ' ' && !BOUNDARY.contains(c)) {
            return Err(ParseError::invalid_argument(format!(
                "Boundary {:?} contains invalid character {:?}",
                value, c
            )));
        }
        Ok(MediaTypeBoundary(value.to_string()))
    }

    /// 乱数値から boundary を生成
    ///
    /// 乱数の生成は呼び出し側の責任とする。
    ///
    /// ```rust
    /// use shiguredo_header_value::boundary::MediaTypeBoundary;
    ///
    /// let boundary = MediaTypeBoundary::from_random(0x1234);
    /// assert_eq!(boundary.value(), "----FormBoundary0000000000001234");
    /// ```
    pub fn from_random(random_value: u64) -> Self {
        MediaTypeBoundary(format!("----FormBoundary{:016x}", random_value))
    }

    /// ヘッダーテキストから boundary をパース
    ///
    /// トークンまたは引用符付き文字列を受け付ける。前後の空白は取り除く。
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with_limits(input, &HeaderValueLimits::default())
    }

    /// 制限付きでパース
    pub fn parse_with_limits(input: &str, limits: &HeaderValueLimits) -> Result<Self, ParseError> {
        limits.check_length(input)?;
        let mut cursor = Cursor::new(input);
        skip_whitespace(&mut cursor);
        let value = match cursor.current() {
            Some('"') => quoted_string(&mut cursor)?,
            _ => {
                let token = cursor.take_while(RFC2045_TOKEN);
                if token.is_empty() {
                    return Err(cursor.unexpected("boundary"));
                }
                token.to_string()
            }
        };
        skip_whitespace(&mut cursor);
        if cursor.has_more() {
            return Err(cursor.invalid_character());
        }
        MediaTypeBoundary::new(value.trim())
    }

    /// 値
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// トークンとして書けない場合は引用符付きで出力
impl fmt::Display for MediaTypeBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if RFC2045_TOKEN.matches(&self.0) {
            f.write_str(&self.0)
        } else {
            write_quoted(f, &self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid() {
        let b = MediaTypeBoundary::new("----WebKitFormBoundary7MA4YWxkTrZu0gW").unwrap();
        assert_eq!(b.to_string(), "----WebKitFormBoundary7MA4YWxkTrZu0gW");
        assert!(MediaTypeBoundary::new("gc0p4Jq0M2Yt08jU534c0p").is_ok());
        assert!(MediaTypeBoundary::new("a b").is_ok());
    }

    #[test]
    fn test_length_limit() {
        assert!(MediaTypeBoundary::new(&"a".repeat(69)).is_ok());
        assert!(MediaTypeBoundary::new(&"a".repeat(70)).is_err());
        assert!(MediaTypeBoundary::new("").is_err());
    }

    #[test]
    fn test_invalid_characters() {
        assert!(MediaTypeBoundary::new("a\"b").is_err());
        assert!(MediaTypeBoundary::new("a;b").is_err());
        assert!(MediaTypeBoundary::new("ab ").is_err());
        assert!(MediaTypeBoundary::new("日本").is_err());
    }

    #[test]
    fn test_parse_token_and_quoted() {
        assert_eq!(MediaTypeBoundary::parse(" abc ").unwrap().value(), "abc");
        assert_eq!(
            MediaTypeBoundary::parse("\" a:b \"").unwrap().value(),
            "a:b"
        );
        assert!(MediaTypeBoundary::parse("\"abc").is_err());
        assert!(MediaTypeBoundary::parse("abc def").is_err());
        assert!(MediaTypeBoundary::parse("").is_err());
    }

    #[test]
    fn test_parse_with_limits() {
        let limits = HeaderValueLimits {
            max_value_length: 5,
            ..HeaderValueLimits::default()
        };
        assert!(MediaTypeBoundary::parse_with_limits("\"ab\"", &limits).is_ok());
        assert!(matches!(
            MediaTypeBoundary::parse_with_limits(" abcde", &limits),
            Err(ParseError::LimitExceeded { size: 6, .. })
        ));
    }

    #[test]
    fn test_display_quotes_special_characters() {
        let b = MediaTypeBoundary::new("simple boundary").unwrap();
        assert_eq!(b.to_string(), "\"simple boundary\"");
        let b = MediaTypeBoundary::new("a:b").unwrap();
        assert_eq!(b.to_string(), "\"a:b\"");
    }

    #[test]
    fn test_from_random_is_valid() {
        let b = MediaTypeBoundary::from_random(u64::MAX);
        assert_eq!(MediaTypeBoundary::new(b.value()), Ok(b));
    }
}
