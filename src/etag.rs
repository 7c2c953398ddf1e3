//! ETag ヘッダーパース (RFC 9110 Section 8.8.3)
//!
//! ## 概要
//!
//! ```text
//! entity-tag = [ weak ] opaque-tag
//! weak       = %s"W/"
//! opaque-tag = DQUOTE *etagc DQUOTE
//! If-Match   = "*" / #entity-tag
//! ```
//!
//! 単一値 (ETag ヘッダー) はタグを 1 つだけ受け付け、
//! リスト (If-Match / If-None-Match) はカンマ区切りと `*` を受け付ける。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_header_value::etag::ETag;
//!
//! // Strong ETag
//! let etag = ETag::parse("\"abc123\"").unwrap();
//! assert!(etag.is_strong());
//! assert_eq!(etag.tag(), "abc123");
//!
//! // Weak ETag
//! let etag = ETag::parse("W/\"abc123\"").unwrap();
//! assert!(etag.is_weak());
//!
//! // If-Match
//! let list = ETag::parse_list("\"abc\", \"def\"").unwrap();
//! assert!(ETag::if_match(&list, &ETag::strong("abc").unwrap()));
//! ```

use core::fmt;
use std::borrow::Cow;

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::grammar::{self, Grammar};
use crate::limits::HeaderValueLimits;
use crate::parameter::{ParameterKind, ParameterSet, Parameters};
use crate::predicate::ETAG;

/// Weak / Strong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ETagValidator {
    /// W/ 付き
    Weak,
    /// W/ なし
    Strong,
}

/// Entity Tag
///
/// タグ値は大文字小文字を区別する。等価性は Weak / Strong も含めて比較する。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ETag {
    tag: Cow<'static, str>,
    validator: ETagValidator,
    wildcard: bool,
}

impl ETag {
    /// `*` (If-Match / If-None-Match でのみ使える)
    pub const WILDCARD: ETag = ETag {
        tag: Cow::Borrowed("*"),
        validator: ETagValidator::Strong,
        wildcard: true,
    };

    /// 新しい ETag を作成
    pub fn new(tag: &str, validator: ETagValidator) -> Result<Self, ParseError> {
        if let Some(c) = tag.chars().find(|&c| !is_etagc(c)) {
            return Err(ParseError::invalid_argument(format!(
                "Invalid character {:?} in entity tag {:?}",
                c, tag
            )));
        }
        Ok(ETag {
            tag: Cow::Owned(tag.to_string()),
            validator,
            wildcard: false,
        })
    }

    /// 新しい Strong ETag を作成
    pub fn strong(tag: &str) -> Result<Self, ParseError> {
        ETag::new(tag, ETagValidator::Strong)
    }

    /// 新しい Weak ETag を作成
    pub fn weak(tag: &str) -> Result<Self, ParseError> {
        ETag::new(tag, ETagValidator::Weak)
    }

    /// ETag ヘッダー文字列をパース
    ///
    /// 2 つ目のタグや末尾の区切りはエラーになる。
    ///
    /// # 例
    ///
    /// ```rust
    /// use shiguredo_header_value::etag::ETag;
    ///
    /// assert!(ETag::parse("\"v1.0\"").is_ok());
    /// assert!(ETag::parse("\"A\",\"B\"").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with_limits(input, &HeaderValueLimits::default())
    }

    /// 制限付きでパース
    pub fn parse_with_limits(input: &str, limits: &HeaderValueLimits) -> Result<Self, ParseError> {
        grammar::parse_one::<ETagGrammar<false>>(input, limits)
    }

    /// If-Match / If-None-Match の値をパース
    ///
    /// `*` は単独でのみ使える。
    pub fn parse_list(input: &str) -> Result<Vec<Self>, ParseError> {
        Self::parse_list_with_limits(input, &HeaderValueLimits::default())
    }

    /// 制限付きでリストをパース
    pub fn parse_list_with_limits(
        input: &str,
        limits: &HeaderValueLimits,
    ) -> Result<Vec<Self>, ParseError> {
        let list = grammar::parse_list::<ETagGrammar<true>>(input, limits)?;
        if list.len() > 1 && list.iter().any(ETag::is_wildcard) {
            return Err(ParseError::invalid_argument(format!(
                "Wildcard entity tag must appear alone in {:?}",
                input
            )));
        }
        Ok(list)
    }

    /// Weak / Strong
    pub fn validator(&self) -> ETagValidator {
        self.validator
    }

    /// Weak ETag かどうか
    pub fn is_weak(&self) -> bool {
        self.validator == ETagValidator::Weak
    }

    /// Strong ETag かどうか
    pub fn is_strong(&self) -> bool {
        self.validator == ETagValidator::Strong
    }

    /// `*` かどうか
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// タグ値を取得 (引用符なし)
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Strong 比較 (RFC 9110 Section 8.8.3.2)
    ///
    /// 両方が Strong ETag で、タグ値が同一の場合に true
    pub fn strong_compare(&self, other: &ETag) -> bool {
        self.is_strong() && other.is_strong() && self.weak_compare(other)
    }

    /// Weak 比較 (RFC 9110 Section 8.8.3.2)
    ///
    /// タグ値が同一の場合に true (weak フラグは無視)
    pub fn weak_compare(&self, other: &ETag) -> bool {
        !self.wildcard && !other.wildcard && self.tag == other.tag
    }

    /// 条件の ETag が現在の ETag に一致するか (`*` はすべてに一致、Weak 比較)
    pub fn is_match(&self, current: &ETag) -> bool {
        self.wildcard || self.weak_compare(current)
    }

    /// If-Match の評価 (Strong 比較)
    pub fn if_match(list: &[ETag], current: &ETag) -> bool {
        list.iter().any(|etag| etag.wildcard || etag.strong_compare(current))
    }

    /// If-None-Match の評価 (Weak 比較)
    ///
    /// いずれかに一致したら false (条件不成立)。
    pub fn if_none_match(list: &[ETag], current: &ETag) -> bool {
        !list.iter().any(|etag| etag.is_match(current))
    }
}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wildcard {
            return f.write_str("*");
        }
        match self.validator {
            ETagValidator::Weak => write!(f, "W/\"{}\"", self.tag),
            ETagValidator::Strong => write!(f, "\"{}\"", self.tag),
        }
    }
}

/// etagc 文字 (%x21 / %x23-7E / obs-text)
fn is_etagc(c: char) -> bool {
    ETAG.contains(c) || !c.is_ascii()
}

/// ETag はパラメータを持たない
struct ETagParameters;

impl ParameterSet for ETagParameters {
    const CONSTANTS: &'static [&'static str] = &[];

    fn kind(_name: &str) -> ParameterKind {
        ParameterKind::Text
    }
}

/// `WILDCARD` は `*` を受け付けるか
struct ETagGrammar<const WILDCARD: bool>;

impl<const WILDCARD: bool> Grammar for ETagGrammar<WILDCARD> {
    type Primary = ETag;
    type Parameters = ETagParameters;
    type Output = ETag;

    const LABEL: &'static str = "entity tag";
    const PARAMETERS: bool = false;

    fn primary(cursor: &mut Cursor<'_>) -> Result<ETag, ParseError> {
        if WILDCARD && cursor.eat('*') {
            return Ok(ETag::WILDCARD);
        }
        let validator = if cursor.eat('W') {
            if !cursor.eat('/') {
                return Err(cursor.unexpected("'/'"));
            }
            ETagValidator::Weak
        } else {
            ETagValidator::Strong
        };
        if !cursor.eat('"') {
            return Err(cursor.unexpected("'\"'"));
        }
        let start = cursor.offset();
        loop {
            match cursor.current() {
                None => return Err(cursor.missing("closing '\"'")),
                Some('"') => break,
                Some(c) if is_etagc(c) => cursor.next(),
                Some(_) => return Err(cursor.invalid_character()),
            }
        }
        let tag = cursor.slice(start, cursor.offset()).to_string();
        cursor.next();
        Ok(ETag {
            tag: Cow::Owned(tag),
            validator,
            wildcard: false,
        })
    }

    fn build(
        etag: ETag,
        _parameters: Parameters<ETagParameters>,
        _text: &str,
    ) -> Result<ETag, ParseError> {
        Ok(etag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strong() {
        let etag = ETag::parse("\"abc123\"").unwrap();
        assert!(etag.is_strong());
        assert!(!etag.is_weak());
        assert_eq!(etag.tag(), "abc123");
        assert_eq!(etag.to_string(), "\"abc123\"");
    }

    #[test]
    fn test_parse_weak() {
        let etag = ETag::parse("  W/\"abc123\"  ").unwrap();
        assert!(etag.is_weak());
        assert_eq!(etag.tag(), "abc123");
        assert_eq!(etag.to_string(), "W/\"abc123\"");
    }

    #[test]
    fn test_parse_empty_tag() {
        let etag = ETag::parse("\"\"").unwrap();
        assert_eq!(etag.tag(), "");
    }

    #[test]
    fn test_parse_obs_text() {
        let etag = ETag::parse("\"ä\"").unwrap();
        assert_eq!(etag.tag(), "ä");
    }

    #[test]
    fn test_parse_one_rejects_second_tag() {
        assert_eq!(
            ETag::parse("\"A\",\"B\""),
            Err(ParseError::invalid_character("\"A\",\"B\"", 3))
        );
        assert_eq!(
            ETag::parse("\"A\","),
            Err(ParseError::invalid_character("\"A\",", 3))
        );
        assert_eq!(ETag::parse_list("\"A\",\"B\"").unwrap().len(), 2);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(ETag::parse("abc"), Err(ParseError::invalid_character("abc", 0)));
        assert_eq!(
            ETag::parse("\"abc"),
            Err(ParseError::missing("closing '\"'", "\"abc", 4))
        );
        assert_eq!(
            ETag::parse("W\"abc\""),
            Err(ParseError::invalid_character("W\"abc\"", 1))
        );
        assert_eq!(
            ETag::parse("w/\"abc\""),
            Err(ParseError::invalid_character("w/\"abc\"", 0))
        );
        assert_eq!(
            ETag::parse("\"a c\""),
            Err(ParseError::invalid_character("\"a c\"", 2))
        );
        assert_eq!(
            ETag::parse("\"abc\";x=1"),
            Err(ParseError::invalid_character("\"abc\";x=1", 5))
        );
        assert_eq!(ETag::parse("*"), Err(ParseError::invalid_character("*", 0)));
        assert_eq!(ETag::parse(""), Err(ParseError::missing("entity tag", "", 0)));
    }

    #[test]
    fn test_parse_list_wildcard() {
        let list = ETag::parse_list(" * ").unwrap();
        assert_eq!(list, [ETag::WILDCARD]);
        assert_eq!(list[0].to_string(), "*");
        assert!(matches!(
            ETag::parse_list("*, \"a\""),
            Err(ParseError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_equality() {
        assert_eq!(ETag::strong("a").unwrap(), ETag::parse("\"a\"").unwrap());
        assert_ne!(ETag::strong("a").unwrap(), ETag::weak("a").unwrap());
        assert_ne!(ETag::strong("a").unwrap(), ETag::strong("A").unwrap());
        assert_ne!(ETag::strong("*").unwrap(), ETag::WILDCARD);
    }

    #[test]
    fn test_compare() {
        // RFC 9110 Section 8.8.3.2 の表
        let w1 = ETag::weak("1").unwrap();
        let w2 = ETag::weak("2").unwrap();
        let s1 = ETag::strong("1").unwrap();

        assert!(!w1.strong_compare(&w1));
        assert!(w1.weak_compare(&w1));
        assert!(!w1.strong_compare(&w2));
        assert!(!w1.weak_compare(&w2));
        assert!(!w1.strong_compare(&s1));
        assert!(w1.weak_compare(&s1));
        assert!(s1.strong_compare(&s1));
        assert!(s1.weak_compare(&s1));
    }

    #[test]
    fn test_conditional() {
        let current = ETag::strong("abc").unwrap();
        let list = ETag::parse_list("\"xyz\", \"abc\"").unwrap();
        assert!(ETag::if_match(&list, &current));
        assert!(!ETag::if_none_match(&list, &current));

        let weak = ETag::parse_list("W/\"abc\"").unwrap();
        assert!(!ETag::if_match(&weak, &current));
        assert!(!ETag::if_none_match(&weak, &current));

        let any = ETag::parse_list("*").unwrap();
        assert!(ETag::if_match(&any, &current));
        assert!(!ETag::if_none_match(&any, &current));
        assert!(ETag::if_none_match(&[], &current));
    }

    #[test]
    fn test_new_invalid() {
        assert!(ETag::strong("a\"b").is_err());
        assert!(ETag::strong("a b").is_err());
        assert!(ETag::weak("a\tb").is_err());
    }
}
