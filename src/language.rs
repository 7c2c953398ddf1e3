//! 言語タグ (RFC 5646) と Accept-Language / Content-Language
//!
//! ```text
//! Accept-Language  = #( language-range [ weight ] )
//! Content-Language = #language-tag
//! language-range   = ( 1*8ALPHA *( "-" 1*8alphanum ) ) / "*"
//! ```
//!
//! 照合は RFC 4647 Section 3.3.1 の基本フィルタリング。

use core::fmt;
use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::grammar::{self, Grammar};
use crate::limits::HeaderValueLimits;
use crate::parameter::{
    ParameterKind, ParameterName, ParameterSet, ParameterValue, Parameters, QFactor,
    sort_by_q_factor,
};
use crate::predicate::{ALPHA, ALPHA_DIGIT, AsciiSet};

/// サブタグの最大長
const MAX_SUBTAG_LENGTH: usize = 8;

/// 言語タグ名
///
/// 大文字小文字を区別しない。`*` はワイルドカード。
#[derive(Debug, Clone)]
pub struct LanguageTagName(Cow<'static, str>);

impl LanguageTagName {
    /// *
    pub const WILDCARD: LanguageTagName = LanguageTagName(Cow::Borrowed("*"));
    /// en
    pub const EN: LanguageTagName = LanguageTagName(Cow::Borrowed("en"));
    /// en-US
    pub const EN_US: LanguageTagName = LanguageTagName(Cow::Borrowed("en-US"));
    /// ja
    pub const JA: LanguageTagName = LanguageTagName(Cow::Borrowed("ja"));
    /// ja-JP
    pub const JA_JP: LanguageTagName = LanguageTagName(Cow::Borrowed("ja-JP"));

    const CONSTANTS: &'static [LanguageTagName] = &[
        LanguageTagName::WILDCARD,
        LanguageTagName::EN,
        LanguageTagName::EN_US,
        LanguageTagName::JA,
        LanguageTagName::JA_JP,
    ];

    /// 言語タグ名を作成
    pub fn new(name: &str) -> Result<Self, ParseError> {
        if let Some(constant) = Self::CONSTANTS
            .iter()
            .find(|constant| constant.0.eq_ignore_ascii_case(name))
        {
            return Ok(constant.clone());
        }
        if !is_valid_language_tag(name) {
            return Err(ParseError::invalid_argument(format!(
                "Invalid language tag {:?}",
                name
            )));
        }
        Ok(LanguageTagName(Cow::Owned(name.to_string())))
    }

    /// 名前
    pub fn value(&self) -> &str {
        &self.0
    }

    /// 主言語サブタグ (例: "en-US" なら "en")
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// * かどうか
    pub fn is_wildcard(&self) -> bool {
        self.0 == "*"
    }

    /// この範囲が `tag` に一致するか
    ///
    /// `*` はすべてに一致し、`en` は `en` と `en-US` に一致する。
    /// 照合対象がワイルドカードの場合、範囲が `*` 同士ならエラー、そうでなければ一致しない。
    ///
    /// ```rust
    /// use shiguredo_header_value::language::LanguageTagName;
    ///
    /// let en = LanguageTagName::EN;
    /// assert_eq!(en.is_match(&LanguageTagName::EN_US), Ok(true));
    /// assert_eq!(LanguageTagName::EN_US.is_match(&en), Ok(false));
    /// assert!(LanguageTagName::WILDCARD.is_match(&LanguageTagName::WILDCARD).is_err());
    /// ```
    pub fn is_match(&self, tag: &LanguageTagName) -> Result<bool, ParseError> {
        match (self.is_wildcard(), tag.is_wildcard()) {
            (true, true) => Err(ParseError::invalid_argument(
                "Cannot match wildcard language range against wildcard tag",
            )),
            (true, false) => Ok(true),
            (false, true) => Ok(false),
            (false, false) => {
                let range = self.value();
                let tag = tag.value();
                if tag.eq_ignore_ascii_case(range) {
                    return Ok(true);
                }
                // ASCII のみなのでバイト位置で切ってよい
                Ok(tag.len() > range.len()
                    && tag.as_bytes()[range.len()] == b'-'
                    && tag[..range.len()].eq_ignore_ascii_case(range))
            }
        }
    }
}

impl PartialEq for LanguageTagName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for LanguageTagName {}

impl Hash for LanguageTagName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for LanguageTagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_language_tag(name: &str) -> bool {
    let mut subtags = name.split('-');
    let Some(primary) = subtags.next() else {
        return false;
    };
    is_valid_subtag(primary, ALPHA) && subtags.all(|subtag| is_valid_subtag(subtag, ALPHA_DIGIT))
}

fn is_valid_subtag(subtag: &str, set: AsciiSet) -> bool {
    subtag.len() <= MAX_SUBTAG_LENGTH && set.matches(subtag)
}

/// 言語タグのパラメータ表
#[derive(Debug)]
pub struct LanguageTagParameters;

impl ParameterSet for LanguageTagParameters {
    const CONSTANTS: &'static [&'static str] = &["q"];

    fn kind(name: &str) -> ParameterKind {
        if name.eq_ignore_ascii_case("q") {
            ParameterKind::QFactor
        } else {
            ParameterKind::Text
        }
    }
}

/// 言語タグのパラメータ名
pub type LanguageTagParameterName = ParameterName<LanguageTagParameters>;

impl ParameterName<LanguageTagParameters> {
    /// q
    pub const Q_FACTOR: Self = Self::constant("q");
}

/// Accept-Language / Content-Language の要素
#[derive(Debug, Clone)]
pub struct LanguageTag {
    name: LanguageTagName,
    parameters: Parameters<LanguageTagParameters>,
    text: Option<String>,
}

impl LanguageTag {
    /// 新しい要素を作成
    pub fn new(name: LanguageTagName) -> Self {
        LanguageTag {
            name,
            parameters: Parameters::new(),
            text: None,
        }
    }

    /// 単一の要素をパース
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with_limits(input, &HeaderValueLimits::default())
    }

    /// 制限付きでパース
    pub fn parse_with_limits(input: &str, limits: &HeaderValueLimits) -> Result<Self, ParseError> {
        grammar::parse_one::<LanguageGrammar>(input, limits)
    }

    /// カンマ区切りのリストをパース (q 値の降順)
    ///
    /// ```rust
    /// use shiguredo_header_value::language::LanguageTag;
    ///
    /// let list = LanguageTag::parse_list("da, en-gb;q=0.8, en;q=0.7").unwrap();
    /// assert_eq!(list.len(), 3);
    /// assert_eq!(list[1].name().value(), "en-gb");
    /// ```
    pub fn parse_list(input: &str) -> Result<Vec<Self>, ParseError> {
        Self::parse_list_with_limits(input, &HeaderValueLimits::default())
    }

    /// 制限付きでリストをパース
    pub fn parse_list_with_limits(
        input: &str,
        limits: &HeaderValueLimits,
    ) -> Result<Vec<Self>, ParseError> {
        grammar::parse_list::<LanguageGrammar>(input, limits)
    }

    /// 言語タグ名
    pub fn name(&self) -> &LanguageTagName {
        &self.name
    }

    /// パラメータ
    pub fn parameters(&self) -> &Parameters<LanguageTagParameters> {
        &self.parameters
    }

    /// q 値
    pub fn q_factor(&self) -> Option<QFactor> {
        self.parameters.q_factor()
    }

    /// 言語タグ名を置き換え
    pub fn with_name(self, name: LanguageTagName) -> Self {
        LanguageTag {
            name,
            text: None,
            ..self
        }
    }

    /// パラメータをまとめて置き換え
    pub fn with_parameters(self, parameters: Parameters<LanguageTagParameters>) -> Self {
        LanguageTag {
            parameters,
            text: None,
            ..self
        }
    }

    /// パラメータを追加
    pub fn with_parameter(
        mut self,
        name: LanguageTagParameterName,
        value: ParameterValue,
    ) -> Result<Self, ParseError> {
        self.parameters.insert(name, value)?;
        self.text = None;
        Ok(self)
    }

    /// q 値を設定
    pub fn with_q_factor(self, q: f32) -> Result<Self, ParseError> {
        let q = QFactor::new(q)?;
        self.with_parameter(LanguageTagParameterName::Q_FACTOR, q.into())
    }
}

impl PartialEq for LanguageTag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.parameters == other.parameters
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => f.write_str(text),
            None => write!(f, "{}{}", self.name, self.parameters),
        }
    }
}

struct LanguageGrammar;

impl Grammar for LanguageGrammar {
    type Primary = LanguageTagName;
    type Parameters = LanguageTagParameters;
    type Output = LanguageTag;

    const LABEL: &'static str = "language tag";

    fn primary(cursor: &mut Cursor<'_>) -> Result<LanguageTagName, ParseError> {
        if cursor.eat('*') {
            return Ok(LanguageTagName::WILDCARD);
        }
        let start = cursor.offset();
        subtag(cursor, ALPHA)?;
        while cursor.eat('-') {
            subtag(cursor, ALPHA_DIGIT)?;
        }
        LanguageTagName::new(cursor.slice(start, cursor.offset()))
    }

    fn build(
        name: LanguageTagName,
        parameters: Parameters<LanguageTagParameters>,
        text: &str,
    ) -> Result<LanguageTag, ParseError> {
        Ok(LanguageTag {
            name,
            parameters,
            text: Some(text.to_string()),
        })
    }

    fn finish(items: &mut [LanguageTag]) {
        sort_by_q_factor(items, LanguageTag::q_factor);
    }
}

/// 1 から 8 文字のサブタグを読む
fn subtag(cursor: &mut Cursor<'_>, set: AsciiSet) -> Result<(), ParseError> {
    let mut length = 0;
    while cursor.current().is_some_and(|c| set.contains(c)) {
        if length == MAX_SUBTAG_LENGTH {
            return Err(cursor.invalid_character());
        }
        cursor.next();
        length += 1;
    }
    if length == 0 {
        return Err(cursor.unexpected("subtag"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tags() {
        for tag in ["en", "en-US", "zh-Hant-TW", "de-CH-1996", "x-private", "i-klingon"] {
            assert_eq!(LanguageTagName::new(tag).unwrap().value(), tag);
        }
        assert_eq!(LanguageTagName::new("JA").unwrap(), LanguageTagName::JA);
    }

    #[test]
    fn test_invalid_tags() {
        for tag in ["", "en-", "-en", "en--US", "abcdefghi", "en-abcdefghi", "1en", "en_US"] {
            assert!(LanguageTagName::new(tag).is_err(), "{tag}");
        }
    }

    #[test]
    fn test_primary_subtag() {
        assert_eq!(LanguageTagName::new("zh-Hant-TW").unwrap().primary(), "zh");
        assert_eq!(LanguageTagName::EN.primary(), "en");
    }

    #[test]
    fn test_basic_filtering() {
        let en = LanguageTagName::EN;
        assert_eq!(en.is_match(&LanguageTagName::new("EN-gb").unwrap()), Ok(true));
        assert_eq!(en.is_match(&LanguageTagName::new("eng").unwrap()), Ok(false));
        assert_eq!(en.is_match(&LanguageTagName::EN), Ok(true));
        assert_eq!(LanguageTagName::WILDCARD.is_match(&en), Ok(true));
        assert_eq!(en.is_match(&LanguageTagName::WILDCARD), Ok(false));
        assert!(matches!(
            LanguageTagName::WILDCARD.is_match(&LanguageTagName::WILDCARD),
            Err(ParseError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_list_sorted() {
        let list = LanguageTag::parse_list("en;q=0.5, *;q=0.1, ja").unwrap();
        let names: Vec<&str> = list.iter().map(|l| l.name().value()).collect();
        assert_eq!(names, ["ja", "en", "*"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(LanguageTag::parse_list("en, ").is_err());
        assert_eq!(
            LanguageTag::parse("en-"),
            Err(ParseError::missing("subtag", "en-", 3))
        );
        assert_eq!(
            LanguageTag::parse("en us"),
            Err(ParseError::invalid_character("en us", 3))
        );
    }

    #[test]
    fn test_parse_subtag_errors_have_offset() {
        assert_eq!(
            LanguageTag::parse_list("en--US"),
            Err(ParseError::invalid_character("en--US", 3))
        );
        assert_eq!(
            LanguageTag::parse_list("en, de-abcdefghij"),
            Err(ParseError::invalid_character("en, de-abcdefghij", 15))
        );
        assert_eq!(
            LanguageTag::parse("abcdefghi"),
            Err(ParseError::invalid_character("abcdefghi", 8))
        );
        assert_eq!(
            LanguageTag::parse("1en"),
            Err(ParseError::invalid_character("1en", 0))
        );
        assert_eq!(
            LanguageTag::parse("en_US"),
            Err(ParseError::invalid_character("en_US", 2))
        );
        assert_eq!(
            LanguageTag::parse("de-CH-1996; q=0.5").unwrap().name().value(),
            "de-CH-1996"
        );
    }

    #[test]
    fn test_parse_with_limits() {
        let limits = HeaderValueLimits {
            max_value_length: 4,
            ..HeaderValueLimits::default()
        };
        assert!(LanguageTag::parse_with_limits("ja", &limits).is_ok());
        assert!(matches!(
            LanguageTag::parse_with_limits("en-US", &limits),
            Err(ParseError::LimitExceeded { size: 5, .. })
        ));
    }

    #[test]
    fn test_hash_ignores_case() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(LanguageTagName::new("en-us").unwrap());
        assert!(set.contains(&LanguageTagName::EN_US));
        assert!(!set.insert(LanguageTagName::new("EN-US").unwrap()));
    }

    #[test]
    fn test_with_parameters_is_idempotent() {
        let tag = LanguageTag::parse("en-GB;q=0.8").unwrap();
        let same = tag.clone().with_parameters(tag.parameters().clone());
        assert_eq!(same, tag);
        assert_eq!(same.to_string(), "en-GB;q=0.8");
    }

    #[test]
    fn test_builder() {
        let tag = LanguageTag::new(LanguageTagName::JA_JP)
            .with_q_factor(0.9)
            .unwrap();
        assert_eq!(tag.to_string(), "ja-JP;q=0.9");
        assert_eq!(tag, LanguageTag::parse("ja-jp; q=0.9").unwrap());

        let tag = tag.with_name(LanguageTagName::EN);
        assert_eq!(tag.to_string(), "en;q=0.9");
    }
}
