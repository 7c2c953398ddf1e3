//! 文字セット名と Accept-Charset (RFC 9110 Section 12.5.2)
//!
//! ```text
//! Accept-Charset = #( ( token / "*" ) [ weight ] )
//! ```
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_header_value::charset::{CharsetHeaderValue, CharsetName};
//!
//! let list = CharsetHeaderValue::parse_list("utf-8; q=0.5, utf-16; q=0.75").unwrap();
//! assert_eq!(list[0].charset(), &CharsetName::UTF_16);
//! assert_eq!(list[1].charset(), &CharsetName::UTF_8);
//! ```

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
use crate::predicate::CHARSET;

/// 文字セット名
///
/// 大文字小文字を区別しない。よく使う名前は定数を共有する。
#[derive(Debug, Clone)]
pub struct CharsetName(Cow<'static, str>);

impl CharsetName {
    /// *
    pub const WILDCARD: CharsetName = CharsetName(Cow::Borrowed("*"));
    /// UTF-8
    pub const UTF_8: CharsetName = CharsetName(Cow::Borrowed("UTF-8"));
    /// UTF-16
    pub const UTF_16: CharsetName = CharsetName(Cow::Borrowed("UTF-16"));
    /// UTF-16BE
    pub const UTF_16BE: CharsetName = CharsetName(Cow::Borrowed("UTF-16BE"));
    /// UTF-16LE
    pub const UTF_16LE: CharsetName = CharsetName(Cow::Borrowed("UTF-16LE"));
    /// US-ASCII
    pub const US_ASCII: CharsetName = CharsetName(Cow::Borrowed("US-ASCII"));
    /// ISO-8859-1
    pub const ISO_8859_1: CharsetName = CharsetName(Cow::Borrowed("ISO-8859-1"));
    /// Shift_JIS
    pub const SHIFT_JIS: CharsetName = CharsetName(Cow::Borrowed("Shift_JIS"));
    /// EUC-JP
    pub const EUC_JP: CharsetName = CharsetName(Cow::Borrowed("EUC-JP"));

    const CONSTANTS: &'static [CharsetName] = &[
        CharsetName::WILDCARD,
        CharsetName::UTF_8,
        CharsetName::UTF_16,
        CharsetName::UTF_16BE,
        CharsetName::UTF_16LE,
        CharsetName::US_ASCII,
        CharsetName::ISO_8859_1,
        CharsetName::SHIFT_JIS,
        CharsetName::EUC_JP,
    ];

    /// 文字セット名を作成
    ///
    /// 既知の名前なら定数を返す。
    pub fn new(name: &str) -> Result<Self, ParseError> {
        if let Some(constant) = Self::CONSTANTS
            .iter()
            .find(|constant| constant.0.eq_ignore_ascii_case(name))
        {
            return Ok(constant.clone());
        }
        if !CHARSET.matches(name) {
            return Err(ParseError::invalid_argument(format!(
                "Invalid charset name {:?}",
                name
            )));
        }
        Ok(CharsetName(Cow::Owned(name.to_string())))
    }

    /// 名前
    pub fn value(&self) -> &str {
        &self.0
    }

    /// * かどうか
    pub fn is_wildcard(&self) -> bool {
        self.0 == "*"
    }

    /// `other` がこの範囲に含まれるか (* はすべてに一致)
    pub fn is_match(&self, other: &CharsetName) -> bool {
        self.is_wildcard() || self == other
    }
}

impl PartialEq for CharsetName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for CharsetName {}

impl Hash for CharsetName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for CharsetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accept-Charset のパラメータ表
#[derive(Debug)]
pub struct CharsetParameters;

impl ParameterSet for CharsetParameters {
    const CONSTANTS: &'static [&'static str] = &["q"];

    fn kind(name: &str) -> ParameterKind {
        if name.eq_ignore_ascii_case("q") {
            ParameterKind::QFactor
        } else {
            ParameterKind::Text
        }
    }
}

/// Accept-Charset のパラメータ名
pub type CharsetParameterName = ParameterName<CharsetParameters>;

impl ParameterName<CharsetParameters> {
    /// q
    pub const Q_FACTOR: Self = Self::constant("q");
}

/// Accept-Charset の要素
#[derive(Debug, Clone)]
pub struct CharsetHeaderValue {
    charset: CharsetName,
    parameters: Parameters<CharsetParameters>,
    text: Option<String>,
}

impl CharsetHeaderValue {
    /// 新しい要素を作成
    pub fn new(charset: CharsetName) -> Self {
        CharsetHeaderValue {
            charset,
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
        grammar::parse_one::<CharsetGrammar>(input, limits)
    }

    /// カンマ区切りのリストをパース (q 値の降順)
    pub fn parse_list(input: &str) -> Result<Vec<Self>, ParseError> {
        Self::parse_list_with_limits(input, &HeaderValueLimits::default())
    }

    /// 制限付きでリストをパース
    pub fn parse_list_with_limits(
        input: &str,
        limits: &HeaderValueLimits,
    ) -> Result<Vec<Self>, ParseError> {
        grammar::parse_list::<CharsetGrammar>(input, limits)
    }

    /// 文字セット名
    pub fn charset(&self) -> &CharsetName {
        &self.charset
    }

    /// パラメータ
    pub fn parameters(&self) -> &Parameters<CharsetParameters> {
        &self.parameters
    }

    /// q 値
    pub fn q_factor(&self) -> Option<QFactor> {
        self.parameters.q_factor()
    }

    /// 文字セット名を置き換え
    pub fn with_charset(self, charset: CharsetName) -> Self {
        CharsetHeaderValue {
            charset,
            text: None,
            ..self
        }
    }

    /// パラメータをまとめて置き換え
    pub fn with_parameters(self, parameters: Parameters<CharsetParameters>) -> Self {
        CharsetHeaderValue {
            parameters,
            text: None,
            ..self
        }
    }

    /// パラメータを追加
    pub fn with_parameter(
        mut self,
        name: CharsetParameterName,
        value: ParameterValue,
    ) -> Result<Self, ParseError> {
        self.parameters.insert(name, value)?;
        self.text = None;
        Ok(self)
    }

    /// q 値を設定
    pub fn with_q_factor(self, q: f32) -> Result<Self, ParseError> {
        let q = QFactor::new(q)?;
        self.with_parameter(CharsetParameterName::Q_FACTOR, q.into())
    }
}

impl PartialEq for CharsetHeaderValue {
    fn eq(&self, other: &Self) -> bool {
        self.charset == other.charset && self.parameters == other.parameters
    }
}

impl fmt::Display for CharsetHeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => f.write_str(text),
            None => write!(f, "{}{}", self.charset, self.parameters),
        }
    }
}

struct CharsetGrammar;

impl Grammar for CharsetGrammar {
    type Primary = CharsetName;
    type Parameters = CharsetParameters;
    type Output = CharsetHeaderValue;

    const LABEL: &'static str = "charset";

    fn primary(cursor: &mut Cursor<'_>) -> Result<CharsetName, ParseError> {
        if cursor.eat('*') {
            return Ok(CharsetName::WILDCARD);
        }
        let name = cursor.take_while(CHARSET);
        if name.is_empty() {
            return Err(cursor.unexpected("charset"));
        }
        CharsetName::new(name)
    }

    fn build(
        charset: CharsetName,
        parameters: Parameters<CharsetParameters>,
        text: &str,
    ) -> Result<CharsetHeaderValue, ParseError> {
        Ok(CharsetHeaderValue {
            charset,
            parameters,
            text: Some(text.to_string()),
        })
    }

    fn finish(items: &mut [CharsetHeaderValue]) {
        sort_by_q_factor(items, CharsetHeaderValue::q_factor);
    }
}
