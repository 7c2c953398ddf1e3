//! トークン値 (RFC 9110 Section 5.6.2)
//!
//! ## 概要
//!
//! Accept-Encoding / Content-Encoding / Connection / Vary のように
//! トークン (とパラメータ) を並べるヘッダー値を扱う。
//!
//! ```text
//! token-value = token *( OWS ";" OWS parameter )
//! ```
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_header_value::token::TokenHeaderValue;
//!
//! let list = TokenHeaderValue::parse_list("deflate;q=0.5, gzip").unwrap();
//! assert_eq!(list[0].value(), "gzip");
//! assert_eq!(list[1].value(), "deflate");
//! ```

use core::fmt;

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::grammar::{self, Grammar};
use crate::limits::HeaderValueLimits;
use crate::parameter::{
    ParameterKind, ParameterName, ParameterSet, ParameterValue, Parameters, QFactor,
    sort_by_q_factor,
};
use crate::predicate::TOKEN;

/// トークン値のパラメータ表
#[derive(Debug)]
pub struct TokenParameters;

impl ParameterSet for TokenParameters {
    const CONSTANTS: &'static [&'static str] = &["q"];

    fn kind(name: &str) -> ParameterKind {
        if name.eq_ignore_ascii_case("q") {
            ParameterKind::QFactor
        } else {
            ParameterKind::Text
        }
    }
}

/// トークン値のパラメータ名
pub type TokenParameterName = ParameterName<TokenParameters>;

impl ParameterName<TokenParameters> {
    /// q
    pub const Q_FACTOR: Self = Self::constant("q");
}

/// トークン値
///
/// トークンの比較は大文字小文字を区別しない。
#[derive(Debug, Clone)]
pub struct TokenHeaderValue {
    value: String,
    parameters: Parameters<TokenParameters>,
    text: Option<String>,
}

impl TokenHeaderValue {
    /// トークン値を作成
    pub fn new(value: &str) -> Result<Self, ParseError> {
        if !TOKEN.matches(value) {
            return Err(ParseError::invalid_argument(format!(
                "Invalid token {:?}",
                value
            )));
        }
        Ok(TokenHeaderValue {
            value: value.to_string(),
            parameters: Parameters::new(),
            text: None,
        })
    }

    /// 単一のトークン値をパース
    ///
    /// 2 つ目のトークンや末尾の区切りはエラーになる。
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with_limits(input, &HeaderValueLimits::default())
    }

    /// 制限付きでパース
    pub fn parse_with_limits(input: &str, limits: &HeaderValueLimits) -> Result<Self, ParseError> {
        grammar::parse_one::<TokenGrammar>(input, limits)
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
        grammar::parse_list::<TokenGrammar>(input, limits)
    }

    /// トークン
    pub fn value(&self) -> &str {
        &self.value
    }

    /// パラメータ
    pub fn parameters(&self) -> &Parameters<TokenParameters> {
        &self.parameters
    }

    /// q 値
    pub fn q_factor(&self) -> Option<QFactor> {
        self.parameters.q_factor()
    }

    /// * かどうか
    pub fn is_wildcard(&self) -> bool {
        self.value == "*"
    }

    /// トークンが一致するか (大文字小文字を区別しない)
    pub fn is(&self, token: &str) -> bool {
        self.value.eq_ignore_ascii_case(token)
    }

    /// トークンを置き換え
    pub fn with_value(self, value: &str) -> Result<Self, ParseError> {
        let replaced = TokenHeaderValue::new(value)?;
        Ok(TokenHeaderValue {
            value: replaced.value,
            text: None,
            ..self
        })
    }

    /// パラメータをまとめて置き換え
    pub fn with_parameters(self, parameters: Parameters<TokenParameters>) -> Self {
        TokenHeaderValue {
            parameters,
            text: None,
            ..self
        }
    }

    /// パラメータを追加
    pub fn with_parameter(
        mut self,
        name: TokenParameterName,
        value: ParameterValue,
    ) -> Result<Self, ParseError> {
        self.parameters.insert(name, value)?;
        self.text = None;
        Ok(self)
    }

    /// q 値を設定
    pub fn with_q_factor(self, q: f32) -> Result<Self, ParseError> {
        let q = QFactor::new(q)?;
        self.with_parameter(TokenParameterName::Q_FACTOR, q.into())
    }
}

impl PartialEq for TokenHeaderValue {
    fn eq(&self, other: &Self) -> bool {
        self.value.eq_ignore_ascii_case(&other.value) && self.parameters == other.parameters
    }
}

impl fmt::Display for TokenHeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => f.write_str(text),
            None => write!(f, "{}{}", self.value, self.parameters),
        }
    }
}

struct TokenGrammar;

impl Grammar for TokenGrammar {
    type Primary = String;
    type Parameters = TokenParameters;
    type Output = TokenHeaderValue;

    const LABEL: &'static str = "token";

    fn primary(cursor: &mut Cursor<'_>) -> Result<String, ParseError> {
        let token = cursor.take_while(TOKEN);
        if token.is_empty() {
            return Err(cursor.unexpected("token"));
        }
        Ok(token.to_string())
    }

    fn build(
        value: String,
        parameters: Parameters<TokenParameters>,
        text: &str,
    ) -> Result<TokenHeaderValue, ParseError> {
        Ok(TokenHeaderValue {
            value,
            parameters,
            text: Some(text.to_string()),
        })
    }

    fn finish(items: &mut [TokenHeaderValue]) {
        sort_by_q_factor(items, TokenHeaderValue::q_factor);
    }
}
