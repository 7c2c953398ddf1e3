//! メディアタイプ (RFC 9110 Section 8.3.1 / 12.5.1)
//!
//! ## 概要
//!
//! Content-Type の単一値と Accept のリストを扱う。
//! パースした値は元のテキストを保持し、そのまま出力する。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_header_value::media_type::MediaType;
//!
//! // 基本的な Content-Type
//! let mt = MediaType::parse("text/html").unwrap();
//! assert_eq!(mt.media_type(), "text");
//! assert_eq!(mt.subtype(), "html");
//!
//! // パラメータ付き
//! let mt = MediaType::parse("text/html; charset=utf-8").unwrap();
//! assert_eq!(mt.charset().map(|c| c.value()), Some("UTF-8"));
//! assert_eq!(mt.to_string(), "text/html; charset=utf-8");
//!
//! // Accept は q 値の降順に並ぶ
//! let accept = MediaType::parse_list("text/plain;q=0.5, application/json").unwrap();
//! assert_eq!(accept[0], MediaType::APPLICATION_JSON);
//! ```

use core::fmt;
use std::borrow::Cow;

use crate::boundary::MediaTypeBoundary;
use crate::charset::CharsetName;
use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::grammar::{self, Grammar};
use crate::limits::HeaderValueLimits;
use crate::parameter::{
    ParameterKind, ParameterName, ParameterSet, ParameterValue, Parameters, QFactor,
    sort_by_q_factor,
};
use crate::predicate::RFC2045_TOKEN;

/// メディアタイプのパラメータ表
#[derive(Debug)]
pub struct MediaTypeParameters;

impl ParameterSet for MediaTypeParameters {
    const CONSTANTS: &'static [&'static str] = &["q", "charset", "boundary"];

    fn kind(name: &str) -> ParameterKind {
        match name.to_ascii_lowercase().as_str() {
            "q" => ParameterKind::QFactor,
            "charset" => ParameterKind::Charset,
            "boundary" => ParameterKind::Boundary,
            _ => ParameterKind::Text,
        }
    }
}

/// メディアタイプのパラメータ名
pub type MediaTypeParameterName = ParameterName<MediaTypeParameters>;

impl ParameterName<MediaTypeParameters> {
    /// q
    pub const Q_FACTOR: Self = Self::constant("q");
    /// charset
    pub const CHARSET: Self = Self::constant("charset");
    /// boundary
    pub const BOUNDARY: Self = Self::constant("boundary");
}

const WILDCARD: &str = "*";

/// メディアタイプ
///
/// ```text
/// media-type = type "/" subtype parameters
/// parameters = *( OWS ";" OWS [ parameter ] )
/// ```
///
/// type / subtype は大文字小文字を保持するが、比較では区別しない。
#[derive(Debug, Clone)]
pub struct MediaType {
    media_type: Cow<'static, str>,
    subtype: Cow<'static, str>,
    parameters: Parameters<MediaTypeParameters>,
    /// パース元のテキスト
    text: Option<String>,
}

impl MediaType {
    /// */*
    pub const WILDCARD_WILDCARD: MediaType = MediaType::constant(WILDCARD, WILDCARD);
    /// text/*
    pub const TEXT_WILDCARD: MediaType = MediaType::constant("text", WILDCARD);
    /// text/plain
    pub const TEXT_PLAIN: MediaType = MediaType::constant("text", "plain");
    /// text/html
    pub const TEXT_HTML: MediaType = MediaType::constant("text", "html");
    /// text/css
    pub const TEXT_CSS: MediaType = MediaType::constant("text", "css");
    /// application/json
    pub const APPLICATION_JSON: MediaType = MediaType::constant("application", "json");
    /// application/xml
    pub const APPLICATION_XML: MediaType = MediaType::constant("application", "xml");
    /// application/octet-stream
    pub const APPLICATION_OCTET_STREAM: MediaType =
        MediaType::constant("application", "octet-stream");
    /// application/x-www-form-urlencoded
    pub const APPLICATION_FORM_URLENCODED: MediaType =
        MediaType::constant("application", "x-www-form-urlencoded");
    /// multipart/form-data
    pub const MULTIPART_FORM_DATA: MediaType = MediaType::constant("multipart", "form-data");
    /// multipart/mixed
    pub const MULTIPART_MIXED: MediaType = MediaType::constant("multipart", "mixed");
    /// image/png
    pub const IMAGE_PNG: MediaType = MediaType::constant("image", "png");

    const fn constant(media_type: &'static str, subtype: &'static str) -> Self {
        MediaType {
            media_type: Cow::Borrowed(media_type),
            subtype: Cow::Borrowed(subtype),
            parameters: Parameters::new(),
            text: None,
        }
    }

    /// 新しい MediaType を作成
    pub fn new(media_type: &str, subtype: &str) -> Result<Self, ParseError> {
        Ok(MediaType {
            media_type: Cow::Owned(check_part("type", media_type)?.to_string()),
            subtype: Cow::Owned(check_part("sub type", subtype)?.to_string()),
            parameters: Parameters::new(),
            text: None,
        })
    }

    /// メディアタイプ文字列をパース
    ///
    /// # 例
    ///
    /// ```rust
    /// use shiguredo_header_value::media_type::MediaType;
    ///
    /// let mt = MediaType::parse("multipart/form-data; boundary=----WebKitFormBoundary").unwrap();
    /// assert!(mt.is_form_data());
    /// assert_eq!(mt.boundary().map(|b| b.value()), Some("----WebKitFormBoundary"));
    ///
    /// let e = MediaType::parse("type/;").unwrap_err();
    /// assert_eq!(e.offset(), Some(5));
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with_limits(input, &HeaderValueLimits::default())
    }

    /// 制限付きでパース
    pub fn parse_with_limits(input: &str, limits: &HeaderValueLimits) -> Result<Self, ParseError> {
        grammar::parse_one::<MediaTypeGrammar>(input, limits)
    }

    /// カンマ区切りのメディアタイプ一覧 (Accept) をパース
    ///
    /// 結果は q 値の降順に並び、同じ q 値なら元の順序を保つ。
    pub fn parse_list(input: &str) -> Result<Vec<Self>, ParseError> {
        Self::parse_list_with_limits(input, &HeaderValueLimits::default())
    }

    /// 制限付きでリストをパース
    pub fn parse_list_with_limits(
        input: &str,
        limits: &HeaderValueLimits,
    ) -> Result<Vec<Self>, ParseError> {
        grammar::parse_list::<MediaTypeGrammar>(input, limits)
    }

    /// type を取得 (例: "text")
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// subtype を取得 (例: "html")
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// "type/subtype" を取得
    pub fn value(&self) -> String {
        format!("{}/{}", self.media_type, self.subtype)
    }

    /// すべてのパラメータ
    pub fn parameters(&self) -> &Parameters<MediaTypeParameters> {
        &self.parameters
    }

    /// パラメータを取得
    pub fn parameter(&self, name: &str) -> Option<&ParameterValue> {
        self.parameters.get(name)
    }

    /// charset パラメータ
    pub fn charset(&self) -> Option<&CharsetName> {
        match self.parameters.get("charset") {
            Some(ParameterValue::Charset(charset)) => Some(charset),
            _ => None,
        }
    }

    /// boundary パラメータ
    pub fn boundary(&self) -> Option<&MediaTypeBoundary> {
        match self.parameters.get("boundary") {
            Some(ParameterValue::Boundary(boundary)) => Some(boundary),
            _ => None,
        }
    }

    /// q パラメータ
    pub fn q_factor(&self) -> Option<QFactor> {
        self.parameters.q_factor()
    }

    /// q パラメータ (なければ 1.0)
    pub fn q_factor_or_default(&self) -> f32 {
        self.q_factor().unwrap_or_default().value()
    }

    /// type を置き換え
    pub fn with_type(self, media_type: &str) -> Result<Self, ParseError> {
        let media_type = check_part("type", media_type)?;
        Ok(MediaType {
            media_type: Cow::Owned(media_type.to_string()),
            text: None,
            ..self
        })
    }

    /// subtype を置き換え
    pub fn with_subtype(self, subtype: &str) -> Result<Self, ParseError> {
        let subtype = check_part("sub type", subtype)?;
        Ok(MediaType {
            subtype: Cow::Owned(subtype.to_string()),
            text: None,
            ..self
        })
    }

    /// パラメータをまとめて置き換え
    pub fn with_parameters(self, parameters: Parameters<MediaTypeParameters>) -> Self {
        MediaType {
            parameters,
            text: None,
            ..self
        }
    }

    /// パラメータを追加 (同名があれば置き換え)
    pub fn with_parameter(
        mut self,
        name: MediaTypeParameterName,
        value: ParameterValue,
    ) -> Result<Self, ParseError> {
        self.parameters.insert(name, value)?;
        self.text = None;
        Ok(self)
    }

    /// q パラメータを設定
    pub fn with_q_factor(self, q: f32) -> Result<Self, ParseError> {
        let q = QFactor::new(q)?;
        self.with_parameter(MediaTypeParameterName::Q_FACTOR, q.into())
    }

    /// パラメータを削除
    pub fn without_parameter(mut self, name: &str) -> Self {
        if self.parameters.remove(name).is_some() {
            self.text = None;
        }
        self
    }

    /// ワイルドカードを考慮した互換性判定
    ///
    /// */* は何とでも互換。type が異なれば (どちらかがワイルドカードでない限り) 非互換。
    /// subtype は type が一致したときだけ比較する。パラメータは見ない。
    ///
    /// ```rust
    /// use shiguredo_header_value::media_type::MediaType;
    ///
    /// let json = MediaType::new("application", "json").unwrap();
    /// assert!(MediaType::WILDCARD_WILDCARD.is_compatible(&json));
    /// assert!(MediaType::new("application", "*").unwrap().is_compatible(&json));
    /// assert!(!MediaType::TEXT_WILDCARD.is_compatible(&json));
    /// ```
    pub fn is_compatible(&self, other: &MediaType) -> bool {
        if self.is_wildcard() {
            return true;
        }
        let type_matches = self.media_type == WILDCARD
            || other.media_type == WILDCARD
            || self.media_type.eq_ignore_ascii_case(&other.media_type);
        if !type_matches {
            return false;
        }
        self.subtype == WILDCARD
            || other.subtype == WILDCARD
            || self.subtype.eq_ignore_ascii_case(&other.subtype)
    }

    /// */* かどうか
    pub fn is_wildcard(&self) -> bool {
        self.media_type == WILDCARD && self.subtype == WILDCARD
    }

    /// text/* かどうか
    pub fn is_text(&self) -> bool {
        self.media_type.eq_ignore_ascii_case("text")
    }

    /// application/json かどうか
    pub fn is_json(&self) -> bool {
        self.same_type(&MediaType::APPLICATION_JSON)
    }

    /// multipart/* かどうか
    pub fn is_multipart(&self) -> bool {
        self.media_type.eq_ignore_ascii_case("multipart")
    }

    /// multipart/form-data かどうか
    pub fn is_form_data(&self) -> bool {
        self.same_type(&MediaType::MULTIPART_FORM_DATA)
    }

    /// application/x-www-form-urlencoded かどうか
    pub fn is_form_urlencoded(&self) -> bool {
        self.same_type(&MediaType::APPLICATION_FORM_URLENCODED)
    }

    /// パラメータを除いて同じ type/subtype か
    pub fn same_type(&self, other: &MediaType) -> bool {
        self.media_type.eq_ignore_ascii_case(&other.media_type)
            && self.subtype.eq_ignore_ascii_case(&other.subtype)
    }
}

impl PartialEq for MediaType {
    fn eq(&self, other: &Self) -> bool {
        self.same_type(other) && self.parameters == other.parameters
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = &self.text {
            return f.write_str(text);
        }
        write!(f, "{}/{}{}", self.media_type, self.subtype, self.parameters)
    }
}

fn check_part<'a>(what: &str, value: &'a str) -> Result<&'a str, ParseError> {
    if !RFC2045_TOKEN.matches(value) {
        return Err(ParseError::invalid_argument(format!(
            "Invalid media {} {:?}",
            what, value
        )));
    }
    Ok(value)
}

struct MediaTypeGrammar;

impl Grammar for MediaTypeGrammar {
    type Primary = (String, String);
    type Parameters = MediaTypeParameters;
    type Output = MediaType;

    const LABEL: &'static str = "media type";
    const COMMENTS: bool = true;

    fn primary(cursor: &mut Cursor<'_>) -> Result<Self::Primary, ParseError> {
        let media_type = cursor.take_while(RFC2045_TOKEN);
        if media_type.is_empty() {
            return Err(match cursor.current() {
                Some('/') => cursor.missing("type"),
                _ => cursor.unexpected("type"),
            });
        }
        if !cursor.eat('/') {
            return Err(cursor.unexpected("'/'"));
        }
        let subtype = cursor.take_while(RFC2045_TOKEN);
        if subtype.is_empty() {
            return Err(match cursor.current() {
                None | Some(';' | ',' | ' ' | '\t' | '(') => cursor.missing("sub type"),
                Some(_) => cursor.invalid_character(),
            });
        }
        Ok((media_type.to_string(), subtype.to_string()))
    }

    fn build(
        (media_type, subtype): Self::Primary,
        parameters: Parameters<MediaTypeParameters>,
        text: &str,
    ) -> Result<MediaType, ParseError> {
        Ok(MediaType {
            media_type: Cow::Owned(media_type),
            subtype: Cow::Owned(subtype),
            parameters,
            text: Some(text.to_string()),
        })
    }

    fn finish(items: &mut [MediaType]) {
        sort_by_q_factor(items, MediaType::q_factor);
    }
}
