//! Link ヘッダー (RFC 8288)
//!
//! ## 概要
//!
//! ```text
//! Link       = #link-value
//! link-value = "<" URI-Reference ">" *( OWS ";" OWS link-param )
//! link-param = token BWS [ "=" BWS ( token / quoted-string ) ]
//! ```
//!
//! `type` はメディアタイプ、`hreflang` は言語タグ、`title*` は RFC 5987 の値として扱う。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_header_value::link::Link;
//!
//! let links = Link::parse_list(
//!     "<https://example.com/?page=2>; rel=\"next\", <https://example.com/?page=5>; rel=last",
//! )
//! .unwrap();
//! assert_eq!(links.len(), 2);
//! assert_eq!(links[0].uri(), "https://example.com/?page=2");
//! assert_eq!(links[1].relations(), ["last"]);
//! ```

use core::fmt;

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::grammar::{self, Grammar};
use crate::language::LanguageTagName;
use crate::limits::HeaderValueLimits;
use crate::media_type::MediaType;
use crate::parameter::{ParameterKind, ParameterName, ParameterSet, ParameterValue, Parameters};
use crate::predicate::URI_REFERENCE;

/// Link のパラメータ表
#[derive(Debug)]
pub struct LinkParameters;

impl ParameterSet for LinkParameters {
    const CONSTANTS: &'static [&'static str] = &[
        "rel", "rev", "anchor", "type", "hreflang", "title", "title*", "media",
    ];

    fn kind(name: &str) -> ParameterKind {
        match name.to_ascii_lowercase().as_str() {
            "type" => ParameterKind::MediaType,
            "hreflang" => ParameterKind::Language,
            "title*" => ParameterKind::EncodedText,
            _ => ParameterKind::Text,
        }
    }
}

/// Link のパラメータ名
pub type LinkParameterName = ParameterName<LinkParameters>;

impl ParameterName<LinkParameters> {
    /// rel
    pub const REL: Self = Self::constant("rel");
    /// rev
    pub const REV: Self = Self::constant("rev");
    /// anchor
    pub const ANCHOR: Self = Self::constant("anchor");
    /// type
    pub const TYPE: Self = Self::constant("type");
    /// hreflang
    pub const HREFLANG: Self = Self::constant("hreflang");
    /// title
    pub const TITLE: Self = Self::constant("title");
    /// title*
    pub const TITLE_EXT: Self = Self::constant("title*");
    /// media
    pub const MEDIA: Self = Self::constant("media");
}

/// Link ヘッダーの要素
#[derive(Debug, Clone)]
pub struct Link {
    uri: String,
    parameters: Parameters<LinkParameters>,
    text: Option<String>,
}

impl Link {
    /// 新しい Link を作成
    pub fn new(uri: &str) -> Result<Self, ParseError> {
        Ok(Link {
            uri: check_uri(uri)?.to_string(),
            parameters: Parameters::new(),
            text: None,
        })
    }

    /// 単一の要素をパース
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with_limits(input, &HeaderValueLimits::default())
    }

    /// 制限付きでパース
    pub fn parse_with_limits(input: &str, limits: &HeaderValueLimits) -> Result<Self, ParseError> {
        grammar::parse_one::<LinkGrammar>(input, limits)
    }

    /// カンマ区切りのリストをパース
    ///
    /// 順序は入力のまま。
    pub fn parse_list(input: &str) -> Result<Vec<Self>, ParseError> {
        Self::parse_list_with_limits(input, &HeaderValueLimits::default())
    }

    /// 制限付きでリストをパース
    pub fn parse_list_with_limits(
        input: &str,
        limits: &HeaderValueLimits,
    ) -> Result<Vec<Self>, ParseError> {
        grammar::parse_list::<LinkGrammar>(input, limits)
    }

    /// リンク先
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// パラメータ
    pub fn parameters(&self) -> &Parameters<LinkParameters> {
        &self.parameters
    }

    /// rel を空白で分割した関係の一覧
    pub fn relations(&self) -> Vec<&str> {
        self.parameters
            .text("rel")
            .map(|rel| rel.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    /// 関係を持つか (大文字小文字を区別しない)
    pub fn has_relation(&self, relation: &str) -> bool {
        self.relations()
            .iter()
            .any(|r| r.eq_ignore_ascii_case(relation))
    }

    /// type パラメータ
    pub fn media_type(&self) -> Option<&MediaType> {
        match self.parameters.get("type") {
            Some(ParameterValue::MediaType(media_type)) => Some(media_type),
            _ => None,
        }
    }

    /// hreflang パラメータ
    pub fn hreflang(&self) -> Option<&LanguageTagName> {
        match self.parameters.get("hreflang") {
            Some(ParameterValue::Language(language)) => Some(language),
            _ => None,
        }
    }

    /// タイトル (title* を優先)
    pub fn title(&self) -> Option<&str> {
        match self.parameters.get("title*") {
            Some(ParameterValue::EncodedText(text)) => Some(text.value()),
            _ => self.parameters.text("title"),
        }
    }

    /// リンク先を置き換え
    pub fn with_uri(self, uri: &str) -> Result<Self, ParseError> {
        let uri = check_uri(uri)?.to_string();
        Ok(Link {
            uri,
            text: None,
            ..self
        })
    }

    /// パラメータをまとめて置き換え
    pub fn with_parameters(self, parameters: Parameters<LinkParameters>) -> Self {
        Link {
            parameters,
            text: None,
            ..self
        }
    }

    /// パラメータを追加
    pub fn with_parameter(
        mut self,
        name: LinkParameterName,
        value: ParameterValue,
    ) -> Result<Self, ParseError> {
        self.parameters.insert(name, value)?;
        self.text = None;
        Ok(self)
    }

    /// rel を設定
    pub fn with_rel(self, rel: &str) -> Result<Self, ParseError> {
        self.with_parameter(LinkParameterName::REL, rel.into())
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri && self.parameters == other.parameters
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => f.write_str(text),
            None => write!(f, "<{}>{}", self.uri, self.parameters),
        }
    }
}

fn check_uri(uri: &str) -> Result<&str, ParseError> {
    if !URI_REFERENCE.matches(uri) {
        return Err(ParseError::invalid_argument(format!(
            "Invalid link target {:?}",
            uri
        )));
    }
    Ok(uri)
}

struct LinkGrammar;

impl Grammar for LinkGrammar {
    type Primary = String;
    type Parameters = LinkParameters;
    type Output = Link;

    const LABEL: &'static str = "link";

    fn primary(cursor: &mut Cursor<'_>) -> Result<String, ParseError> {
        if !cursor.eat('<') {
            return Err(cursor.unexpected("'<'"));
        }
        let uri = cursor.take_while(URI_REFERENCE);
        if uri.is_empty() {
            return Err(cursor.unexpected("uri"));
        }
        if !cursor.eat('>') {
            return Err(cursor.unexpected("'>'"));
        }
        Ok(uri.to_string())
    }

    fn build(
        uri: String,
        parameters: Parameters<LinkParameters>,
        text: &str,
    ) -> Result<Link, ParseError> {
        Ok(Link {
            uri,
            parameters,
            text: Some(text.to_string()),
        })
    }
}
