//! 型付きヘッダー名
//!
//! ヘッダー名とその値のコンバーターを対応付けた定数。
//! HTTP 層はヘッダー名からこの定数を引き、値のパースと出力を任せる。
//!
//! ```rust
//! use shiguredo_header_value::header;
//!
//! let mt = header::CONTENT_TYPE.parse("application/json").unwrap();
//! assert!(mt.is_json());
//!
//! let langs = header::ACCEPT_LANGUAGE.parse("en;q=0.5, ja").unwrap();
//! assert_eq!(header::ACCEPT_LANGUAGE.to_text(&langs).unwrap(), "ja, en;q=0.5");
//!
//! assert!(header::CONTENT_TYPE.matches("content-type"));
//! ```

use std::any::Any;

use crate::charset::CharsetHeaderValue;
use crate::content_disposition::ContentDisposition;
use crate::converter::{Converter, List, One};
use crate::error::HeaderError;
use crate::etag::ETag;
use crate::language::LanguageTag;
use crate::limits::HeaderValueLimits;
use crate::link::Link;
use crate::media_type::MediaType;
use crate::token::TokenHeaderValue;

/// ヘッダー名と値のコンバーター
#[derive(Debug)]
pub struct HeaderName<C> {
    name: &'static str,
    converter: C,
}

impl<C> HeaderName<C> {
    /// ヘッダー名を作成
    pub const fn new(name: &'static str, converter: C) -> Self {
        HeaderName { name, converter }
    }

    /// ヘッダー名
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 名前が一致するか (大文字小文字を区別しない)
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// コンバーター
    pub fn converter(&self) -> &C {
        &self.converter
    }
}

impl<C: Converter> HeaderName<C> {
    /// 値をパース
    pub fn parse(&self, text: &str) -> Result<C::Value, HeaderError> {
        self.converter.parse(text, self.name)
    }

    /// 制限付きで値をパース
    pub fn parse_with_limits(
        &self,
        text: &str,
        limits: &HeaderValueLimits,
    ) -> Result<C::Value, HeaderError> {
        self.converter.parse_with_limits(text, self.name, limits)
    }

    /// 値の型を検査
    pub fn check(&self, value: &dyn Any) -> Result<C::Value, HeaderError> {
        self.converter.check(value, self.name)
    }

    /// 値をヘッダーテキストにする
    pub fn to_text(&self, value: &C::Value) -> Result<String, HeaderError> {
        self.converter.to_text(value, self.name)
    }
}

/// Content-Type
pub const CONTENT_TYPE: HeaderName<One<MediaType>> = HeaderName::new("Content-Type", One::new());
/// Accept
pub const ACCEPT: HeaderName<List<MediaType>> = HeaderName::new("Accept", List::new());
/// Accept-Charset
pub const ACCEPT_CHARSET: HeaderName<List<CharsetHeaderValue>> =
    HeaderName::new("Accept-Charset", List::new());
/// Accept-Encoding
pub const ACCEPT_ENCODING: HeaderName<List<TokenHeaderValue>> =
    HeaderName::new("Accept-Encoding", List::new());
/// Accept-Language
pub const ACCEPT_LANGUAGE: HeaderName<List<LanguageTag>> =
    HeaderName::new("Accept-Language", List::new());
/// Content-Language
pub const CONTENT_LANGUAGE: HeaderName<List<LanguageTag>> =
    HeaderName::new("Content-Language", List::new());
/// Content-Encoding
pub const CONTENT_ENCODING: HeaderName<List<TokenHeaderValue>> =
    HeaderName::new("Content-Encoding", List::new());
/// Connection
pub const CONNECTION: HeaderName<List<TokenHeaderValue>> =
    HeaderName::new("Connection", List::new());
/// Vary
pub const VARY: HeaderName<List<TokenHeaderValue>> = HeaderName::new("Vary", List::new());
/// ETag
pub const ETAG: HeaderName<One<ETag>> = HeaderName::new("ETag", One::new());
/// If-Match
pub const IF_MATCH: HeaderName<List<ETag>> = HeaderName::new("If-Match", List::new());
/// If-None-Match
pub const IF_NONE_MATCH: HeaderName<List<ETag>> = HeaderName::new("If-None-Match", List::new());
/// Content-Disposition
pub const CONTENT_DISPOSITION: HeaderName<One<ContentDisposition>> =
    HeaderName::new("Content-Disposition", One::new());
/// Link
pub const LINK: HeaderName<List<Link>> = HeaderName::new("Link", List::new());
