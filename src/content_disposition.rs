//! Content-Disposition ヘッダーパース (RFC 6266 / RFC 2183)
//!
//! ## 概要
//!
//! ```text
//! content-disposition = disposition-type *( OWS ";" OWS disposition-parm )
//! disposition-type    = "inline" / "attachment" / disp-ext-type
//! ```
//!
//! `filename*` (RFC 5987) は `filename` より優先される。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_header_value::content_disposition::{ContentDisposition, ContentDispositionType};
//!
//! // attachment with filename
//! let cd = ContentDisposition::parse("attachment; filename=\"example.txt\"").unwrap();
//! assert_eq!(cd.disposition_type(), &ContentDispositionType::ATTACHMENT);
//! assert_eq!(cd.filename(), Some("example.txt"));
//!
//! // inline
//! let cd = ContentDisposition::parse("inline").unwrap();
//! assert!(cd.is_inline());
//! ```

use core::fmt;
use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use crate::cursor::Cursor;
use crate::encoded_text::EncodedText;
use crate::error::ParseError;
use crate::grammar::{self, Grammar, is_quotable, write_quoted};
use crate::limits::HeaderValueLimits;
use crate::parameter::{ParameterKind, ParameterName, ParameterSet, ParameterValue, Parameters};
use crate::predicate::RFC2045_TOKEN;

/// Disposition タイプ
///
/// 大文字小文字を区別しない。拡張タイプも受け付ける。
#[derive(Debug, Clone)]
pub struct ContentDispositionType(Cow<'static, str>);

impl ContentDispositionType {
    /// inline: コンテンツをインラインで表示
    pub const INLINE: ContentDispositionType = ContentDispositionType(Cow::Borrowed("inline"));
    /// attachment: コンテンツをダウンロードとして扱う
    pub const ATTACHMENT: ContentDispositionType =
        ContentDispositionType(Cow::Borrowed("attachment"));
    /// form-data: multipart/form-data のパート用
    pub const FORM_DATA: ContentDispositionType =
        ContentDispositionType(Cow::Borrowed("form-data"));

    const CONSTANTS: &'static [ContentDispositionType] = &[
        ContentDispositionType::INLINE,
        ContentDispositionType::ATTACHMENT,
        ContentDispositionType::FORM_DATA,
    ];

    /// Disposition タイプを作成
    ///
    /// ```rust
    /// use shiguredo_header_value::content_disposition::ContentDispositionType;
    ///
    /// let t = ContentDispositionType::new("INLINE").unwrap();
    /// assert_eq!(t, ContentDispositionType::INLINE);
    /// assert_eq!(t.value(), "inline");
    /// ```
    pub fn new(name: &str) -> Result<Self, ParseError> {
        if let Some(constant) = Self::CONSTANTS
            .iter()
            .find(|constant| constant.0.eq_ignore_ascii_case(name))
        {
            return Ok(constant.clone());
        }
        if !RFC2045_TOKEN.matches(name) {
            return Err(ParseError::invalid_argument(format!(
                "Invalid disposition type {:?}",
                name
            )));
        }
        Ok(ContentDispositionType(Cow::Owned(name.to_string())))
    }

    /// 名前
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl PartialEq for ContentDispositionType {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for ContentDispositionType {}

impl Hash for ContentDispositionType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for ContentDispositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ファイル名
///
/// `filename` の値はそのまま、`filename*` の値は [`EncodedText`] として保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDispositionFilename(Filename);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Filename {
    Plain(String),
    Encoded(EncodedText),
}

impl ContentDispositionFilename {
    /// `filename` の値を作成
    pub fn new(value: &str) -> Result<Self, ParseError> {
        if value.is_empty() || !is_quotable(value) {
            return Err(ParseError::invalid_argument(format!(
                "Invalid filename {:?}",
                value
            )));
        }
        Ok(ContentDispositionFilename(Filename::Plain(value.to_string())))
    }

    /// `filename*` の値を作成
    pub fn encoded(text: EncodedText) -> Self {
        ContentDispositionFilename(Filename::Encoded(text))
    }

    /// 復号済みのファイル名
    pub fn value(&self) -> &str {
        match &self.0 {
            Filename::Plain(value) => value,
            Filename::Encoded(text) => text.value(),
        }
    }

    /// `filename*` 形式かどうか
    pub fn is_encoded(&self) -> bool {
        matches!(self.0, Filename::Encoded(_))
    }

    /// `filename*` の値
    pub fn encoded_text(&self) -> Option<&EncodedText> {
        match &self.0 {
            Filename::Encoded(text) => Some(text),
            Filename::Plain(_) => None,
        }
    }
}

/// `filename` は常に引用符付きで出力する
impl fmt::Display for ContentDispositionFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Filename::Plain(value) => write_quoted(f, value),
            Filename::Encoded(text) => write!(f, "{}", text),
        }
    }
}

/// Content-Disposition のパラメータ表
#[derive(Debug)]
pub struct ContentDispositionParameters;

impl ParameterSet for ContentDispositionParameters {
    const CONSTANTS: &'static [&'static str] = &[
        "filename",
        "filename*",
        "name",
        "creation-date",
        "modification-date",
        "read-date",
        "size",
    ];

    fn kind(name: &str) -> ParameterKind {
        match name.to_ascii_lowercase().as_str() {
            "filename" => ParameterKind::Filename,
            "filename*" => ParameterKind::EncodedFilename,
            "size" => ParameterKind::Number,
            _ => ParameterKind::Text,
        }
    }
}

/// Content-Disposition のパラメータ名
pub type ContentDispositionParameterName = ParameterName<ContentDispositionParameters>;

impl ParameterName<ContentDispositionParameters> {
    /// filename
    pub const FILENAME: Self = Self::constant("filename");
    /// filename*
    pub const FILENAME_EXT: Self = Self::constant("filename*");
    /// name
    pub const NAME: Self = Self::constant("name");
    /// creation-date
    pub const CREATION_DATE: Self = Self::constant("creation-date");
    /// modification-date
    pub const MODIFICATION_DATE: Self = Self::constant("modification-date");
    /// read-date
    pub const READ_DATE: Self = Self::constant("read-date");
    /// size
    pub const SIZE: Self = Self::constant("size");
}

/// Content-Disposition ヘッダー
#[derive(Debug, Clone)]
pub struct ContentDisposition {
    disposition_type: ContentDispositionType,
    parameters: Parameters<ContentDispositionParameters>,
    text: Option<String>,
}

impl ContentDisposition {
    /// 新しい Content-Disposition を作成
    pub fn new(disposition_type: ContentDispositionType) -> Self {
        ContentDisposition {
            disposition_type,
            parameters: Parameters::new(),
            text: None,
        }
    }

    /// Content-Disposition ヘッダー文字列をパース
    ///
    /// # 例
    ///
    /// ```rust
    /// use shiguredo_header_value::content_disposition::ContentDisposition;
    ///
    /// let cd = ContentDisposition::parse("attachment; filename=\"report.pdf\"").unwrap();
    /// assert!(cd.is_attachment());
    /// assert_eq!(cd.filename(), Some("report.pdf"));
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with_limits(input, &HeaderValueLimits::default())
    }

    /// 制限付きでパース
    pub fn parse_with_limits(input: &str, limits: &HeaderValueLimits) -> Result<Self, ParseError> {
        grammar::parse_one::<ContentDispositionGrammar>(input, limits)
    }

    /// Disposition タイプを取得
    pub fn disposition_type(&self) -> &ContentDispositionType {
        &self.disposition_type
    }

    /// すべてのパラメータ
    pub fn parameters(&self) -> &Parameters<ContentDispositionParameters> {
        &self.parameters
    }

    /// ファイル名を取得 (filename* を優先)
    pub fn filename(&self) -> Option<&str> {
        self.filename_ext().or_else(|| self.filename_plain())
    }

    /// filename パラメータを取得
    pub fn filename_plain(&self) -> Option<&str> {
        self.filename_parameter("filename")
    }

    /// filename* パラメータを取得 (デコード済み)
    pub fn filename_ext(&self) -> Option<&str> {
        self.filename_parameter("filename*")
    }

    fn filename_parameter(&self, name: &str) -> Option<&str> {
        match self.parameters.get(name) {
            Some(ParameterValue::Filename(filename)) => Some(filename.value()),
            _ => None,
        }
    }

    /// name パラメータを取得 (form-data 用)
    pub fn name(&self) -> Option<&str> {
        self.parameters.text("name")
    }

    /// size パラメータを取得
    pub fn size(&self) -> Option<u64> {
        match self.parameters.get("size") {
            Some(ParameterValue::Number(size)) => Some(*size),
            _ => None,
        }
    }

    /// 任意のテキストパラメータを取得
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.text(name)
    }

    /// inline かどうか
    pub fn is_inline(&self) -> bool {
        self.disposition_type == ContentDispositionType::INLINE
    }

    /// attachment かどうか
    pub fn is_attachment(&self) -> bool {
        self.disposition_type == ContentDispositionType::ATTACHMENT
    }

    /// form-data かどうか
    pub fn is_form_data(&self) -> bool {
        self.disposition_type == ContentDispositionType::FORM_DATA
    }

    /// Disposition タイプを置き換え
    pub fn with_type(self, disposition_type: ContentDispositionType) -> Self {
        ContentDisposition {
            disposition_type,
            text: None,
            ..self
        }
    }

    /// パラメータをまとめて置き換え
    pub fn with_parameters(self, parameters: Parameters<ContentDispositionParameters>) -> Self {
        ContentDisposition {
            parameters,
            text: None,
            ..self
        }
    }

    /// パラメータを追加
    pub fn with_parameter(
        mut self,
        name: ContentDispositionParameterName,
        value: ParameterValue,
    ) -> Result<Self, ParseError> {
        self.parameters.insert(name, value)?;
        self.text = None;
        Ok(self)
    }

    /// filename を設定
    pub fn with_filename(self, filename: &str) -> Result<Self, ParseError> {
        let filename = ContentDispositionFilename::new(filename)?;
        self.with_parameter(
            ContentDispositionParameterName::FILENAME,
            ParameterValue::Filename(filename),
        )
    }

    /// filename* を UTF-8 で設定
    pub fn with_filename_ext(self, filename: &str) -> Result<Self, ParseError> {
        let filename = ContentDispositionFilename::encoded(EncodedText::utf8(filename));
        self.with_parameter(
            ContentDispositionParameterName::FILENAME_EXT,
            ParameterValue::Filename(filename),
        )
    }

    /// name を設定
    pub fn with_name(self, name: &str) -> Result<Self, ParseError> {
        self.with_parameter(ContentDispositionParameterName::NAME, name.into())
    }
}

impl PartialEq for ContentDisposition {
    fn eq(&self, other: &Self) -> bool {
        self.disposition_type == other.disposition_type && self.parameters == other.parameters
    }
}

impl fmt::Display for ContentDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => f.write_str(text),
            None => write!(f, "{}{}", self.disposition_type, self.parameters),
        }
    }
}

struct ContentDispositionGrammar;

impl Grammar for ContentDispositionGrammar {
    type Primary = ContentDispositionType;
    type Parameters = ContentDispositionParameters;
    type Output = ContentDisposition;

    const LABEL: &'static str = "disposition type";

    fn primary(cursor: &mut Cursor<'_>) -> Result<ContentDispositionType, ParseError> {
        let name = cursor.take_while(RFC2045_TOKEN);
        if name.is_empty() {
            return Err(cursor.unexpected("disposition type"));
        }
        ContentDispositionType::new(name)
    }

    fn build(
        disposition_type: ContentDispositionType,
        parameters: Parameters<ContentDispositionParameters>,
        text: &str,
    ) -> Result<ContentDisposition, ParseError> {
        Ok(ContentDisposition {
            disposition_type,
            parameters,
            text: Some(text.to_string()),
        })
    }
}
