//! ヘッダー値のパラメータ
//!
//! ## 概要
//!
//! `;name=value` 形式のパラメータを型付きで保持する。
//! どのパラメータ名がどの型の値を取るかは文法ごとの [`ParameterSet`] が決める。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_header_value::media_type::{MediaType, MediaTypeParameterName};
//! use shiguredo_header_value::parameter::ParameterValue;
//!
//! let mt = MediaType::parse("text/html; q=0.5; level=1").unwrap();
//! assert_eq!(mt.q_factor().map(|q| q.value()), Some(0.5));
//! assert_eq!(
//!     mt.parameters().get("LEVEL"),
//!     Some(&ParameterValue::Text("1".to_string()))
//! );
//! assert!(mt.parameters().contains(&MediaTypeParameterName::Q_FACTOR));
//! ```

use core::fmt;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::boundary::MediaTypeBoundary;
use crate::charset::CharsetName;
use crate::content_disposition::ContentDispositionFilename;
use crate::encoded_text::EncodedText;
use crate::error::ParseError;
use crate::grammar::{is_quotable, write_token_or_quoted};
use crate::language::LanguageTagName;
use crate::media_type::MediaType;
use crate::predicate::RFC2045_TOKEN;

/// パラメータ値の型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// 任意のテキスト
    Text,
    /// q 値
    QFactor,
    /// 文字セット名
    Charset,
    /// multipart boundary
    Boundary,
    /// filename
    Filename,
    /// filename* (RFC 5987)
    EncodedFilename,
    /// RFC 5987 ext-value
    EncodedText,
    /// 言語タグ
    Language,
    /// メディアタイプ
    MediaType,
    /// 非負整数
    Number,
}

/// 文法ごとのパラメータ表
pub trait ParameterSet: 'static {
    /// 既知のパラメータ名 (小文字)。`ParameterName::new` はまずここを引く
    const CONSTANTS: &'static [&'static str];

    /// パラメータ名に対応する値の型
    fn kind(name: &str) -> ParameterKind;
}

/// パラメータ名
///
/// 大文字小文字を区別しない。
pub struct ParameterName<P> {
    name: Cow<'static, str>,
    _set: PhantomData<fn() -> P>,
}

impl<P: ParameterSet> ParameterName<P> {
    pub(crate) const fn constant(name: &'static str) -> Self {
        ParameterName {
            name: Cow::Borrowed(name),
            _set: PhantomData,
        }
    }

    /// パラメータ名を作成
    ///
    /// 既知の名前なら定数を返す。
    pub fn new(name: &str) -> Result<Self, ParseError> {
        if let Some(constant) = P::CONSTANTS
            .iter()
            .find(|constant| constant.eq_ignore_ascii_case(name))
        {
            return Ok(Self::constant(constant));
        }
        if !RFC2045_TOKEN.matches(name) {
            return Err(ParseError::invalid_argument(format!(
                "Invalid parameter name {:?}",
                name
            )));
        }
        Ok(ParameterName {
            name: Cow::Owned(name.to_string()),
            _set: PhantomData,
        })
    }

    /// 名前
    pub fn value(&self) -> &str {
        &self.name
    }

    /// 値の型
    pub fn kind(&self) -> ParameterKind {
        P::kind(&self.name)
    }

    /// 生テキストを型付き値に変換
    pub fn convert(&self, raw: &str) -> Result<ParameterValue, ParseError> {
        ParameterValue::convert(self.kind(), &self.name, raw)
    }
}

impl<P> Clone for ParameterName<P> {
    fn clone(&self) -> Self {
        ParameterName {
            name: self.name.clone(),
            _set: PhantomData,
        }
    }
}

impl<P> fmt::Debug for ParameterName<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParameterName").field(&self.name).finish()
    }
}

impl<P> PartialEq for ParameterName<P> {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl<P> Eq for ParameterName<P> {}

impl<P> fmt::Display for ParameterName<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// q 値 (0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct QFactor(f32);

impl QFactor {
    /// 重みなし (1.0)
    pub const ONE: QFactor = QFactor(1.0);

    /// q 値を作成
    pub fn new(value: f32) -> Result<Self, ParseError> {
        if value.is_nan() || !(0.0..=1.0).contains(&value) {
            return Err(ParseError::invalid_argument(format!(
                "q-factor {} out of range 0..=1",
                value
            )));
        }
        Ok(QFactor(value))
    }

    /// q 値をパース
    ///
    /// 数値として読めない場合は数値パースのエラーメッセージをそのまま返す。
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let value = input
            .parse::<f32>()
            .map_err(|e| ParseError::invalid_argument(e.to_string()))?;
        QFactor::new(value)
    }

    /// 値
    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for QFactor {
    fn default() -> Self {
        QFactor::ONE
    }
}

impl fmt::Display for QFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 型付きパラメータ値
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// テキスト
    Text(String),
    /// q 値
    QFactor(QFactor),
    /// 文字セット名
    Charset(CharsetName),
    /// multipart boundary
    Boundary(MediaTypeBoundary),
    /// ファイル名
    Filename(ContentDispositionFilename),
    /// RFC 5987 ext-value
    EncodedText(EncodedText),
    /// 言語タグ
    Language(LanguageTagName),
    /// メディアタイプ
    MediaType(Box<MediaType>),
    /// 非負整数
    Number(u64),
}

impl ParameterValue {
    fn convert(kind: ParameterKind, name: &str, raw: &str) -> Result<Self, ParseError> {
        let converted = match kind {
            ParameterKind::Text => Ok(ParameterValue::Text(raw.to_string())),
            ParameterKind::QFactor => QFactor::parse(raw).map(ParameterValue::QFactor),
            ParameterKind::Charset => CharsetName::new(raw).map(ParameterValue::Charset),
            ParameterKind::Boundary => {
                MediaTypeBoundary::new(raw.trim()).map(ParameterValue::Boundary)
            }
            ParameterKind::Filename => {
                ContentDispositionFilename::new(raw).map(ParameterValue::Filename)
            }
            ParameterKind::EncodedFilename => EncodedText::parse(raw)
                .map(ContentDispositionFilename::encoded)
                .map(ParameterValue::Filename),
            ParameterKind::EncodedText => EncodedText::parse(raw).map(ParameterValue::EncodedText),
            ParameterKind::Language => LanguageTagName::new(raw).map(ParameterValue::Language),
            ParameterKind::MediaType => MediaType::parse(raw)
                .map(Box::new)
                .map(ParameterValue::MediaType),
            ParameterKind::Number => raw
                .parse::<u64>()
                .map(ParameterValue::Number)
                .map_err(|e| ParseError::invalid_argument(e.to_string())),
        };
        converted.map_err(|e| ParseError::conversion(name, raw, e))
    }

    /// 値の型
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Text(_) => ParameterKind::Text,
            ParameterValue::QFactor(_) => ParameterKind::QFactor,
            ParameterValue::Charset(_) => ParameterKind::Charset,
            ParameterValue::Boundary(_) => ParameterKind::Boundary,
            ParameterValue::Filename(filename) if filename.is_encoded() => {
                ParameterKind::EncodedFilename
            }
            ParameterValue::Filename(_) => ParameterKind::Filename,
            ParameterValue::EncodedText(_) => ParameterKind::EncodedText,
            ParameterValue::Language(_) => ParameterKind::Language,
            ParameterValue::MediaType(_) => ParameterKind::MediaType,
            ParameterValue::Number(_) => ParameterKind::Number,
        }
    }

    /// テキスト値なら取得
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParameterValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// ヘッダーテキストとして出力 (必要なら引用符付き)
impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Text(text) => write_token_or_quoted(f, text),
            ParameterValue::QFactor(q) => write!(f, "{}", q),
            ParameterValue::Charset(charset) => write_token_or_quoted(f, charset.value()),
            ParameterValue::Boundary(boundary) => write!(f, "{}", boundary),
            ParameterValue::Filename(filename) => write!(f, "{}", filename),
            ParameterValue::EncodedText(text) => write!(f, "{}", text),
            ParameterValue::Language(language) => write!(f, "{}", language),
            ParameterValue::MediaType(media_type) => {
                write_token_or_quoted(f, &media_type.to_string())
            }
            ParameterValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<QFactor> for ParameterValue {
    fn from(q: QFactor) -> Self {
        ParameterValue::QFactor(q)
    }
}

impl From<&str> for ParameterValue {
    fn from(text: &str) -> Self {
        ParameterValue::Text(text.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(text: String) -> Self {
        ParameterValue::Text(text)
    }
}

/// パラメータ一覧
///
/// 挿入順を保持して出力するが、等価性は順序を無視する。
pub struct Parameters<P> {
    entries: Vec<(ParameterName<P>, ParameterValue)>,
}

impl<P: ParameterSet> Parameters<P> {
    /// 空のパラメータ一覧
    pub const fn new() -> Self {
        Parameters {
            entries: Vec::new(),
        }
    }

    /// パラメータを取得 (名前は大文字小文字を区別しない)
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.entries
            .iter()
            .find(|(n, _)| n.value().eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// テキスト値のパラメータを取得
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParameterValue::as_text)
    }

    /// パラメータが存在するか
    pub fn contains(&self, name: &ParameterName<P>) -> bool {
        self.get(name.value()).is_some()
    }

    /// パラメータを設定
    ///
    /// 値の型がパラメータ名の型と一致しなければエラー。
    /// 同名のパラメータがあれば位置を保ったまま置き換える。
    pub fn insert(&mut self, name: ParameterName<P>, value: ParameterValue) -> Result<(), ParseError> {
        let expected = name.kind();
        let actual = value.kind();
        if expected != actual {
            return Err(ParseError::invalid_argument(format!(
                "Parameter {:?} expects {:?} value but got {:?}",
                name.value(),
                expected,
                actual
            )));
        }
        if let ParameterValue::Text(text) = &value {
            if !is_quotable(text) {
                return Err(ParseError::invalid_argument(format!(
                    "Parameter {:?} value {:?} contains control characters",
                    name.value(),
                    text
                )));
            }
        }
        self.replace(name, value);
        Ok(())
    }

    pub(crate) fn replace(&mut self, name: ParameterName<P>, value: ParameterValue) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// パラメータを削除
    pub fn remove(&mut self, name: &str) -> Option<ParameterValue> {
        let pos = self
            .entries
            .iter()
            .position(|(n, _)| n.value().eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(pos).1)
    }

    /// (名前, 値) を挿入順に列挙
    pub fn iter(&self) -> impl Iterator<Item = (&ParameterName<P>, &ParameterValue)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    /// パラメータ数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// q パラメータ
    pub fn q_factor(&self) -> Option<QFactor> {
        match self.get("q") {
            Some(ParameterValue::QFactor(q)) => Some(*q),
            _ => None,
        }
    }
}

impl<P: ParameterSet> Default for Parameters<P> {
    fn default() -> Self {
        Parameters::new()
    }
}

impl<P> Clone for Parameters<P> {
    fn clone(&self) -> Self {
        Parameters {
            entries: self.entries.clone(),
        }
    }
}

impl<P> fmt::Debug for Parameters<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(n, v)| (&*n.name, v)))
            .finish()
    }
}

impl<P> PartialEq for Parameters<P> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(name, value)| {
                other
                    .entries
                    .iter()
                    .any(|(n, v)| n == name && v == value)
            })
    }
}

/// `;name=value` を並べて出力
impl<P> fmt::Display for Parameters<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.entries {
            write!(f, ";{}={}", name, value)?;
        }
        Ok(())
    }
}

/// q 値の降順で安定ソート (q 値なしは 1.0 扱い)
pub(crate) fn sort_by_q_factor<T>(items: &mut [T], q_factor: impl Fn(&T) -> Option<QFactor>) {
    items.sort_by(|a, b| {
        let a = q_factor(a).unwrap_or_default().value();
        let b = q_factor(b).unwrap_or_default().value();
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });
}
