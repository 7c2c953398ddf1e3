//! ヘッダー値コンバーター
//!
//! ## 概要
//!
//! テキストと型付きの値を相互に変換する。どの文法のエラーも
//! ヘッダー名と値を含む [`HeaderError`] にまとめて返す。
//!
//! - `parse`: テキストから値へ
//! - `check`: 型の分からない値 (`&dyn Any`) が期待する型かどうか検査する
//! - `to_text`: 値からヘッダーテキストへ
//!
//! `tracing` feature を有効にすると、エラーを返す前に `debug` レベルで記録する。
//!
//! ## 使い方
//!
//! ```rust
//! use shiguredo_header_value::converter::{Converter, List};
//! use shiguredo_header_value::media_type::MediaType;
//!
//! let accept = List::<MediaType>::new();
//! let list = accept.parse("text/html;q=0.5, application/json", "Accept").unwrap();
//! assert_eq!(list[0], MediaType::APPLICATION_JSON);
//! assert_eq!(
//!     accept.to_text(&list, "Accept").unwrap(),
//!     "application/json, text/html;q=0.5"
//! );
//!
//! let e = accept.parse("text/", "Accept").unwrap_err();
//! assert_eq!(e.name(), "Accept");
//! ```

use core::fmt::{self, Write};
use std::any::{Any, type_name};
use std::marker::PhantomData;

use crate::charset::CharsetHeaderValue;
use crate::content_disposition::ContentDisposition;
use crate::error::{HeaderError, ParseError};
use crate::etag::ETag;
use crate::grammar::write_list;
use crate::language::LanguageTag;
use crate::limits::HeaderValueLimits;
use crate::link::Link;
use crate::media_type::MediaType;
use crate::token::TokenHeaderValue;

/// テキストと値の相互変換
pub trait Converter {
    /// 変換先の型
    type Value;

    /// 制限付きでテキストをパース
    fn parse_with_limits(
        &self,
        text: &str,
        name: &str,
        limits: &HeaderValueLimits,
    ) -> Result<Self::Value, HeaderError>;

    /// テキストをパース
    fn parse(&self, text: &str, name: &str) -> Result<Self::Value, HeaderError> {
        self.parse_with_limits(text, name, &HeaderValueLimits::default())
    }

    /// 値の型を検査し、複製を返す
    fn check(&self, value: &dyn Any, name: &str) -> Result<Self::Value, HeaderError>;

    /// 値をヘッダーテキストにする
    fn to_text(&self, value: &Self::Value, name: &str) -> Result<String, HeaderError>;
}

/// 単一値としてパースできる型
pub trait ParseOne: Sized {
    /// 制限付きで単一値をパース
    fn parse_one(text: &str, limits: &HeaderValueLimits) -> Result<Self, ParseError>;
}

/// リストとしてパースできる型
pub trait ParseList: Sized {
    /// 制限付きでリストをパース
    fn parse_list(text: &str, limits: &HeaderValueLimits) -> Result<Vec<Self>, ParseError>;
}

macro_rules! impl_parse_one {
    ($($ty:ty),*) => {
        $(
            impl ParseOne for $ty {
                fn parse_one(text: &str, limits: &HeaderValueLimits) -> Result<Self, ParseError> {
                    <$ty>::parse_with_limits(text, limits)
                }
            }
        )*
    };
}

macro_rules! impl_parse_list {
    ($($ty:ty),*) => {
        $(
            impl ParseList for $ty {
                fn parse_list(
                    text: &str,
                    limits: &HeaderValueLimits,
                ) -> Result<Vec<Self>, ParseError> {
                    <$ty>::parse_list_with_limits(text, limits)
                }
            }
        )*
    };
}

impl_parse_one!(MediaType, TokenHeaderValue, ETag, ContentDisposition);
impl_parse_list!(
    MediaType,
    CharsetHeaderValue,
    LanguageTag,
    TokenHeaderValue,
    ETag,
    Link
);

/// 単一値のコンバーター
pub struct One<T>(PhantomData<fn() -> T>);

impl<T> One<T> {
    /// コンバーターを作成
    pub const fn new() -> Self {
        One(PhantomData)
    }
}

impl<T> Default for One<T> {
    fn default() -> Self {
        One::new()
    }
}

impl<T> fmt::Debug for One<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "One<{}>", type_name::<T>())
    }
}

impl<T> Converter for One<T>
where
    T: ParseOne + Clone + fmt::Display + 'static,
{
    type Value = T;

    fn parse_with_limits(
        &self,
        text: &str,
        name: &str,
        limits: &HeaderValueLimits,
    ) -> Result<T, HeaderError> {
        T::parse_one(text, limits).map_err(|e| parse_error(name, text, e))
    }

    fn check(&self, value: &dyn Any, name: &str) -> Result<T, HeaderError> {
        if let Some(value) = value.downcast_ref::<T>() {
            return Ok(value.clone());
        }
        match value.downcast_ref::<Option<T>>() {
            Some(Some(value)) => Ok(value.clone()),
            Some(None) => Err(check_error(name, "value is None".to_string())),
            None => Err(check_error(
                name,
                format!("expected {}", type_name::<T>()),
            )),
        }
    }

    fn to_text(&self, value: &T, name: &str) -> Result<String, HeaderError> {
        let mut text = String::new();
        write!(text, "{}", value).map_err(|e| format_error(name, e))?;
        Ok(text)
    }
}

/// カンマ区切りリストのコンバーター
pub struct List<T>(PhantomData<fn() -> T>);

impl<T> List<T> {
    /// コンバーターを作成
    pub const fn new() -> Self {
        List(PhantomData)
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        List::new()
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List<{}>", type_name::<T>())
    }
}

impl<T> Converter for List<T>
where
    T: ParseList + Clone + fmt::Display + 'static,
{
    type Value = Vec<T>;

    fn parse_with_limits(
        &self,
        text: &str,
        name: &str,
        limits: &HeaderValueLimits,
    ) -> Result<Vec<T>, HeaderError> {
        T::parse_list(text, limits).map_err(|e| parse_error(name, text, e))
    }

    /// `Vec<T>`、`Vec<Option<T>>`、`Vec<Box<dyn Any>>` を受け付ける
    ///
    /// 要素が `None` または期待する型でなければエラー。
    fn check(&self, value: &dyn Any, name: &str) -> Result<Vec<T>, HeaderError> {
        if let Some(list) = value.downcast_ref::<Vec<T>>() {
            return Ok(list.clone());
        }
        if let Some(list) = value.downcast_ref::<Vec<Option<T>>>() {
            return list
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    item.clone()
                        .ok_or_else(|| check_error(name, format!("element {} is None", i)))
                })
                .collect();
        }
        if let Some(list) = value.downcast_ref::<Vec<Box<dyn Any>>>() {
            return list
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    item.downcast_ref::<T>().cloned().ok_or_else(|| {
                        check_error(
                            name,
                            format!("element {} is not {}", i, type_name::<T>()),
                        )
                    })
                })
                .collect();
        }
        Err(check_error(
            name,
            format!("expected list of {}", type_name::<T>()),
        ))
    }

    fn to_text(&self, value: &Vec<T>, name: &str) -> Result<String, HeaderError> {
        if value.is_empty() {
            return Err(HeaderError::Format {
                name: name.to_string(),
                source: ParseError::invalid_argument("empty list"),
            });
        }
        let mut text = String::new();
        write_list(&mut text, value).map_err(|e| format_error(name, e))?;
        Ok(text)
    }
}

fn parse_error(name: &str, text: &str, source: ParseError) -> HeaderError {
    #[cfg(feature = "tracing")]
    tracing::debug!(header = name, value = text, error = %source, "failed to parse header value");
    HeaderError::Parse {
        name: name.to_string(),
        value: text.to_string(),
        source,
    }
}

fn check_error(name: &str, message: String) -> HeaderError {
    #[cfg(feature = "tracing")]
    tracing::debug!(header = name, error = %message, "unexpected header value type");
    HeaderError::Check {
        name: name.to_string(),
        message,
    }
}

fn format_error(name: &str, error: fmt::Error) -> HeaderError {
    #[cfg(feature = "tracing")]
    tracing::debug!(header = name, error = %error, "failed to format header value");
    HeaderError::Format {
        name: name.to_string(),
        source: ParseError::invalid_argument(error.to_string()),
    }
}
