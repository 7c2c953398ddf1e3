//! エラー型

use std::fmt;

/// ヘッダー値のパース / 構築エラー
///
/// 位置情報はすべて入力文字列のバイトオフセット。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// 文法上その位置に現れてはならない文字
    InvalidCharacter {
        character: char,
        offset: usize,
        text: String,
    },
    /// 必要なトークンがない
    Missing {
        what: &'static str,
        offset: usize,
        text: String,
    },
    /// パラメータ値の型変換に失敗
    Conversion {
        name: String,
        value: String,
        message: String,
    },
    /// 不正な引数 (値オブジェクトの検証や構造上の制約)
    InvalidArgument(String),
    /// 制限超過
    LimitExceeded {
        what: &'static str,
        size: usize,
        limit: usize,
    },
}

impl ParseError {
    pub(crate) fn invalid_character(text: &str, offset: usize) -> Self {
        let character = text[offset..].chars().next().unwrap_or('\0');
        ParseError::InvalidCharacter {
            character,
            offset,
            text: text.to_string(),
        }
    }

    pub(crate) fn missing(what: &'static str, text: &str, offset: usize) -> Self {
        ParseError::Missing {
            what,
            offset,
            text: text.to_string(),
        }
    }

    pub(crate) fn conversion(name: &str, value: &str, message: impl fmt::Display) -> Self {
        ParseError::Conversion {
            name: name.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        ParseError::InvalidArgument(message.into())
    }

    /// エラー位置 (位置情報を持つ場合のみ)
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::InvalidCharacter { offset, .. } | ParseError::Missing { offset, .. } => {
                Some(*offset)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidCharacter {
                character,
                offset,
                text,
            } => write!(
                f,
                "Invalid character {:?} at {} in {:?}",
                character, offset, text
            ),
            ParseError::Missing { what, offset, text } => {
                write!(f, "Missing {} at {} in {:?}", what, offset, text)
            }
            ParseError::Conversion {
                name,
                value,
                message,
            } => write!(
                f,
                "Failed to convert {:?} value {:?}, message: {}",
                name, value, message
            ),
            ParseError::InvalidArgument(message) => write!(f, "{}", message),
            ParseError::LimitExceeded { what, size, limit } => {
                write!(f, "{} too large: {} > {}", what, size, limit)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// コンバーター層のエラー
///
/// どの文法が失敗してもヘッダー名と値を含む同じ形で返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// テキストのパースに失敗
    Parse {
        name: String,
        value: String,
        source: ParseError,
    },
    /// 型付き値の検査に失敗
    Check { name: String, message: String },
    /// テキストへの変換に失敗
    Format { name: String, source: ParseError },
}

impl HeaderError {
    /// ヘッダー名
    pub fn name(&self) -> &str {
        match self {
            HeaderError::Parse { name, .. }
            | HeaderError::Check { name, .. }
            | HeaderError::Format { name, .. } => name,
        }
    }
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderError::Parse {
                name,
                value,
                source,
            } => write!(f, "Header {:?}: invalid value {:?}: {}", name, value, source),
            HeaderError::Check { name, message } => write!(f, "Header {:?}: {}", name, message),
            HeaderError::Format { name, source } => write!(f, "Header {:?}: {}", name, source),
        }
    }
}

impl std::error::Error for HeaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HeaderError::Parse { source, .. } | HeaderError::Format { source, .. } => Some(source),
            HeaderError::Check { .. } => None,
        }
    }
}
