//! パース時の制限設定

use crate::error::ParseError;

/// ヘッダー値パースの制限設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderValueLimits {
    /// 最大入力長 (バイト、デフォルト: 8KB)
    pub max_value_length: usize,
    /// リストの最大要素数 (デフォルト: 64)
    pub max_list_items: usize,
    /// 1 要素あたりの最大パラメータ数 (デフォルト: 32)
    pub max_parameters: usize,
}

impl Default for HeaderValueLimits {
    fn default() -> Self {
        Self {
            max_value_length: 8 * 1024, // 8KB
            max_list_items: 64,
            max_parameters: 32,
        }
    }
}

impl HeaderValueLimits {
    /// 制限なしの設定を作成
    pub fn unlimited() -> Self {
        Self {
            max_value_length: usize::MAX,
            max_list_items: usize::MAX,
            max_parameters: usize::MAX,
        }
    }

    pub(crate) fn check_length(&self, text: &str) -> Result<(), ParseError> {
        check("header value", text.len(), self.max_value_length)
    }

    pub(crate) fn check_list_items(&self, count: usize) -> Result<(), ParseError> {
        check("list", count, self.max_list_items)
    }

    pub(crate) fn check_parameters(&self, count: usize) -> Result<(), ParseError> {
        check("parameters", count, self.max_parameters)
    }
}

fn check(what: &'static str, size: usize, limit: usize) -> Result<(), ParseError> {
    if size > limit {
        return Err(ParseError::LimitExceeded { what, size, limit });
    }
    Ok(())
}
