//! Cookie 名 (RFC 6265 Section 4.1.1)
//!
//! ```text
//! cookie-name = token
//! ```
//!
//! Cookie 名は他のヘッダー値の名前と違い、大文字小文字を区別する。
//!
//! ```rust
//! use shiguredo_header_value::cookie::CookieName;
//!
//! let a = CookieName::new("session").unwrap();
//! assert_eq!(a.value(), "session");
//! assert_ne!(CookieName::new("a").unwrap(), CookieName::new("A").unwrap());
//! ```

use core::fmt;

use crate::error::ParseError;
use crate::predicate::TOKEN;

/// Cookie 名
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CookieName(String);

impl CookieName {
    /// Cookie 名を作成
    pub fn new(name: &str) -> Result<Self, ParseError> {
        if !TOKEN.matches(name) {
            return Err(ParseError::invalid_argument(format!(
                "Invalid cookie name {:?}",
                name
            )));
        }
        Ok(CookieName(name.to_string()))
    }

    /// 名前
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CookieName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_sensitive() {
        let lower = CookieName::new("a").unwrap();
        let upper = CookieName::new("A").unwrap();
        assert_ne!(lower, upper);
        assert_eq!(lower, CookieName::new("a").unwrap());
    }

    #[test]
    fn test_invalid_name() {
        assert!(CookieName::new("").is_err());
        assert!(CookieName::new("a b").is_err());
        assert!(CookieName::new("a=b").is_err());
        assert!(CookieName::new("a;b").is_err());
        assert!(CookieName::new("名前").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(CookieName::new("__Host-id").unwrap().to_string(), "__Host-id");
    }
}
