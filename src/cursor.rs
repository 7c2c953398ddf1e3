//! 入力文字列上の読み取り位置

use crate::error::ParseError;
use crate::predicate::AsciiSet;

/// 位置付きの読み取りビュー
///
/// 位置はバイトオフセットで、常に文字境界を指す。
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Cursor { text, offset: 0 }
    }

    /// 元の入力全体
    pub(crate) fn text(&self) -> &'a str {
        self.text
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// 現在の文字 (終端なら None)
    pub(crate) fn current(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    /// 現在の文字。終端なら `what` が足りないエラー
    pub(crate) fn current_or_missing(&self, what: &'static str) -> Result<char, ParseError> {
        self.current().ok_or_else(|| self.missing(what))
    }

    pub(crate) fn has_more(&self) -> bool {
        self.offset < self.text.len()
    }

    /// 1 文字進める
    pub(crate) fn next(&mut self) {
        if let Some(c) = self.current() {
            self.offset += c.len_utf8();
        }
    }

    /// 現在の文字が `c` なら進めて true
    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.current() == Some(c) {
            self.next();
            true
        } else {
            false
        }
    }

    /// 集合に含まれる文字が続く限り読み進め、その範囲を返す
    pub(crate) fn take_while(&mut self, set: AsciiSet) -> &'a str {
        let start = self.offset;
        while let Some(c) = self.current() {
            if !set.contains(c) {
                break;
            }
            self.next();
        }
        &self.text[start..self.offset]
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }

    /// 現在位置の文字が不正
    pub(crate) fn invalid_character(&self) -> ParseError {
        ParseError::invalid_character(self.text(), self.offset)
    }

    /// 現在位置に `what` がない
    pub(crate) fn missing(&self, what: &'static str) -> ParseError {
        ParseError::missing(what, self.text(), self.offset)
    }

    /// 現在位置が終端なら missing、そうでなければ invalid character
    pub(crate) fn unexpected(&self, what: &'static str) -> ParseError {
        if self.has_more() {
            self.invalid_character()
        } else {
            self.missing(what)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::TOKEN;

    #[test]
    fn test_walk() {
        let mut cursor = Cursor::new("ab");
        assert!(cursor.has_more());
        assert_eq!(cursor.current(), Some('a'));
        cursor.next();
        assert_eq!(cursor.current(), Some('b'));
        cursor.next();
        assert!(!cursor.has_more());
        assert_eq!(cursor.current(), None);
        cursor.next();
        assert_eq!(cursor.offset(), 2);
    }

    #[test]
    fn test_multibyte() {
        let mut cursor = Cursor::new("日本");
        cursor.next();
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.current(), Some('本'));
    }

    #[test]
    fn test_take_while_token() {
        let mut cursor = Cursor::new("gzip;q=1");
        assert_eq!(cursor.take_while(TOKEN), "gzip");
        assert_eq!(cursor.current(), Some(';'));
        assert!(cursor.eat(';'));
        assert!(!cursor.eat(';'));
    }

    #[test]
    fn test_errors_at_offset() {
        let mut cursor = Cursor::new("ab");
        cursor.next();
        assert_eq!(
            cursor.unexpected("x"),
            ParseError::invalid_character("ab", 1)
        );
        cursor.next();
        assert_eq!(cursor.unexpected("x"), ParseError::missing("x", "ab", 2));
        assert!(cursor.current_or_missing("x").is_err());
    }
}
