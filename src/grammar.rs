//! ヘッダー値の共通パース骨格
//!
//! ```text
//! list      = item *( OWS "," OWS item )
//! item      = [ comment ] value [ comment ] *( OWS ";" OWS parameter )
//! parameter = token OWS "=" OWS ( token / quoted-string )
//! ```
//!
//! 文法ごとの差分 (値の読み取り、パラメータ表、コメント可否、リスト後処理) は
//! [`Grammar`] で与える。パースは途中で失敗したら全体を失敗とする。

use core::fmt;
use std::borrow::Cow;

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::limits::HeaderValueLimits;
use crate::parameter::{ParameterName, ParameterSet, ParameterValue, Parameters};
use crate::predicate::{RFC2045_TOKEN, WHITESPACE, is_comment_text, is_qdtext, is_quoted_pair_char};

/// 文法ごとの差分
pub(crate) trait Grammar {
    /// パラメータより前の主値
    type Primary;
    /// パラメータ表
    type Parameters: ParameterSet;
    /// パース結果
    type Output;

    /// 主値の名前 (エラーメッセージ用)
    const LABEL: &'static str;
    /// 主値の前後にコメントを許すか
    const COMMENTS: bool = false;
    /// パラメータを許すか
    const PARAMETERS: bool = true;

    /// 主値を読む
    fn primary(cursor: &mut Cursor<'_>) -> Result<Self::Primary, ParseError>;

    /// 主値とパラメータから値を組み立てる。`text` はこの要素の元テキスト
    fn build(
        primary: Self::Primary,
        parameters: Parameters<Self::Parameters>,
        text: &str,
    ) -> Result<Self::Output, ParseError>;

    /// リストの後処理
    fn finish(_items: &mut [Self::Output]) {}
}

/// 単一値としてパース
///
/// 値の後には空白 (とコメント) しか許さない。
pub(crate) fn parse_one<G: Grammar>(
    text: &str,
    limits: &HeaderValueLimits,
) -> Result<G::Output, ParseError> {
    limits.check_length(text)?;
    let mut cursor = Cursor::new(text);
    let item = parse_item::<G>(&mut cursor, limits)?;
    skip::<G>(&mut cursor)?;
    if cursor.has_more() {
        return Err(cursor.invalid_character());
    }
    Ok(item)
}

/// カンマ区切りリストとしてパース
pub(crate) fn parse_list<G: Grammar>(
    text: &str,
    limits: &HeaderValueLimits,
) -> Result<Vec<G::Output>, ParseError> {
    limits.check_length(text)?;
    let mut cursor = Cursor::new(text);
    let mut items = Vec::new();
    loop {
        items.push(parse_item::<G>(&mut cursor, limits)?);
        limits.check_list_items(items.len())?;
        skip::<G>(&mut cursor)?;
        match cursor.current() {
            None => break,
            Some(',') => cursor.next(),
            Some(_) => return Err(cursor.invalid_character()),
        }
    }
    G::finish(&mut items);
    Ok(items)
}

fn parse_item<G: Grammar>(
    cursor: &mut Cursor<'_>,
    limits: &HeaderValueLimits,
) -> Result<G::Output, ParseError> {
    skip::<G>(cursor)?;
    if !cursor.has_more() {
        return Err(cursor.missing(G::LABEL));
    }
    let start = cursor.offset();
    let primary = G::primary(cursor)?;
    let mut end = cursor.offset();
    skip::<G>(cursor)?;

    let mut parameters = Parameters::<G::Parameters>::new();
    while cursor.current() == Some(';') {
        if !G::PARAMETERS {
            return Err(cursor.invalid_character());
        }
        cursor.next();
        skip_whitespace(cursor);
        let (name, value) = parameter::<G::Parameters>(cursor)?;
        parameters.replace(name, value);
        limits.check_parameters(parameters.len())?;
        end = cursor.offset();
        skip_whitespace(cursor);
    }

    let text = cursor.slice(start, end).trim_end_matches([' ', '\t']);
    G::build(primary, parameters, text)
}

fn parameter<P: ParameterSet>(
    cursor: &mut Cursor<'_>,
) -> Result<(ParameterName<P>, ParameterValue), ParseError> {
    let name = cursor.take_while(RFC2045_TOKEN);
    if name.is_empty() {
        return Err(cursor.unexpected("parameter name"));
    }
    skip_whitespace(cursor);
    if !cursor.eat('=') {
        return Err(cursor.unexpected("'='"));
    }
    skip_whitespace(cursor);
    let raw = match cursor.current() {
        Some('"') => Cow::Owned(quoted_string(cursor)?),
        _ => {
            let value = cursor.take_while(RFC2045_TOKEN);
            if value.is_empty() {
                return Err(cursor.unexpected("parameter value"));
            }
            Cow::Borrowed(value)
        }
    };
    let name = ParameterName::<P>::new(name)?;
    let value = name.convert(&raw)?;
    Ok((name, value))
}

/// 空白 (と文法が許せばコメント) を読み飛ばす
fn skip<G: Grammar>(cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
    loop {
        skip_whitespace(cursor);
        if G::COMMENTS && cursor.current() == Some('(') {
            comment(cursor)?;
        } else {
            return Ok(());
        }
    }
}

pub(crate) fn skip_whitespace(cursor: &mut Cursor<'_>) {
    cursor.take_while(WHITESPACE);
}

/// RFC 822 コメント (入れ子と quoted-pair を許す)
fn comment(cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
    let mut depth = 0usize;
    loop {
        match cursor.current() {
            None => return Err(cursor.missing("')'")),
            Some('(') => {
                depth += 1;
                cursor.next();
            }
            Some(')') => {
                cursor.next();
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Some('\\') => {
                cursor.next();
                match cursor.current() {
                    Some(c) if is_quoted_pair_char(c) => cursor.next(),
                    _ => return Err(cursor.unexpected("escaped character")),
                }
            }
            Some(c) if is_comment_text(c) => cursor.next(),
            Some(_) => return Err(cursor.invalid_character()),
        }
    }
}

/// 引用符付き文字列を読み、エスケープを外した値を返す
///
/// 呼び出し時点でカーソルは開き引用符を指していること。
pub(crate) fn quoted_string(cursor: &mut Cursor<'_>) -> Result<String, ParseError> {
    if !cursor.eat('"') {
        return Err(cursor.unexpected("'\"'"));
    }
    let mut value = String::new();
    loop {
        match cursor.current() {
            None => return Err(cursor.missing("closing '\"'")),
            Some('"') => {
                cursor.next();
                return Ok(value);
            }
            Some('\\') => {
                cursor.next();
                match cursor.current() {
                    Some(c) if is_quoted_pair_char(c) => {
                        value.push(c);
                        cursor.next();
                    }
                    _ => return Err(cursor.unexpected("escaped character")),
                }
            }
            Some(c) if is_qdtext(c) => {
                value.push(c);
                cursor.next();
            }
            Some(_) => return Err(cursor.invalid_character()),
        }
    }
}

/// 引用符付き文字列として表現できるか
pub(crate) fn is_quotable(s: &str) -> bool {
    s.chars().all(is_quoted_pair_char)
}

/// トークンならそのまま、そうでなければ引用符付きで出力
pub(crate) fn write_token_or_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if RFC2045_TOKEN.matches(s) {
        f.write_str(s)
    } else {
        write_quoted(f, s)
    }
}

/// `\` と `"` をエスケープして引用符付きで出力
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        if c == '"' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{}", c)?;
    }
    f.write_str("\"")
}

/// ", " 区切りで出力
pub(crate) fn write_list<W: fmt::Write, T: fmt::Display>(w: &mut W, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            w.write_str(", ")?;
        }
        write!(w, "{}", item)?;
    }
    Ok(())
}

/// スライスを ", " 区切りのヘッダーテキストにする
pub fn to_list_text<T: fmt::Display>(items: &[T]) -> String {
    let mut text = String::new();
    // String への書き込みは失敗しない
    let _ = write_list(&mut text, items);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::ParameterKind;
    use crate::predicate::TOKEN;

    struct Words;

    impl ParameterSet for Words {
        const CONSTANTS: &'static [&'static str] = &["q"];

        fn kind(name: &str) -> ParameterKind {
            if name.eq_ignore_ascii_case("q") {
                ParameterKind::QFactor
            } else {
                ParameterKind::Text
            }
        }
    }

    struct Word;

    impl Grammar for Word {
        type Primary = String;
        type Parameters = Words;
        type Output = (String, Parameters<Words>, String);

        const LABEL: &'static str = "word";
        const COMMENTS: bool = true;

        fn primary(cursor: &mut Cursor<'_>) -> Result<String, ParseError> {
            let word = cursor.take_while(TOKEN);
            if word.is_empty() {
                return Err(cursor.unexpected("word"));
            }
            Ok(word.to_string())
        }

        fn build(
            primary: String,
            parameters: Parameters<Words>,
            text: &str,
        ) -> Result<Self::Output, ParseError> {
            Ok((primary, parameters, text.to_string()))
        }
    }

    fn one(text: &str) -> Result<(String, Parameters<Words>, String), ParseError> {
        parse_one::<Word>(text, &HeaderValueLimits::default())
    }

    fn list(text: &str) -> Result<Vec<(String, Parameters<Words>, String)>, ParseError> {
        parse_list::<Word>(text, &HeaderValueLimits::default())
    }

    #[test]
    fn test_one_with_parameters() {
        let (word, params, text) = one("  abc ; x = 1 ;y=\"a b\"  ").unwrap();
        assert_eq!(word, "abc");
        assert_eq!(params.text("x"), Some("1"));
        assert_eq!(params.text("y"), Some("a b"));
        assert_eq!(text, "abc ; x = 1 ;y=\"a b\"");
    }

    #[test]
    fn test_comments_around_value() {
        let (word, _, _) = one("(lead (nested)) abc (trail \\) x)").unwrap();
        assert_eq!(word, "abc");
        assert_eq!(
            one("abc (open"),
            Err(ParseError::missing("')'", "abc (open", 9))
        );
    }

    #[test]
    fn test_separator_requires_parameter() {
        assert_eq!(
            one("abc;"),
            Err(ParseError::missing("parameter name", "abc;", 4))
        );
        assert_eq!(
            one("abc;;x=1"),
            Err(ParseError::invalid_character("abc;;x=1", 4))
        );
        assert_eq!(
            one("abc;x=1; "),
            Err(ParseError::missing("parameter name", "abc;x=1; ", 9))
        );
        assert_eq!(
            list("abc;, d"),
            Err(ParseError::invalid_character("abc;, d", 4))
        );
    }

    #[test]
    fn test_missing_equals() {
        assert_eq!(one("abc;x"), Err(ParseError::missing("'='", "abc;x", 5)));
        assert_eq!(
            one("abc;x?"),
            Err(ParseError::invalid_character("abc;x?", 5))
        );
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            one("abc;x="),
            Err(ParseError::missing("parameter value", "abc;x=", 6))
        );
        assert_eq!(
            one("abc;x=;"),
            Err(ParseError::invalid_character("abc;x=;", 6))
        );
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            one("abc;x=\"12"),
            Err(ParseError::missing("closing '\"'", "abc;x=\"12", 9))
        );
    }

    #[test]
    fn test_escaped_quote_and_backslash() {
        let (_, params, _) = one(r#"abc;x="a\"b\\c""#).unwrap();
        assert_eq!(params.text("x"), Some("a\"b\\c"));
    }

    #[test]
    fn test_q_conversion_error() {
        let e = one("abc;q=high").unwrap_err();
        assert_eq!(
            e,
            ParseError::Conversion {
                name: "q".to_string(),
                value: "high".to_string(),
                message: "invalid float literal".to_string(),
            }
        );
    }

    #[test]
    fn test_one_rejects_trailing_separator() {
        assert_eq!(one("abc,"), Err(ParseError::invalid_character("abc,", 3)));
        assert_eq!(
            one("abc def"),
            Err(ParseError::invalid_character("abc def", 4))
        );
    }

    #[test]
    fn test_list_items() {
        let items = list("a;x=1, b ,c").unwrap();
        let words: Vec<_> = items.iter().map(|(w, _, _)| w.as_str()).collect();
        assert_eq!(words, ["a", "b", "c"]);
        assert_eq!(items[0].2, "a;x=1");
        assert_eq!(items[1].2, "b");
    }

    #[test]
    fn test_list_rejects_empty_elements() {
        assert_eq!(list(""), Err(ParseError::missing("word", "", 0)));
        assert_eq!(list("a,"), Err(ParseError::missing("word", "a,", 2)));
        assert_eq!(list("a,,b"), Err(ParseError::invalid_character("a,,b", 2)));
    }

    #[test]
    fn test_list_fails_as_a_whole() {
        assert!(list("a, b;q=x, c").is_err());
    }

    #[test]
    fn test_limits_applied() {
        let limits = HeaderValueLimits {
            max_value_length: 64,
            max_list_items: 2,
            max_parameters: 1,
        };
        assert!(matches!(
            parse_list::<Word>("a, b, c", &limits),
            Err(ParseError::LimitExceeded { what: "list", .. })
        ));
        assert!(matches!(
            parse_one::<Word>("a;x=1;y=2", &limits),
            Err(ParseError::LimitExceeded {
                what: "parameters",
                ..
            })
        ));
        let long = "a".repeat(65);
        assert!(matches!(
            parse_one::<Word>(&long, &limits),
            Err(ParseError::LimitExceeded {
                what: "header value",
                ..
            })
        ));
    }

    #[test]
    fn test_quoting() {
        assert_eq!(
            ParameterValue::Text("plain".to_string()).to_string(),
            "plain"
        );
        assert_eq!(ParameterValue::Text("a b".to_string()).to_string(), "\"a b\"");
        assert_eq!(ParameterValue::Text(String::new()).to_string(), "\"\"");
        assert_eq!(to_list_text(&["a", "b"]), "a, b");
    }
}
