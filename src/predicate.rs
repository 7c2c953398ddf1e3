//! 文字クラス判定
//!
//! 各文法で使う文字集合を ASCII ビットマップとして `const fn` で組み立てる。
//! 非 ASCII 文字はどの集合にも含まれない。

/// ASCII 文字集合 (128 ビットのビットマップ)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiSet(u128);

impl AsciiSet {
    /// 空集合
    pub const EMPTY: AsciiSet = AsciiSet(0);

    /// 文字列に含まれる文字からなる集合
    pub const fn chars(s: &str) -> Self {
        let bytes = s.as_bytes();
        let mut bits = 0u128;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] < 128 {
                bits |= 1 << bytes[i];
            }
            i += 1;
        }
        AsciiSet(bits)
    }

    /// `from..=to` の範囲の集合
    pub const fn range(from: u8, to: u8) -> Self {
        let mut bits = 0u128;
        let mut b = from;
        while b <= to && b < 128 {
            bits |= 1 << b;
            b += 1;
        }
        AsciiSet(bits)
    }

    /// 和集合
    pub const fn union(self, other: AsciiSet) -> Self {
        AsciiSet(self.0 | other.0)
    }

    /// 文字列の文字を追加
    pub const fn add(self, s: &str) -> Self {
        self.union(AsciiSet::chars(s))
    }

    /// 文字列の文字を除外
    pub const fn remove(self, s: &str) -> Self {
        AsciiSet(self.0 & !AsciiSet::chars(s).0)
    }

    /// 文字が集合に含まれるか
    pub const fn contains(&self, c: char) -> bool {
        let c = c as u32;
        c < 128 && self.0 & (1 << c) != 0
    }

    /// 空でない文字列のすべての文字が集合に含まれるか
    pub fn matches(&self, s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| self.contains(c))
    }
}

/// ALPHA
pub const ALPHA: AsciiSet = AsciiSet::range(b'A', b'Z').union(AsciiSet::range(b'a', b'z'));

/// DIGIT
pub const DIGIT: AsciiSet = AsciiSet::range(b'0', b'9');

/// ALPHA / DIGIT
pub const ALPHA_DIGIT: AsciiSet = ALPHA.union(DIGIT);

/// SP / HTAB
pub const WHITESPACE: AsciiSet = AsciiSet::chars(" \t");

/// RFC 9110 tchar
pub const TOKEN: AsciiSet = ALPHA_DIGIT.add("!#$%&'*+-.^_`|~");

/// RFC 2045 token (tspecials と SP、CTL 以外の可視文字)
pub const RFC2045_TOKEN: AsciiSet = AsciiSet::range(0x21, 0x7E).remove("()<>@,;:\\\"/[]?=");

/// RFC 2978 mime-charset-chars
pub const CHARSET: AsciiSet = ALPHA_DIGIT.add("!#$%&'+-^_`{}~");

/// 言語タグに現れる文字
pub const LANGUAGE_TAG: AsciiSet = ALPHA_DIGIT.add("-");

/// RFC 9110 etagc (ASCII 部分: %x21 / %x23-7E)
pub const ETAG: AsciiSet = AsciiSet::chars("!").union(AsciiSet::range(0x23, 0x7E));

/// RFC 5987 attr-char
pub const ATTR_CHAR: AsciiSet = ALPHA_DIGIT.add("!#$&+-.^_`|~");

/// RFC 2046 bcharsnospace
pub const BOUNDARY: AsciiSet = ALPHA_DIGIT.add("'()+_,-./:=?");

/// 引用符なしの Link URI 参照に使えない文字以外 (可視 ASCII から `<` `>` を除く)
pub const URI_REFERENCE: AsciiSet = AsciiSet::range(0x21, 0x7E).remove("<>\"");

/// RFC 9110 qdtext (obs-text を含む)
pub fn is_qdtext(c: char) -> bool {
    match c {
        '\t' | ' ' | '!' => true,
        '"' | '\\' => false,
        c if (c as u32) < 0x80 => (0x23..=0x7E).contains(&(c as u32)),
        _ => true,
    }
}

/// RFC 9110 ctext (obs-text を含む)
pub fn is_comment_text(c: char) -> bool {
    match c {
        '\t' | ' ' => true,
        '(' | ')' | '\\' => false,
        c if (c as u32) < 0x80 => (0x21..=0x7E).contains(&(c as u32)),
        _ => true,
    }
}

/// quoted-pair で引用できる文字 (HTAB / SP / VCHAR / obs-text)
pub fn is_quoted_pair_char(c: char) -> bool {
    c == '\t' || !c.is_ascii_control()
}
