//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// トークン生成 (RFC 9110)
// ========================================

/// token: 1*tchar
pub fn token() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9!#$%&'*+.^_`|~-]{1,16}".prop_map(|s| s)
}

/// RFC 2045 の token (メディアタイプの type / subtype)
pub fn media_token() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9!#$%&'*+.^_`|~{}-]{1,16}".prop_map(|s| s)
}

/// 引用符が必要な文字を含む値
pub fn value_needing_quotes() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,4} [a-z]{1,4}".prop_map(|s| s),
        "[a-z]{1,4};[a-z]{1,4}".prop_map(|s| s),
        "[a-z]{1,4},[a-z]{1,4}".prop_map(|s| s),
        "[a-z]{1,4}=[a-z]{1,4}".prop_map(|s| s),
        "[a-z]{1,4}\"[a-z]{1,4}".prop_map(|s| s),
        "[a-z]{1,4}\\\\[a-z]{1,4}".prop_map(|s| s),
    ]
}

/// q 値 (小数点以下 3 桁まで)
pub fn q_factor() -> impl Strategy<Value = f32> {
    (0u32..=1000).prop_map(|n| n as f32 / 1000.0)
}

// ========================================
// 文字セット名
// ========================================

/// 文字セット名 (既知のものと任意のもの)
pub fn charset() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("utf-8".to_string()),
        Just("UTF-8".to_string()),
        Just("iso-8859-1".to_string()),
        Just("us-ascii".to_string()),
        Just("Shift_JIS".to_string()),
        "[a-zA-Z0-9_-]{1,16}".prop_map(|s| s),
    ]
}

// ========================================
// 言語タグ生成 (BCP 47/RFC 5646)
// ========================================

/// 先頭サブタグ: ALPHA のみ (1-8 文字)
pub fn language_primary_subtag() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,8}".prop_map(|s| s)
}

/// 後続サブタグ: ALPHA / DIGIT (1-8 文字)
pub fn language_subsequent_subtag() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,8}".prop_map(|s| s)
}

/// 言語タグ: primary-subtag *("-" subtag)
pub fn language_tag() -> impl Strategy<Value = String> {
    (
        language_primary_subtag(),
        proptest::collection::vec(language_subsequent_subtag(), 0..=2),
    )
        .prop_map(|(primary, rest)| {
            if rest.is_empty() {
                primary
            } else {
                format!("{}-{}", primary, rest.join("-"))
            }
        })
}

// ========================================
// ETag
// ========================================

/// opaque-tag の中身 (etagc、ASCII のみ)
pub fn etag_tag() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9!#$%&'()*+,./:;<=>?@^_`{|}~-]{0,24}".prop_map(|s| s)
}

// ========================================
// multipart boundary
// ========================================

/// boundary (空白を含まない)
pub fn boundary() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9'()+_,./:=?-]{1,69}".prop_map(|s| s)
}
