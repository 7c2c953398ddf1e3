//! Accept-Charset のプロパティテスト

use pbt::{charset, q_factor};
use proptest::prelude::*;
use shiguredo_header_value::charset::{CharsetHeaderValue, CharsetName};

// 文字セット名は大文字小文字を区別しない
proptest! {
    #[test]
    fn prop_charset_case_insensitive(name in charset()) {
        let lower = CharsetName::new(&name.to_ascii_lowercase()).unwrap();
        let upper = CharsetName::new(&name.to_ascii_uppercase()).unwrap();
        prop_assert_eq!(&lower, &upper);
        prop_assert!(lower.is_match(&upper));
        prop_assert!(CharsetName::WILDCARD.is_match(&lower));
    }
}

// q 値付き要素のラウンドトリップ
proptest! {
    #[test]
    fn prop_charset_roundtrip(name in charset(), q in q_factor()) {
        let value = CharsetHeaderValue::new(CharsetName::new(&name).unwrap())
            .with_q_factor(q)
            .unwrap();
        let reparsed = CharsetHeaderValue::parse(&value.to_string()).unwrap();
        prop_assert_eq!(reparsed.q_factor().map(|q| q.value()), Some(q));
        prop_assert_eq!(reparsed, value);
    }
}

// リストは q 値の降順で、同じ q 値は入力順
proptest! {
    #[test]
    fn prop_charset_list_sorted_stable(qs in proptest::collection::vec(0u32..=2, 1..8)) {
        let input = qs
            .iter()
            .enumerate()
            .map(|(i, q)| format!("cs{};q={}", i, *q as f32 / 2.0))
            .collect::<Vec<_>>()
            .join(",");
        let list = CharsetHeaderValue::parse_list(&input).unwrap();

        let mut expected: Vec<usize> = (0..qs.len()).collect();
        expected.sort_by(|a, b| qs[*b].cmp(&qs[*a]));
        let actual: Vec<&str> = list.iter().map(|v| v.charset().value()).collect();
        let expected: Vec<String> = expected.iter().map(|i| format!("cs{}", i)).collect();
        prop_assert_eq!(actual, expected);
    }
}
