#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_header_value::etag::ETag;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(etag) = ETag::parse(s) {
            let _ = etag.tag();
            let _ = etag.is_weak();
            // 同じ値同士は Weak 比較で一致する
            assert!(etag.weak_compare(&etag));
            assert_eq!(etag.strong_compare(&etag), etag.is_strong());

            let reparsed = ETag::parse(&etag.to_string()).unwrap();
            assert_eq!(etag, reparsed);
        }

        if let Ok(list) = ETag::parse_list(s) {
            // ワイルドカードは単独でしか現れない
            if list.iter().any(ETag::is_wildcard) {
                assert_eq!(list.len(), 1);
            }
            if let Ok(current) = ETag::strong("fuzz") {
                let _ = ETag::if_match(&list, &current);
                let _ = ETag::if_none_match(&list, &current);
            }
        }
    }
});
