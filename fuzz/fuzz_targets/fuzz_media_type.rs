#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_header_value::HeaderValueLimits;
use shiguredo_header_value::media_type::MediaType;

fuzz_target!(|data: &[u8]| {
    // UTF-8 文字列として解釈できる場合のみテスト
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(mt) = MediaType::parse(s) {
            // パース成功したら各種操作を実行
            let _ = mt.media_type();
            let _ = mt.subtype();
            let _ = mt.value();
            let _ = mt.charset();
            let _ = mt.boundary();
            let _ = mt.q_factor_or_default();
            let _ = mt.is_text();
            let _ = mt.is_json();
            let _ = mt.is_multipart();
            let _ = mt.is_form_data();
            let _ = mt.is_form_urlencoded();
            let _ = MediaType::WILDCARD_WILDCARD.is_compatible(&mt);

            // 元テキストを保持しているので出力は再パースできる
            let displayed = mt.to_string();
            let reparsed = MediaType::parse(&displayed).unwrap();
            assert_eq!(mt, reparsed);

            // 元テキストを捨てた出力も再パースできる (q 値の表記で長くなることがある)
            let canonical = mt.clone().with_parameters(mt.parameters().clone());
            let reparsed =
                MediaType::parse_with_limits(&canonical.to_string(), &HeaderValueLimits::unlimited())
                    .unwrap();
            assert_eq!(mt, reparsed);
        }

        if let Ok(list) = MediaType::parse_list(s) {
            assert!(!list.is_empty());
            // q 値の降順
            for pair in list.windows(2) {
                assert!(pair[0].q_factor_or_default() >= pair[1].q_factor_or_default());
            }
        }
    }
});
