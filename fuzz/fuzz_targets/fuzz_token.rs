#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_header_value::token::TokenHeaderValue;
use shiguredo_header_value::{HeaderValueLimits, to_list_text};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(list) = TokenHeaderValue::parse_list(s) {
            let text = to_list_text(&list);
            // 区切りが ", " に揃うので入力より長くなることがある
            let reparsed =
                TokenHeaderValue::parse_list_with_limits(&text, &HeaderValueLimits::unlimited())
                    .unwrap();
            assert_eq!(list, reparsed);
            for token in &list {
                assert!(token.is(token.value()));
            }
        }
    }
});
