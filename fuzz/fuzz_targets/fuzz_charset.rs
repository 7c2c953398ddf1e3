#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_header_value::charset::{CharsetHeaderValue, CharsetName};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(name) = CharsetName::new(s) {
            assert!(name.value().eq_ignore_ascii_case(s));
            assert!(CharsetName::WILDCARD.is_match(&name));
        }

        if let Ok(list) = CharsetHeaderValue::parse_list(s) {
            for value in &list {
                let _ = value.charset().is_wildcard();
                let reparsed = CharsetHeaderValue::parse(&value.to_string()).unwrap();
                assert_eq!(value, &reparsed);
            }
        }
    }
});
