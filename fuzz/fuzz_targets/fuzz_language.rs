#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_header_value::language::{LanguageTag, LanguageTagName};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(name) = LanguageTagName::new(s) {
            let _ = name.primary();
            if !name.is_wildcard() {
                assert_eq!(name.is_match(&name), Ok(true));
                assert_eq!(LanguageTagName::WILDCARD.is_match(&name), Ok(true));
            }
        }

        if let Ok(list) = LanguageTag::parse_list(s) {
            for tag in &list {
                let reparsed = LanguageTag::parse(&tag.to_string()).unwrap();
                assert_eq!(tag, &reparsed);
            }
        }
    }
});
