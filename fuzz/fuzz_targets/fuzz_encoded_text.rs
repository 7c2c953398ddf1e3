#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_header_value::encoded_text::EncodedText;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // パース
        if let Ok(text) = EncodedText::parse(s) {
            let reparsed = EncodedText::parse(&text.to_string()).unwrap();
            assert_eq!(text, reparsed);
        }

        // 任意の文字列は UTF-8 で表現できる
        let text = EncodedText::utf8(s);
        let reparsed = EncodedText::parse(&text.to_string()).unwrap();
        assert_eq!(reparsed.value(), s);
    }
});
