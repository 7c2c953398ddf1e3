#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_header_value::HeaderValueLimits;
use shiguredo_header_value::content_disposition::ContentDisposition;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(cd) = ContentDisposition::parse(s) {
            let _ = cd.disposition_type();
            let _ = cd.filename();
            let _ = cd.filename_plain();
            let _ = cd.filename_ext();
            let _ = cd.name();
            let _ = cd.size();
            let _ = cd.is_inline();
            let _ = cd.is_attachment();
            let _ = cd.is_form_data();

            let reparsed = ContentDisposition::parse(&cd.to_string()).unwrap();
            assert_eq!(cd, reparsed);

            // 元テキストを捨てた出力も再パースできる
            let canonical = cd.clone().with_parameters(cd.parameters().clone());
            let reparsed = ContentDisposition::parse_with_limits(
                &canonical.to_string(),
                &HeaderValueLimits::unlimited(),
            )
            .unwrap();
            assert_eq!(cd, reparsed);
        }
    }
});
