#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_header_value::link::Link;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(links) = Link::parse_list(s) {
            for link in &links {
                let _ = link.uri();
                let _ = link.relations();
                let _ = link.media_type();
                let _ = link.hreflang();
                let _ = link.title();

                let reparsed = Link::parse(&link.to_string()).unwrap();
                assert_eq!(link, &reparsed);
            }
        }
    }
});
