#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_header_value::{HeaderValueLimits, header};

#[derive(Arbitrary, Debug)]
struct FuzzLimits {
    max_value_length: u16,
    max_list_items: u8,
    max_parameters: u8,
}

fuzz_target!(|data: (FuzzLimits, String)| {
    let (fuzz_limits, value) = data;
    let limits = HeaderValueLimits {
        max_value_length: fuzz_limits.max_value_length as usize,
        max_list_items: fuzz_limits.max_list_items as usize,
        max_parameters: fuzz_limits.max_parameters as usize,
    };

    // 制限付きパースは制限を超える結果を返さない
    if let Ok(list) = header::ACCEPT.parse_with_limits(&value, &limits) {
        assert!(value.len() <= limits.max_value_length);
        assert!(list.len() <= limits.max_list_items);
        for mt in &list {
            assert!(mt.parameters().len() <= limits.max_parameters);
        }
        let _ = header::ACCEPT.to_text(&list);
    }

    if let Ok(list) = header::IF_NONE_MATCH.parse_with_limits(&value, &limits) {
        assert!(list.len() <= limits.max_list_items);
    }

    let _ = header::CONTENT_TYPE.parse_with_limits(&value, &limits);
    let _ = header::ACCEPT_LANGUAGE.parse_with_limits(&value, &limits);
    let _ = header::CONTENT_DISPOSITION.parse_with_limits(&value, &limits);
    let _ = header::LINK.parse_with_limits(&value, &limits);
});
