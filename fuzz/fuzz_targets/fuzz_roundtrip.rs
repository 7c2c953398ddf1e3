#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use shiguredo_header_value::HeaderValueLimits;
use shiguredo_header_value::content_disposition::{ContentDisposition, ContentDispositionType};
use shiguredo_header_value::etag::ETag;
use shiguredo_header_value::media_type::{MediaType, MediaTypeParameterName};
use shiguredo_header_value::parameter::ParameterValue;

#[derive(Arbitrary, Debug)]
struct FuzzMediaType {
    media_type: String,
    subtype: String,
    parameters: Vec<(String, String)>,
    q: Option<u16>,
}

#[derive(Arbitrary, Debug)]
struct FuzzDisposition {
    disposition_type: String,
    filename: Option<String>,
    filename_ext: Option<String>,
    name: Option<String>,
}

#[derive(Arbitrary, Debug)]
struct FuzzETag {
    tag: String,
    weak: bool,
}

fn media_type_roundtrip(input: &FuzzMediaType) {
    let Ok(mut mt) = MediaType::new(&input.media_type, &input.subtype) else {
        return;
    };
    for (name, value) in &input.parameters {
        let Ok(name) = MediaTypeParameterName::new(name) else {
            continue;
        };
        // 型が合わないものは with_parameter がエラーにする
        if let Ok(next) = mt.clone().with_parameter(name, ParameterValue::Text(value.clone())) {
            mt = next;
        }
    }
    if let Some(q) = input.q {
        if let Ok(next) = mt.clone().with_q_factor(f32::from(q % 1001) / 1000.0) {
            mt = next;
        }
    }

    let displayed = mt.to_string();
    let reparsed = MediaType::parse_with_limits(&displayed, &HeaderValueLimits::unlimited()).unwrap();
    assert_eq!(mt, reparsed);
}

fn disposition_roundtrip(input: &FuzzDisposition) {
    let Ok(disposition_type) = ContentDispositionType::new(&input.disposition_type) else {
        return;
    };
    let mut cd = ContentDisposition::new(disposition_type);
    if let Some(filename) = &input.filename {
        if let Ok(next) = cd.clone().with_filename(filename) {
            cd = next;
        }
    }
    if let Some(filename) = &input.filename_ext {
        if let Ok(next) = cd.clone().with_filename_ext(filename) {
            cd = next;
        }
    }
    if let Some(name) = &input.name {
        if let Ok(next) = cd.clone().with_name(name) {
            cd = next;
        }
    }

    let reparsed =
        ContentDisposition::parse_with_limits(&cd.to_string(), &HeaderValueLimits::unlimited())
            .unwrap();
    assert_eq!(cd, reparsed);
}

fn etag_roundtrip(input: &FuzzETag) {
    let etag = if input.weak {
        ETag::weak(&input.tag)
    } else {
        ETag::strong(&input.tag)
    };
    let Ok(etag) = etag else {
        return;
    };
    let reparsed =
        ETag::parse_with_limits(&etag.to_string(), &HeaderValueLimits::unlimited()).unwrap();
    assert_eq!(etag, reparsed);
}

fuzz_target!(|data: (FuzzMediaType, FuzzDisposition, FuzzETag)| {
    let (media_type, disposition, etag) = data;
    media_type_roundtrip(&media_type);
    disposition_roundtrip(&disposition);
    etag_roundtrip(&etag);
});
