#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(json) = bodykit::xml_to_json(s) {
            let _ = bodykit::json_to_xml(&json);
        }
    }
});
