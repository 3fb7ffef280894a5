#![no_main]
use libfuzzer_sys::fuzz_target;
use kst::KstReader;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let r = KstReader::from_text(s);
        if r.is_valid() {
            assert!(r.record_count() > 0);
            for record in r.records() {
                for value in record {
                    let _ = value.read_long();
                    let _ = value.read_real();
                    let _ = value.read_string_array();
                }
            }
        } else {
            assert!(r.error().is_some());
        }
    }
});
