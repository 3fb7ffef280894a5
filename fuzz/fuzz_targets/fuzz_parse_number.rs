#![no_main]
use libfuzzer_sys::fuzz_target;
use kst::{parse_long, parse_real};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let token = s.to_lowercase();
        let long = parse_long(&token);
        let real = parse_real(&token);
        // every integer reading also reads as a real
        if long.is_some() {
            assert!(real.is_some(), "{token:?} reads as long but not as real");
        }
        if let Some(v) = real {
            let text = kst::number::format_real(v);
            if v.is_finite() {
                assert_eq!(parse_real(&text), Some(v), "{token:?} -> {text}");
            }
        }
    }
});
