#![no_main]
use libfuzzer_sys::{arbitrary, fuzz_target};
use arbitrary::Arbitrary;
use kst::{KstReader, Options};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    separator: &'a str,
    terminator: &'a str,
    document: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    if let Ok(opts) = Options::new(input.separator, input.terminator) {
        let _ = KstReader::from_str_with(input.document, &opts);
    }
});
