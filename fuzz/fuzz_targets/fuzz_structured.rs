#![no_main]
use libfuzzer_sys::{arbitrary, fuzz_target};
use kst::KstReader;
use serde_json::Value;

const MAX_DEPTH: usize = 8;
const MAX_RECORDS: usize = 10;
const MAX_VALUES: usize = 10;

fn gen_value(
    u: &mut arbitrary::Unstructured,
    depth: usize,
    out: &mut String,
) -> arbitrary::Result<Value> {
    if depth < MAX_DEPTH && u.ratio(1, 4)? {
        let size = u.int_in_range(1..=MAX_VALUES)?;
        let mut items = Vec::with_capacity(size);
        out.push('[');
        for i in 0..size {
            if i > 0 {
                out.push_str(", ");
            }
            items.push(gen_value(u, depth + 1, out)?);
        }
        out.push(']');
        return Ok(Value::Array(items));
    }
    let s: String = u.arbitrary()?;
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    Ok(Value::String(s))
}

fuzz_target!(|data: &[u8]| {
    let mut u = arbitrary::Unstructured::new(data);
    let mut text = String::new();
    let mut expected = Vec::new();

    let Ok(records) = u.int_in_range(1..=MAX_RECORDS) else { return };
    for _ in 0..records {
        let Ok(size) = u.int_in_range(1..=MAX_VALUES) else { return };
        let mut record = Vec::with_capacity(size);
        for i in 0..size {
            if i > 0 {
                text.push_str(", ");
            }
            let Ok(v) = gen_value(&mut u, 0, &mut text) else { return };
            record.push(v);
        }
        text.push_str(";\n");
        expected.push(Value::Array(record));
    }

    let r = KstReader::from_text(&text);
    assert!(r.is_valid(), "{text:?}: {:?}", r.error());
    assert_eq!(kst::json::to_json(&r), Value::Array(expected), "{text:?}");
});
