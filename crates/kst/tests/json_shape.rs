#![cfg(feature = "json")]
use serde_json::json;

use kst::KstReader;

#[test]
fn document_maps_to_nested_arrays() {
    let r = KstReader::from_text("a, [1, [2, 3]], \"x y\"; []; ,;");
    assert_eq!(
        kst::json::to_json(&r),
        json!([["a", ["1", ["2", "3"]], "x y"], [[""]], ["", ""]])
    );
}

#[test]
fn serialized_string_matches_the_json_view() -> Result<(), Box<dyn std::error::Error>> {
    let r = KstReader::from_text("1, [2]; 0x10;");
    let compact = kst::json::to_string(&r, false)?;
    assert_eq!(compact, r#"[["1",["2"]],["0x10"]]"#);
    let parsed: serde_json::Value = serde_json::from_str(&kst::json::to_string(&r, true)?)?;
    assert_eq!(parsed, kst::json::to_json(&r));
    Ok(())
}

#[test]
fn invalid_reader_is_an_empty_document() {
    let r = KstReader::from_text("[");
    assert_eq!(kst::json::to_json(&r), json!([]));
}
