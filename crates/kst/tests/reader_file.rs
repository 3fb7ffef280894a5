use std::io::Write;

use kst::{Error, KstReader};

const DOCUMENT: &str = "# sample document\n\
[1], [2, 3, 4], [5, [6, 7]];\n\
2147483647, 2147483648;\n\
55°12′9.21″;\n\
[12345678987654321, 14725836963852741];\n\
[3.1416, 55d12'9.21\"];\n";

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= b.abs() * 1e-12
}

fn write_document(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn reads_values_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_document(DOCUMENT);
    let mut r = KstReader::from_path(file.path());
    assert!(r.is_valid(), "{:?}", r.error());

    assert_eq!(r.record_count(), 5);
    let counts: Vec<_> = (0..5).map(|i| r.value_count_at(i).unwrap()).collect();
    assert_eq!(counts, vec![3, 2, 1, 1, 1]);

    assert_eq!(r.read_int()?, 1);
    assert_eq!(r.read_int_array()?, vec![1]);
    assert!(r.next_value());
    assert_eq!(r.read_int_array()?, vec![2, 3, 4]);
    assert!(r.next_value());
    assert!(r.read_int_array().is_err());
    assert!(r.next_record());

    assert_eq!(r.read_int()?, 2147483647);
    assert!(r.next_value());
    assert!(matches!(r.read_int(), Err(Error::NumberRange(2147483648))));
    assert!(r.next_record());

    assert!(close(r.read_real()?, 55.202558333333333));
    assert!(r.next_record());

    assert_eq!(
        r.read_long_array()?,
        vec![12345678987654321, 14725836963852741]
    );
    assert!(r.next_record());

    let reals = r.read_real_array()?;
    assert_eq!(reals.len(), 2);
    assert_eq!(reals[0], 3.1416);
    assert!(close(reals[1], 55.202558333333333));
    assert_eq!(r.read_int_array()?, vec![3, 55]);
    assert!(r.next_record());
    assert!(r.is_end_of_file());
    Ok(())
}

#[test]
fn crlf_line_endings_are_normalized() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_document("\"a\\\r\nb\", 1; # note\r\n2;\r\n");
    let r = KstReader::from_path(file.path());
    assert!(r.is_valid(), "{:?}", r.error());
    assert_eq!(r.record_count(), 2);
    assert_eq!(r.read_string()?, "ab");
    Ok(())
}

#[test]
fn invalid_utf8_is_replaced_not_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(b"1; # caf\xe9\n2;\n\"x\xffy\";\n")?;
    file.flush()?;

    let mut r = KstReader::from_path(file.path());
    assert!(r.is_valid(), "{:?}", r.error());
    assert_eq!(r.record_count(), 3);
    assert_eq!(r.read_int()?, 1);
    assert!(r.next_record());
    assert_eq!(r.read_int()?, 2);
    assert!(r.next_record());
    assert_eq!(r.read_string()?, "x\u{fffd}y");
    Ok(())
}

#[test]
fn normalize_text_borrows_clean_input() {
    use std::borrow::Cow;
    assert!(matches!(kst::reader::normalize_text(b"1;\n"), Cow::Borrowed("1;\n")));
    assert_eq!(kst::reader::normalize_text(b"1;\r\n2;\r\n"), "1;\n2;\n");
    assert_eq!(kst::reader::normalize_text(b"a\x80;"), "a\u{fffd};");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let r = KstReader::from_path(dir.path().join("absent.kst"));
    assert!(!r.is_valid());
    assert!(matches!(r.error(), Some(Error::Io(_))));
}

#[test]
fn read_from_reader_matches_from_text() -> Result<(), Box<dyn std::error::Error>> {
    let options = kst::Options::default();
    let r = kst::read_from_reader(DOCUMENT.as_bytes(), &options)?;
    let expected = KstReader::from_text(DOCUMENT);
    assert_eq!(r.records(), expected.records());
    Ok(())
}
