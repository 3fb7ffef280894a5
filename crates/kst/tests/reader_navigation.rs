use kst::KstReader;

#[test]
fn counts_and_seeks() {
    let mut r = KstReader::from_text("1, 2; 3; 4, 5, 6, 7; 8; ; ,,; ");
    assert!(r.is_valid());

    assert_eq!(r.record_count(), 6);
    let counts: Vec<_> = (0..6).map(|i| r.value_count_at(i).unwrap()).collect();
    assert_eq!(counts, vec![2, 1, 4, 1, 1, 3]);
    assert_eq!(r.value_count_at(6), None);

    assert!(!r.is_end_of_record_at(0, 1));
    assert!(r.is_end_of_record_at(1, 1));
    assert!(!r.is_end_of_file_at(5));
    assert!(r.is_end_of_file_at(6));

    assert_eq!((r.current_record(), r.current_value()), (0, 0));

    assert!(r.next_value());
    assert_eq!((r.current_record(), r.current_value()), (0, 1));
    assert!(!r.is_end_of_record());
    assert!(r.next_value());
    assert_eq!((r.current_record(), r.current_value()), (0, 2));
    assert!(r.is_end_of_record());
    assert!(!r.next_value());

    assert!(r.next_record());
    assert_eq!((r.current_record(), r.current_value()), (1, 0));

    assert!(r.seek(5, 1));
    assert_eq!((r.current_record(), r.current_value()), (5, 1));
    assert!(!r.is_end_of_record());
    assert!(!r.is_end_of_file());

    assert!(!r.seek(5, 5));
    assert_eq!((r.current_record(), r.current_value()), (5, 1));
    assert!(!r.seek(6, 0));
    assert_eq!((r.current_record(), r.current_value()), (5, 1));

    assert!(r.next_record());
    assert_eq!((r.current_record(), r.current_value()), (6, 0));
    assert!(r.is_end_of_file());
    assert!(!r.next_record());
    assert_eq!(r.value_count(), None);
}

#[test]
fn reads_follow_the_cursor() -> Result<(), Box<dyn std::error::Error>> {
    let mut r = KstReader::from_text("a, b; c;");
    assert_eq!(r.read_string()?, "a");
    r.next_value();
    assert_eq!(r.read_string()?, "b");
    r.next_value();
    assert!(matches!(
        r.read_string(),
        Err(kst::Error::OutOfRange { record: 0, value: 2 })
    ));
    r.next_record();
    assert_eq!(r.read_string()?, "c");
    Ok(())
}

#[test]
fn predicates_past_the_end_report_empty() {
    let r = KstReader::from_text("1;");
    assert!(r.is_value_empty_at(3, 0));
    assert!(r.is_array_empty_at(0, 9));
}

#[test]
fn empty_values_and_arrays() {
    let r = KstReader::from_text(", 1, [], [1];");
    assert!(r.is_valid());

    let value_empty: Vec<_> = (0..4).map(|i| r.is_value_empty_at(i, 0)).collect();
    assert_eq!(value_empty, vec![true, false, false, false]);

    let array_empty: Vec<_> = (0..4).map(|i| r.is_array_empty_at(i, 0)).collect();
    assert_eq!(array_empty, vec![true, false, true, false]);

    assert!(r.is_value_empty());
    assert!(r.is_array_empty());
}
