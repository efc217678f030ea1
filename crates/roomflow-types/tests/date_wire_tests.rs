use roomflow_types::*;

fn date(y: i32, m: u32, d: u32) -> CalendarDate {
    CalendarDate::from_ymd(y, m, d).unwrap()
}

fn round_trip(range: DateRange) -> DateRange {
    let (check_in, check_out) = range.to_wire().unwrap();
    DateRange::from_wire(&check_in, &check_out).unwrap()
}

#[test]
fn test_round_trip_across_dst_start() {
    // US and EU clocks spring forward inside these ranges
    for range in [
        DateRange::new(date(2024, 3, 9), date(2024, 3, 11)).unwrap(),
        DateRange::new(date(2024, 3, 30), date(2024, 4, 1)).unwrap(),
    ] {
        let back = round_trip(range);
        assert_eq!(back, range);
        assert_eq!(back.nights(), range.nights());
    }
}

#[test]
fn test_round_trip_across_dst_end() {
    let range = DateRange::new(date(2024, 11, 2), date(2024, 11, 4)).unwrap();
    let back = round_trip(range);
    assert_eq!(back, range);
    assert_eq!(back.nights(), Some(2));
}

#[test]
fn test_round_trip_across_year_end() {
    let range = DateRange::new(date(2024, 12, 30), date(2025, 1, 2)).unwrap();
    assert_eq!(
        range.to_wire(),
        Some(("2024-12-30".to_string(), "2025-01-02".to_string()))
    );
    let back = round_trip(range);
    assert_eq!(back, range);
    assert_eq!(back.nights(), Some(3));
}

#[test]
fn test_round_trip_leap_day() {
    let range = DateRange::new(date(2024, 2, 28), date(2024, 3, 1)).unwrap();
    assert_eq!(round_trip(range).nights(), Some(2));
}

#[test]
fn test_all_wire_shapes_agree() {
    let expected = date(2025, 1, 2);
    let shapes = [
        serde_json::json!("2025-01-02"),
        serde_json::json!("2025-01-02T00:00:00"),
        serde_json::json!("2025-01-02T23:59:59+07:00"),
        serde_json::json!([2025, 1, 2]),
        serde_json::json!([2025, 1, 2, 15, 0]),
    ];
    for shape in shapes {
        let parsed: CalendarDate = serde_json::from_value(shape.clone()).unwrap();
        assert_eq!(parsed, expected, "shape {}", shape);
    }
}

#[test]
fn test_serializes_as_plain_date() {
    let json = serde_json::to_string(&date(2024, 1, 4)).unwrap();
    assert_eq!(json, "\"2024-01-04\"");
}
