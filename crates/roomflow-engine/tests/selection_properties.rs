use roomflow_engine::{CellKind, DateSelector, classify, select_day};
use roomflow_types::{CalendarDate, DateRange};

fn date(y: i32, m: u32, d: u32) -> CalendarDate {
    CalendarDate::from_ymd(y, m, d).unwrap()
}

/// Every day of 2023 and 2024 (a leap year), plus the turn of the year.
fn all_days() -> impl Iterator<Item = CalendarDate> {
    let start = date(2023, 1, 1);
    (0..=731).filter_map(move |offset| start.add_days(offset))
}

#[test]
fn test_empty_selection_starts_range_at_any_day() {
    for day in all_days() {
        let next = select_day(day, &DateRange::empty());
        assert_eq!(next.check_in(), Some(day));
        assert_eq!(next.check_out(), None);
    }
}

#[test]
fn test_later_day_completes_range() {
    let check_in = date(2023, 12, 30);
    let start = DateRange::starting(check_in);
    for day in all_days().filter(|d| *d > check_in) {
        let next = select_day(day, &start);
        assert_eq!(next.check_in(), Some(check_in));
        assert_eq!(next.check_out(), Some(day));
        assert!(next.nights().unwrap() >= 1);
    }
}

#[test]
fn test_same_or_earlier_day_restarts() {
    let check_in = date(2024, 6, 15);
    let start = DateRange::starting(check_in);
    for day in all_days().filter(|d| *d <= check_in) {
        assert_eq!(select_day(day, &start), DateRange::starting(day));
    }
}

#[test]
fn test_complete_range_always_restarts() {
    let full = DateRange::new(date(2024, 2, 27), date(2024, 3, 2)).unwrap();
    for day in all_days() {
        assert_eq!(select_day(day, &full), DateRange::starting(day));
    }
}

#[test]
fn test_past_days_are_never_marked() {
    let today = date(2024, 1, 10);
    let range = DateRange::new(date(2024, 1, 5), date(2024, 1, 15)).unwrap();
    for day in all_days() {
        let kind = classify(day, &range, today);
        if day < today {
            assert_eq!(kind, CellKind::Past, "{}", day);
            assert!(!kind.is_selectable());
        } else {
            assert_ne!(kind, CellKind::Past, "{}", day);
        }
    }
    assert_eq!(classify(date(2024, 1, 12), &range, today), CellKind::InRange);
}

#[test]
fn test_selector_walk_across_year_end() {
    let mut selector = DateSelector::new(date(2024, 12, 20));
    assert!(selector.tap(30));
    selector.next_month();
    assert!(selector.tap(2));

    let selection = *selector.selection();
    assert_eq!(
        selection.to_wire(),
        Some(("2024-12-30".to_string(), "2025-01-02".to_string()))
    );
    assert_eq!(selection.nights(), Some(3));

    let grid = selector.grid();
    let marked: Vec<_> = grid
        .cells
        .iter()
        .filter(|c| c.kind != CellKind::Normal)
        .map(|c| (c.date.day(), c.kind))
        .collect();
    assert_eq!(
        marked,
        vec![(1, CellKind::InRange), (2, CellKind::CheckOut)]
    );
}
