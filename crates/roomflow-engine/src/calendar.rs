//! Date-range selection and calendar month layout.
//!
//! Selection is a pure transition over [`DateRange`]:
//!
//! - no check-in yet, or a complete range already chosen: the tapped day
//!   starts a fresh range
//! - check-in only: a day strictly after it becomes check-out, any other
//!   day restarts the range there
//!
//! Month navigation only moves the [`MonthCursor`]; it never touches the
//! selection.

use roomflow_types::{CalendarDate, DateRange};

/// Apply one tap to the current selection.
pub fn select_day(day: CalendarDate, current: &DateRange) -> DateRange {
    match (current.check_in(), current.check_out()) {
        (Some(check_in), None) if day > check_in => {
            DateRange::new(check_in, day).unwrap_or_else(|_| DateRange::starting(day))
        }
        _ => DateRange::starting(day),
    }
}

/// How a single day renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Before today; not selectable
    Past,
    CheckIn,
    CheckOut,
    /// Strictly between check-in and check-out
    InRange,
    Normal,
}

impl CellKind {
    pub fn is_selectable(&self) -> bool {
        !matches!(self, CellKind::Past)
    }
}

/// Classify `day` against the selection. Past days win over any mark.
pub fn classify(day: CalendarDate, selection: &DateRange, today: CalendarDate) -> CellKind {
    if day < today {
        return CellKind::Past;
    }
    if selection.check_in() == Some(day) {
        return CellKind::CheckIn;
    }
    if selection.check_out() == Some(day) {
        return CellKind::CheckOut;
    }
    if let (Some(check_in), Some(check_out)) = (selection.check_in(), selection.check_out())
        && day > check_in
        && day < check_out
    {
        return CellKind::InRange;
    }
    CellKind::Normal
}

/// A `(year, month)` position in the calendar, month 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn containing(date: CalendarDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Day before the 1st of the next month.
    pub fn days_in_month(&self) -> u32 {
        self.next()
            .day(1)
            .and_then(|first| first.add_days(-1))
            .map(|last| last.day())
            .unwrap_or(0)
    }

    /// The given day of this month, if it exists.
    pub fn day(&self, day_of_month: u32) -> Option<CalendarDate> {
        CalendarDate::from_ymd(self.year, self.month, day_of_month)
    }

    /// Empty cells before the 1st in a Sunday-first week.
    pub fn leading_blanks(&self) -> u32 {
        self.day(1).map(|d| d.weekday_from_sunday()).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: CalendarDate,
    pub kind: CellKind,
}

/// One rendered month: blanks for the days before the 1st, then every day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub cursor: MonthCursor,
    pub leading_blanks: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    /// Cells split into Sunday-first weeks; `None` pads the first week.
    pub fn weeks(&self) -> Vec<Vec<Option<CalendarCell>>> {
        let padded: Vec<Option<CalendarCell>> = (0..self.leading_blanks)
            .map(|_| None)
            .chain(self.cells.iter().copied().map(Some))
            .collect();
        padded.chunks(7).map(|week| week.to_vec()).collect()
    }
}

pub fn month_grid(cursor: MonthCursor, selection: &DateRange, today: CalendarDate) -> MonthGrid {
    let cells = (1..=cursor.days_in_month())
        .filter_map(|day| cursor.day(day))
        .map(|date| CalendarCell {
            date,
            kind: classify(date, selection, today),
        })
        .collect();

    MonthGrid {
        cursor,
        leading_blanks: cursor.leading_blanks(),
        cells,
    }
}

/// Interactive date picker state: visible month, selection and "today".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSelector {
    cursor: MonthCursor,
    selection: DateRange,
    today: CalendarDate,
}

impl DateSelector {
    pub fn new(today: CalendarDate) -> Self {
        Self {
            cursor: MonthCursor::containing(today),
            selection: DateRange::empty(),
            today,
        }
    }

    /// Resume from an existing selection; the cursor opens on its check-in month.
    pub fn with_selection(today: CalendarDate, selection: DateRange) -> Self {
        let anchor = selection.check_in().unwrap_or(today);
        Self {
            cursor: MonthCursor::containing(anchor),
            selection,
            today,
        }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn selection(&self) -> &DateRange {
        &self.selection
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.next();
    }

    pub fn previous_month(&mut self) {
        self.cursor = self.cursor.previous();
    }

    /// Tap a day of the visible month. Returns `false` when the tap is
    /// ignored (no such day, or a past day).
    pub fn tap(&mut self, day_of_month: u32) -> bool {
        match self.cursor.day(day_of_month) {
            Some(date) => self.tap_date(date),
            None => false,
        }
    }

    pub fn tap_date(&mut self, date: CalendarDate) -> bool {
        if date < self.today {
            return false;
        }
        self.selection = select_day(date, &self.selection);
        true
    }

    pub fn clear(&mut self) {
        self.selection = DateRange::empty();
    }

    pub fn grid(&self) -> MonthGrid {
        month_grid(self.cursor, &self.selection, self.today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_first_tap_sets_check_in() {
        let next = select_day(date(2024, 1, 10), &DateRange::empty());
        assert_eq!(next, DateRange::starting(date(2024, 1, 10)));
    }

    #[test]
    fn test_later_tap_sets_check_out() {
        let start = DateRange::starting(date(2024, 1, 10));
        let next = select_day(date(2024, 1, 12), &start);
        assert_eq!(next.check_in(), Some(date(2024, 1, 10)));
        assert_eq!(next.check_out(), Some(date(2024, 1, 12)));
    }

    #[test]
    fn test_same_or_earlier_tap_restarts() {
        let start = DateRange::starting(date(2024, 1, 10));
        assert_eq!(
            select_day(date(2024, 1, 10), &start),
            DateRange::starting(date(2024, 1, 10))
        );
        assert_eq!(
            select_day(date(2024, 1, 2), &start),
            DateRange::starting(date(2024, 1, 2))
        );
    }

    #[test]
    fn test_tap_after_complete_range_restarts() {
        let full = DateRange::new(date(2024, 1, 10), date(2024, 1, 12)).unwrap();
        assert_eq!(
            select_day(date(2024, 1, 20), &full),
            DateRange::starting(date(2024, 1, 20))
        );
    }

    #[test]
    fn test_classify_marks() {
        let today = date(2024, 1, 5);
        let range = DateRange::new(date(2024, 1, 10), date(2024, 1, 13)).unwrap();

        assert_eq!(classify(date(2024, 1, 4), &range, today), CellKind::Past);
        assert_eq!(classify(date(2024, 1, 5), &range, today), CellKind::Normal);
        assert_eq!(classify(date(2024, 1, 10), &range, today), CellKind::CheckIn);
        assert_eq!(classify(date(2024, 1, 11), &range, today), CellKind::InRange);
        assert_eq!(classify(date(2024, 1, 12), &range, today), CellKind::InRange);
        assert_eq!(classify(date(2024, 1, 13), &range, today), CellKind::CheckOut);
        assert_eq!(classify(date(2024, 1, 14), &range, today), CellKind::Normal);
    }

    #[test]
    fn test_cursor_wraps_years() {
        let dec = MonthCursor::new(2024, 12).unwrap();
        assert_eq!(dec.next(), MonthCursor::new(2025, 1).unwrap());
        assert_eq!(dec.next().previous(), dec);
        assert!(MonthCursor::new(2024, 13).is_none());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(MonthCursor::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthCursor::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthCursor::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthCursor::new(2000, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthCursor::new(2024, 4).unwrap().days_in_month(), 30);
        assert_eq!(MonthCursor::new(2024, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_grid_layout() {
        // 2024-09-01 is a Sunday, 2024-01-01 a Monday
        let sept = month_grid(
            MonthCursor::new(2024, 9).unwrap(),
            &DateRange::empty(),
            date(2024, 1, 1),
        );
        assert_eq!(sept.leading_blanks, 0);
        assert_eq!(sept.cells.len(), 30);

        let jan = month_grid(
            MonthCursor::new(2024, 1).unwrap(),
            &DateRange::empty(),
            date(2024, 1, 1),
        );
        assert_eq!(jan.leading_blanks, 1);
        let weeks = jan.weeks();
        assert_eq!(weeks.len(), 5);
        assert!(weeks[0][0].is_none());
        assert_eq!(weeks[0][1].unwrap().date, date(2024, 1, 1));
    }

    #[test]
    fn test_selector_ignores_past_days() {
        let mut selector = DateSelector::new(date(2024, 1, 15));
        assert!(!selector.tap(14));
        assert!(selector.selection().is_empty());
        assert!(!selector.tap(32));

        assert!(selector.tap(20));
        assert!(selector.tap(22));
        assert_eq!(selector.selection().nights(), Some(2));
    }

    #[test]
    fn test_navigation_keeps_selection() {
        let mut selector = DateSelector::new(date(2024, 1, 15));
        selector.tap(30);
        selector.next_month();
        assert_eq!(selector.cursor(), MonthCursor::new(2024, 2).unwrap());
        assert!(selector.tap(2));
        assert_eq!(
            selector.selection().check_out(),
            Some(date(2024, 2, 2))
        );
        selector.previous_month();
        selector.previous_month();
        assert_eq!(selector.cursor(), MonthCursor::new(2023, 12).unwrap());
        assert!(selector.selection().is_complete());
    }

    #[test]
    fn test_selector_opens_on_check_in_month() {
        let range = DateRange::new(date(2024, 3, 30), date(2024, 4, 2)).unwrap();
        let selector = DateSelector::with_selection(date(2024, 1, 1), range);
        assert_eq!(selector.cursor(), MonthCursor::new(2024, 3).unwrap());
    }
}
