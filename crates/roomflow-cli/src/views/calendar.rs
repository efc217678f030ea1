use std::fmt;

use owo_colors::OwoColorize;
use roomflow_engine::format::{dates_summary, month_title, selection_label};
use roomflow_engine::{CalendarCell, CellKind, MonthGrid};
use roomflow_types::{CalendarDate, DateRange};
use serde::Serialize;

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarViewModel {
    pub title: String,
    pub leading_blanks: u32,
    pub days: Vec<DayViewModel>,
    pub check_in: Option<CalendarDate>,
    pub check_out: Option<CalendarDate>,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct DayViewModel {
    pub date: CalendarDate,
    pub kind: &'static str,
}

impl CalendarViewModel {
    pub fn new(grid: &MonthGrid, selection: &DateRange) -> Self {
        Self {
            title: month_title(grid.cursor),
            leading_blanks: grid.leading_blanks,
            days: grid
                .cells
                .iter()
                .map(|cell| DayViewModel {
                    date: cell.date,
                    kind: kind_name(cell.kind),
                })
                .collect(),
            check_in: selection.check_in(),
            check_out: selection.check_out(),
            summary: dates_summary(selection),
        }
    }
}

pub fn kind_name(kind: CellKind) -> &'static str {
    match kind {
        CellKind::Past => "past",
        CellKind::CheckIn => "check_in",
        CellKind::CheckOut => "check_out",
        CellKind::InRange => "in_range",
        CellKind::Normal => "normal",
    }
}

/// Sunday-first month grid.
///
/// Past days are parenthesised and the stay is bracketed from check-in to
/// check-out, so the selection reads without color.
pub struct CalendarView<'a> {
    grid: &'a MonthGrid,
    selection: &'a DateRange,
    color: bool,
}

impl<'a> CalendarView<'a> {
    pub fn new(grid: &'a MonthGrid, selection: &'a DateRange, color: bool) -> Self {
        Self {
            grid,
            selection,
            color,
        }
    }

    fn cell(&self, cell: &CalendarCell) -> String {
        let day = cell.date.day();
        let text = match cell.kind {
            CellKind::Past => format!("({:>2})", day),
            CellKind::CheckIn => format!("[{:>2} ", day),
            CellKind::CheckOut => format!(" {:>2}]", day),
            CellKind::InRange | CellKind::Normal => format!(" {:>2} ", day),
        };
        if !self.color {
            return text;
        }
        match cell.kind {
            CellKind::Past => text.dimmed().to_string(),
            CellKind::CheckIn | CellKind::CheckOut => text.black().on_green().to_string(),
            CellKind::InRange => text.green().to_string(),
            CellKind::Normal => text,
        }
    }
}

impl fmt::Display for CalendarView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let title = month_title(self.grid.cursor);
        if self.color {
            writeln!(f, "{}", title.bold())?;
        } else {
            writeln!(f, "{}", title)?;
        }

        let header: String = WEEKDAYS.iter().map(|d| format!(" {} ", d)).collect();
        writeln!(f, "{}", header.trim_end())?;

        for week in self.grid.weeks() {
            let line: String = week
                .iter()
                .map(|cell| match cell {
                    Some(cell) => self.cell(cell),
                    None => "    ".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }

        writeln!(f)?;
        writeln!(f, "Check-in:  {}", selection_label(self.selection.check_in()))?;
        writeln!(f, "Check-out: {}", selection_label(self.selection.check_out()))?;
        writeln!(f, "{}", dates_summary(self.selection))
    }
}
