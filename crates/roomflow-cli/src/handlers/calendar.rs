use super::HandlerContext;
use crate::views::{CalendarView, CalendarViewModel};
use anyhow::Result;
use roomflow_engine::{DateSelector, MonthCursor, month_grid};
use roomflow_types::{CalendarDate, DateRange};

pub fn handle(
    ctx: &HandlerContext,
    month: Option<MonthCursor>,
    today: CalendarDate,
    check_in: Option<CalendarDate>,
    check_out: Option<CalendarDate>,
) -> Result<()> {
    let selection = match (check_in, check_out) {
        (Some(check_in), Some(check_out)) => DateRange::new(check_in, check_out)?,
        (Some(check_in), None) => DateRange::starting(check_in),
        _ => DateRange::empty(),
    };
    let selector = DateSelector::with_selection(today, selection);
    let cursor = month.unwrap_or_else(|| selector.cursor());
    let grid = month_grid(cursor, selector.selection(), selector.today());

    ctx.render(
        &CalendarViewModel::new(&grid, selector.selection()),
        CalendarView::new(&grid, selector.selection(), ctx.color),
    )
}
