use super::HandlerContext;
use crate::views::QuoteView;
use anyhow::Result;
use roomflow_types::{CalendarDate, Decimal};

/// A missing or inverted date pair prices as one night.
pub fn handle(
    ctx: &HandlerContext,
    rate: Decimal,
    check_in: Option<CalendarDate>,
    check_out: Option<CalendarDate>,
    discount: Decimal,
) -> Result<()> {
    let breakdown = roomflow_engine::compute_price(rate, check_in, check_out, discount)?;
    ctx.render(&breakdown, QuoteView::new(&breakdown))
}
