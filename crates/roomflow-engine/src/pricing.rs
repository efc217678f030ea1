use roomflow_types::{CalendarDate, DateRange, Decimal, PriceBreakdown};
use rust_decimal::RoundingStrategy;

use crate::{Error, Result};

/// Tax charged on the subtotal, in percent.
pub const TAX_PERCENT: u32 = 10;

/// Nights charged for a stay.
///
/// At least one. When either date is missing the stay is priced as a single
/// night rather than refusing to quote.
pub fn nights_between(check_in: Option<CalendarDate>, check_out: Option<CalendarDate>) -> u32 {
    match (check_in, check_out) {
        (Some(check_in), Some(check_out)) => {
            let days = check_in.days_until(check_out).max(1);
            u32::try_from(days).unwrap_or(u32::MAX)
        }
        _ => 1,
    }
}

/// Round to whole currency units, halves away from zero.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

pub fn compute_price(
    nightly_rate: Decimal,
    check_in: Option<CalendarDate>,
    check_out: Option<CalendarDate>,
    discount: Decimal,
) -> Result<PriceBreakdown> {
    if nightly_rate < Decimal::ZERO {
        return Err(Error::NegativeRate(nightly_rate));
    }

    let nights = nights_between(check_in, check_out);
    let subtotal = nightly_rate * Decimal::from(nights);
    let taxes = round_half_up(subtotal * Decimal::from(TAX_PERCENT) / Decimal::from(100));
    let total = subtotal - discount + taxes;

    Ok(PriceBreakdown {
        nightly_rate,
        nights,
        subtotal,
        discount,
        taxes,
        total,
    })
}

/// [`compute_price`] over a [`DateRange`].
pub fn quote(nightly_rate: Decimal, range: &DateRange, discount: Decimal) -> Result<PriceBreakdown> {
    compute_price(nightly_rate, range.check_in(), range.check_out(), discount)
}
