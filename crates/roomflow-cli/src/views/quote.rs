use std::fmt;

use roomflow_engine::format::format_money;
use roomflow_engine::pricing::TAX_PERCENT;
use roomflow_types::{Decimal, PriceBreakdown};

pub struct QuoteView<'a> {
    breakdown: &'a PriceBreakdown,
}

impl<'a> QuoteView<'a> {
    pub fn new(breakdown: &'a PriceBreakdown) -> Self {
        Self { breakdown }
    }
}

impl fmt::Display for QuoteView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let b = self.breakdown;
        writeln!(f, "{:<14} {}", "Nightly rate", format_money(b.nightly_rate))?;
        writeln!(f, "{:<14} {}", "Nights", b.nights)?;
        writeln!(f, "{:<14} {}", "Subtotal", format_money(b.subtotal))?;
        if b.discount != Decimal::ZERO {
            writeln!(f, "{:<14} -{}", "Discount", format_money(b.discount))?;
        }
        writeln!(
            f,
            "{:<14} {}",
            format!("Taxes ({}%)", TAX_PERCENT),
            format_money(b.taxes)
        )?;
        writeln!(f, "{:<14} {}", "Total", format_money(b.total))
    }
}
