//! Display strings shared by every front end.

use chrono::NaiveDateTime;
use roomflow_types::{CalendarDate, DateRange, Decimal, GuestCount};

use crate::calendar::MonthCursor;
use crate::validation::digits_only;

/// Shown for a wire date that could not be parsed.
pub const NOT_AVAILABLE: &str = "N/A";
pub const NOT_SELECTED: &str = "Not selected";
pub const SELECT_DATES: &str = "Please select dates";

/// `Jan 4, 2024`
pub fn display_date(date: CalendarDate) -> String {
    date.as_naive().format("%b %-d, %Y").to_string()
}

/// Like [`display_date`], with `N/A` for a date that failed to parse.
pub fn display_wire_date(date: Option<CalendarDate>) -> String {
    date.map(display_date)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// One end of an in-progress selection.
pub fn selection_label(date: Option<CalendarDate>) -> String {
    date.map(display_date)
        .unwrap_or_else(|| NOT_SELECTED.to_string())
}

/// `Jan 4, 2024 - Jan 7, 2024 (3 nights)`
pub fn dates_summary(range: &DateRange) -> String {
    match (range.check_in(), range.check_out(), range.nights()) {
        (Some(check_in), Some(check_out), Some(nights)) => format!(
            "{} - {} ({})",
            display_date(check_in),
            display_date(check_out),
            plural(nights.max(0) as u64, "night", "nights")
        ),
        _ => SELECT_DATES.to_string(),
    }
}

/// `Jan 2024`
pub fn month_title(cursor: MonthCursor) -> String {
    match cursor.day(1) {
        Some(first) => first.as_naive().format("%b %Y").to_string(),
        None => format!("{}-{:02}", cursor.year(), cursor.month()),
    }
}

/// `2 adults | 1 child | 1 infant`; zero children or infants are left out.
pub fn guest_summary(guests: &GuestCount) -> String {
    let mut parts = vec![plural(guests.adults().into(), "adult", "adults")];
    if guests.children() > 0 {
        parts.push(plural(guests.children().into(), "child", "children"));
    }
    if guests.infants() > 0 {
        parts.push(plural(guests.infants().into(), "infant", "infants"));
    }
    parts.join(" | ")
}

fn plural(n: u64, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

/// Badge text: hidden at zero, capped at `99+`.
pub fn badge_label(count: u64) -> Option<String> {
    match count {
        0 => None,
        1..=99 => Some(count.to_string()),
        _ => Some("99+".to_string()),
    }
}

/// `(xxx) xxx-xxxx` for ten-digit numbers; anything else is shown as given.
pub fn format_phone(phone: &str) -> String {
    let digits = digits_only(phone);
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        phone.to_string()
    }
}

/// Age of a notification relative to `now`.
pub fn relative_time(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    let days = elapsed.num_days();
    if days < 7 {
        return format!("{}d ago", days);
    }
    then.format("%b %-d, %Y").to_string()
}

/// Whole amounts print without decimals, others with two.
pub fn format_money(amount: Decimal) -> String {
    let amount = amount.normalize();
    if amount.scale() == 0 {
        format!("${}", amount)
    } else {
        format!("${:.2}", amount)
    }
}
