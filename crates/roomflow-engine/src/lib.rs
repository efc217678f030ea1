// Engine - pure booking-flow logic, no I/O and no clocks.
// Anything that needs "today" takes it as an argument so the whole layer
// stays deterministic under test.

pub mod badge;
pub mod calendar;
pub mod draft;
pub mod error;
pub mod format;
pub mod pricing;
pub mod validation;

pub use badge::{BadgeState, FetchTicket, PollPhase};
pub use calendar::{
    CalendarCell, CellKind, DateSelector, MonthCursor, MonthGrid, classify, month_grid, select_day,
};
pub use draft::{BookingDraft, DraftKey, FlowStep, RoomSelection};
pub use error::{Error, Result};
pub use pricing::{compute_price, nights_between, quote};
pub use validation::{FormErrors, ValidationResult};

use roomflow_types::{BookingRequest, DateRange, Decimal, GuestCount, PriceBreakdown};

// Façade API - the four booking screens in order.

/// Room selection: seed the draft with the chosen room.
pub fn start_booking(incoming: &BookingDraft, room: &RoomSelection) -> Result<BookingDraft> {
    draft::select_room(incoming, room)
}

/// Date selection: requires both check-in and check-out.
pub fn choose_dates(draft: &BookingDraft, range: &DateRange) -> Result<BookingDraft> {
    draft::select_dates(draft, range)
}

/// Guest selection.
pub fn choose_guests(draft: &BookingDraft, guests: GuestCount) -> Result<BookingDraft> {
    draft::select_guests(draft, guests)
}

/// Confirm & pay: derive the price and record the total.
pub fn confirm_and_price(
    draft: &BookingDraft,
    nightly_rate: Option<Decimal>,
    discount: Decimal,
) -> Result<(BookingDraft, PriceBreakdown)> {
    draft::confirm_price(draft, nightly_rate, discount)
}

/// Payment submission: the request the backend receives.
pub fn submit(draft: &BookingDraft) -> Result<BookingRequest> {
    draft::submission(draft)
}
