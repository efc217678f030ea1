use super::HandlerContext;
use crate::views::BookingPlan;
use anyhow::{Result, bail};
use roomflow_engine::{BookingDraft, DateSelector, RoomSelection};
use roomflow_engine::format::display_date;
use roomflow_runtime::Roomflow;
use roomflow_types::{CalendarDate, Decimal, GuestCount};

pub struct BookArgs {
    pub room_id: u64,
    pub check_in: CalendarDate,
    pub check_out: CalendarDate,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
    /// Skips the room lookup when given
    pub rate: Option<Decimal>,
    pub today: CalendarDate,
    pub dry_run: bool,
}

/// Room, dates, guests, then confirm & pay; each step extends the draft the
/// previous one produced.
pub async fn handle(ctx: &HandlerContext, client: &Roomflow, args: BookArgs) -> Result<()> {
    let room = match args.rate {
        Some(rate) => RoomSelection::new(args.room_id, rate),
        None => {
            let room = client.rooms().get(args.room_id).await?;
            RoomSelection::from(&room)
        }
    };
    let draft = roomflow_engine::start_booking(&BookingDraft::new(), &room)?;

    // Pick the dates the way the calendar does: past days are not selectable.
    let mut selector = DateSelector::new(args.today);
    if !selector.tap_date(args.check_in) {
        bail!("Check-in {} is in the past", display_date(args.check_in));
    }
    selector.tap_date(args.check_out);
    let range = *selector.selection();
    if !range.is_complete() {
        bail!(
            "Check-out {} must be after check-in {}",
            display_date(args.check_out),
            display_date(args.check_in)
        );
    }
    let draft = roomflow_engine::choose_dates(&draft, &range)?;

    let guests = GuestCount::new(args.adults, args.children, args.infants)?;
    let draft = roomflow_engine::choose_guests(&draft, guests)?;

    let (draft, price) = roomflow_engine::confirm_and_price(&draft, None, Decimal::ZERO)?;
    tracing::debug!("Draft ready: {:?}", draft);

    let mut plan = BookingPlan::new(&room, range, guests, price);
    if !args.dry_run {
        plan.submitted = Some(client.bookings().submit_draft(&draft).await?);
    }
    ctx.render(&plan, &plan)
}
