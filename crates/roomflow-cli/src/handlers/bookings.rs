use super::HandlerContext;
use crate::views::{BookingDetailView, BookingListView};
use anyhow::{Result, bail};
use roomflow_runtime::Roomflow;

pub async fn upcoming(ctx: &HandlerContext, client: &Roomflow) -> Result<()> {
    let bookings = client.bookings().upcoming().await?;
    ctx.render(&bookings, BookingListView::new(&bookings))
}

pub async fn past(ctx: &HandlerContext, client: &Roomflow) -> Result<()> {
    let bookings = client.bookings().past().await?;
    ctx.render(&bookings, BookingListView::new(&bookings))
}

pub async fn show(ctx: &HandlerContext, client: &Roomflow, booking_id: u64) -> Result<()> {
    let booking = client.bookings().get(booking_id).await?;
    ctx.render(&booking, BookingDetailView::new(&booking))
}

/// Refuses locally when the booking is already past the cancellable states.
pub async fn cancel(ctx: &HandlerContext, client: &Roomflow, booking_id: u64) -> Result<()> {
    let bookings = client.bookings();
    let booking = bookings.get(booking_id).await?;
    if !booking.status.is_cancellable() {
        bail!(
            "Booking #{} is {} and can no longer be cancelled",
            booking_id,
            booking.status.label().to_lowercase()
        );
    }
    let message = bookings.cancel(booking_id).await?;
    ctx.message(
        message
            .as_deref()
            .unwrap_or("Booking cancelled."),
    )
}
