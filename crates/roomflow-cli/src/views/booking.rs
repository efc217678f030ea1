use std::fmt;

use roomflow_engine::RoomSelection;
use roomflow_engine::format::{dates_summary, display_wire_date, format_money, guest_summary};
use roomflow_types::{BookingResponse, DateRange, GuestCount, PriceBreakdown, RoomResponse};
use serde::Serialize;

use super::quote::QuoteView;

pub struct BookingListView<'a> {
    bookings: &'a [BookingResponse],
}

impl<'a> BookingListView<'a> {
    pub fn new(bookings: &'a [BookingResponse]) -> Self {
        Self { bookings }
    }
}

impl fmt::Display for BookingListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.bookings.is_empty() {
            return writeln!(f, "No bookings.");
        }

        writeln!(
            f,
            "{:<6} {:<30} {:<28} {:>8}  STATUS",
            "ID", "STAY", "DATES", "TOTAL"
        )?;
        writeln!(f, "{}", "-".repeat(84))?;
        for booking in self.bookings {
            writeln!(
                f,
                "{:<6} {:<30} {:<28} {:>8}  {}",
                booking.booking_id,
                stay_name(booking),
                format!(
                    "{} - {}",
                    display_wire_date(booking.check_in),
                    display_wire_date(booking.check_out)
                ),
                booking
                    .total_price
                    .map(format_money)
                    .unwrap_or_else(|| "-".to_string()),
                booking.status.label()
            )?;
        }
        Ok(())
    }
}

fn stay_name(booking: &BookingResponse) -> String {
    match (&booking.hotel_name, &booking.room_type) {
        (Some(hotel), Some(room)) => format!("{} / {}", hotel, room),
        (Some(hotel), None) => hotel.clone(),
        (None, Some(room)) => room.clone(),
        (None, None) => "(unknown)".to_string(),
    }
}

pub struct BookingDetailView<'a> {
    booking: &'a BookingResponse,
}

impl<'a> BookingDetailView<'a> {
    pub fn new(booking: &'a BookingResponse) -> Self {
        Self { booking }
    }
}

impl fmt::Display for BookingDetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let b = self.booking;
        writeln!(f, "Booking #{} ({})", b.booking_id, b.status.label())?;
        writeln!(f, "  Stay:      {}", stay_name(b))?;
        if let Some(city) = b.hotel_city.as_deref().or(b.hotel_location.as_deref()) {
            writeln!(f, "  Location:  {}", city)?;
        }
        writeln!(f, "  Check-in:  {}", display_wire_date(b.check_in))?;
        writeln!(f, "  Check-out: {}", display_wire_date(b.check_out))?;
        writeln!(f, "  Guests:    {}", guest_summary(&b.guests()))?;
        if let Some(total) = b.total_price {
            writeln!(f, "  Total:     {}", format_money(total))?;
        }
        if b.status.is_cancellable() {
            writeln!(f, "  Cancel with: roomflow bookings cancel {}", b.booking_id)?;
        }
        Ok(())
    }
}

/// What `book` is about to submit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPlan {
    pub room_id: u64,
    pub room_name: Option<String>,
    pub hotel_name: Option<String>,
    pub dates: DateRange,
    pub guests: GuestCount,
    pub price: PriceBreakdown,
    pub submitted: Option<BookingResponse>,
}

impl BookingPlan {
    pub fn new(
        room: &RoomSelection,
        dates: DateRange,
        guests: GuestCount,
        price: PriceBreakdown,
    ) -> Self {
        Self {
            room_id: room.room_id,
            room_name: room.room_name.clone(),
            hotel_name: room.hotel_name.clone(),
            dates,
            guests,
            price,
            submitted: None,
        }
    }
}

impl fmt::Display for BookingPlan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match (&self.hotel_name, &self.room_name) {
            (Some(hotel), Some(room)) => format!("{} / {}", hotel, room),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => format!("Room {}", self.room_id),
        };
        writeln!(f, "{}", name)?;
        writeln!(f, "{}", dates_summary(&self.dates))?;
        writeln!(f, "{}", guest_summary(&self.guests))?;
        writeln!(f)?;
        write!(f, "{}", QuoteView::new(&self.price))?;
        match &self.submitted {
            Some(booking) => {
                writeln!(f)?;
                writeln!(
                    f,
                    "Booked: #{} ({})",
                    booking.booking_id,
                    booking.status.label()
                )
            }
            None => Ok(()),
        }
    }
}

pub struct RoomView<'a> {
    room: &'a RoomResponse,
}

impl<'a> RoomView<'a> {
    pub fn new(room: &'a RoomResponse) -> Self {
        Self { room }
    }
}

impl fmt::Display for RoomView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let r = self.room;
        writeln!(
            f,
            "Room {}: {}",
            r.room_id,
            r.name.as_deref().unwrap_or("(unnamed)")
        )?;
        if let Some(hotel) = &r.hotel_name {
            writeln!(f, "  Hotel:    {}", hotel)?;
        }
        writeln!(f, "  Price:    {} / night", format_money(r.price))?;
        if let Some(capacity) = r.capacity {
            writeln!(f, "  Capacity: {}", capacity)?;
        }
        if let Some(rating) = r.rating {
            match r.review_count {
                Some(reviews) => writeln!(f, "  Rating:   {:.1} ({} reviews)", rating, reviews)?,
                None => writeln!(f, "  Rating:   {:.1}", rating)?,
            }
        }
        if let Some(image) = r.primary_image() {
            writeln!(f, "  Image:    {}", image)?;
        }
        if let Some(description) = &r.description {
            writeln!(f)?;
            writeln!(f, "{}", description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking() -> BookingResponse {
        serde_json::from_value(serde_json::json!({
            "bookingId": 11,
            "roomType": "Deluxe Double",
            "hotelName": "Seaside Hotel",
            "checkIn": [2024, 1, 4],
            "checkOut": "not a date",
            "totalPrice": 330.0,
            "status": "CONFIRMED",
            "adultsCount": 2,
            "childrenCount": 1
        }))
        .unwrap()
    }

    #[test]
    fn test_detail_marks_unparseable_dates() {
        insta::assert_snapshot!(BookingDetailView::new(&booking()).to_string(), @r"
        Booking #11 (Confirmed)
          Stay:      Seaside Hotel / Deluxe Double
          Check-in:  Jan 4, 2024
          Check-out: N/A
          Guests:    2 adults | 1 child
          Total:     $330
          Cancel with: roomflow bookings cancel 11
        ");
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(BookingListView::new(&[]).to_string(), "No bookings.\n");
    }

    #[test]
    fn test_list_row() {
        let bookings = [booking()];
        let rendered = BookingListView::new(&bookings).to_string();
        let row = rendered.lines().nth(2).unwrap();
        assert!(row.starts_with("11     Seaside Hotel / Deluxe Double"));
        assert!(row.contains("Jan 4, 2024 - N/A"));
        assert!(row.ends_with("$330  Confirmed"));
    }
}
