//! Booking draft: the parameter bag threaded through the booking screens.
//!
//! Each step receives the incoming bag, writes only the keys it owns, and
//! hands every other entry on untouched. Keys this module does not know
//! about (extra navigation params) ride along as well, so the bag only
//! ever grows until it is turned into a [`BookingRequest`].

use roomflow_types::{
    BookingRequest, CalendarDate, DateRange, Decimal, GuestCount, PriceBreakdown, RoomResponse,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::pricing::{self, round_half_up};
use crate::{Error, Result};

/// Screens of the booking flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowStep {
    SelectRoom,
    SelectDate,
    SelectGuests,
    ConfirmPay,
}

impl FlowStep {
    pub fn name(&self) -> &'static str {
        match self {
            FlowStep::SelectRoom => "select-room",
            FlowStep::SelectDate => "select-date",
            FlowStep::SelectGuests => "select-guests",
            FlowStep::ConfirmPay => "confirm-pay",
        }
    }

    pub fn owned_keys(&self) -> &'static [DraftKey] {
        match self {
            FlowStep::SelectRoom => &[
                DraftKey::RoomId,
                DraftKey::RoomName,
                DraftKey::RoomPrice,
                DraftKey::HotelName,
                DraftKey::RoomImage,
                DraftKey::Rating,
                DraftKey::ReviewCount,
            ],
            FlowStep::SelectDate => &[DraftKey::CheckIn, DraftKey::CheckOut],
            FlowStep::SelectGuests => &[DraftKey::Adults, DraftKey::Children, DraftKey::Infants],
            FlowStep::ConfirmPay => &[DraftKey::TotalPrice],
        }
    }

    pub fn owns(&self, key: DraftKey) -> bool {
        self.owned_keys().contains(&key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DraftKey {
    RoomId,
    RoomName,
    RoomPrice,
    HotelName,
    RoomImage,
    Rating,
    ReviewCount,
    CheckIn,
    CheckOut,
    Adults,
    Children,
    Infants,
    TotalPrice,
}

impl DraftKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftKey::RoomId => "roomId",
            DraftKey::RoomName => "roomName",
            DraftKey::RoomPrice => "roomPrice",
            DraftKey::HotelName => "hotelName",
            DraftKey::RoomImage => "roomImage",
            DraftKey::Rating => "rating",
            DraftKey::ReviewCount => "reviewCount",
            DraftKey::CheckIn => "checkIn",
            DraftKey::CheckOut => "checkOut",
            DraftKey::Adults => "adults",
            DraftKey::Children => "children",
            DraftKey::Infants => "infants",
            DraftKey::TotalPrice => "totalPrice",
        }
    }
}

impl fmt::Display for DraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingDraft {
    params: BTreeMap<String, String>,
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary incoming bag (e.g. deep-link params).
    pub fn from_params<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, key: DraftKey) -> Option<&str> {
        self.get_raw(key.as_str())
    }

    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// True when every entry of `earlier` is still present in `self`.
    pub fn extends(&self, earlier: &BookingDraft) -> bool {
        earlier.params.keys().all(|k| self.params.contains_key(k))
    }

    /// Apply one step's writes on top of the incoming bag.
    pub fn advance(
        &self,
        step: FlowStep,
        updates: impl IntoIterator<Item = (DraftKey, String)>,
    ) -> Result<Self> {
        let mut next = self.clone();
        for (key, value) in updates {
            if !step.owns(key) {
                return Err(Error::KeyNotOwned {
                    step,
                    key: key.as_str(),
                });
            }
            next.params.insert(key.as_str().to_string(), value);
        }
        Ok(next)
    }

    pub fn room_id(&self) -> Result<Option<u64>> {
        self.parse(DraftKey::RoomId)
    }

    pub fn room_price(&self) -> Result<Option<Decimal>> {
        self.parse(DraftKey::RoomPrice)
    }

    pub fn total_price(&self) -> Result<Option<Decimal>> {
        self.parse(DraftKey::TotalPrice)
    }

    /// The selected dates; both must be present and ordered.
    pub fn date_range(&self) -> Result<DateRange> {
        let check_in = self.date(DraftKey::CheckIn)?;
        let check_out = self.date(DraftKey::CheckOut)?;
        match (check_in, check_out) {
            (Some(check_in), Some(check_out)) => Ok(DateRange::new(check_in, check_out)?),
            _ => Err(Error::MissingDates),
        }
    }

    /// Whatever dates are present, without requiring a full range.
    pub fn partial_dates(&self) -> (Option<CalendarDate>, Option<CalendarDate>) {
        (
            self.date(DraftKey::CheckIn).ok().flatten(),
            self.date(DraftKey::CheckOut).ok().flatten(),
        )
    }

    /// Guest counts; absent, unparseable or zero adults read as 2, other
    /// counts as 0.
    pub fn guests(&self) -> GuestCount {
        let count = |key: DraftKey| {
            self.get(key)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(0)
        };
        let adults = match count(DraftKey::Adults) {
            0 => GuestCount::default().adults(),
            n => n,
        };
        GuestCount::new(adults, count(DraftKey::Children), count(DraftKey::Infants))
            .unwrap_or_default()
    }

    fn date(&self, key: DraftKey) -> Result<Option<CalendarDate>> {
        self.get(key)
            .map(|value| {
                CalendarDate::parse_wire(value).map_err(|_| Error::InvalidParam {
                    key: key.as_str(),
                    value: value.to_string(),
                })
            })
            .transpose()
    }

    fn parse<T: std::str::FromStr>(&self, key: DraftKey) -> Result<Option<T>> {
        self.get(key)
            .map(|value| {
                value.trim().parse::<T>().map_err(|_| Error::InvalidParam {
                    key: key.as_str(),
                    value: value.to_string(),
                })
            })
            .transpose()
    }
}

/// The room a booking starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSelection {
    pub room_id: u64,
    pub room_name: Option<String>,
    pub nightly_rate: Decimal,
    pub hotel_name: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
}

impl RoomSelection {
    pub fn new(room_id: u64, nightly_rate: Decimal) -> Self {
        Self {
            room_id,
            room_name: None,
            nightly_rate,
            hotel_name: None,
            image: None,
            rating: None,
            review_count: None,
        }
    }
}

impl From<&RoomResponse> for RoomSelection {
    fn from(room: &RoomResponse) -> Self {
        Self {
            room_id: room.room_id,
            room_name: room.name.clone(),
            nightly_rate: room.price,
            hotel_name: room.hotel_name.clone(),
            image: room.primary_image().map(str::to_string),
            rating: room.rating,
            review_count: room.review_count,
        }
    }
}

pub fn select_room(incoming: &BookingDraft, room: &RoomSelection) -> Result<BookingDraft> {
    let mut updates = vec![
        (DraftKey::RoomId, room.room_id.to_string()),
        (DraftKey::RoomPrice, room.nightly_rate.to_string()),
    ];
    let optional = [
        (DraftKey::RoomName, room.room_name.clone()),
        (DraftKey::HotelName, room.hotel_name.clone()),
        (DraftKey::RoomImage, room.image.clone()),
        (DraftKey::Rating, room.rating.map(|r| r.to_string())),
        (DraftKey::ReviewCount, room.review_count.map(|c| c.to_string())),
    ];
    updates.extend(optional.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))));

    incoming.advance(FlowStep::SelectRoom, updates)
}

pub fn select_dates(draft: &BookingDraft, range: &DateRange) -> Result<BookingDraft> {
    let (check_in, check_out) = range.to_wire().ok_or(Error::MissingDates)?;
    draft.advance(
        FlowStep::SelectDate,
        [(DraftKey::CheckIn, check_in), (DraftKey::CheckOut, check_out)],
    )
}

pub fn select_guests(draft: &BookingDraft, guests: GuestCount) -> Result<BookingDraft> {
    draft.advance(
        FlowStep::SelectGuests,
        [
            (DraftKey::Adults, guests.adults().to_string()),
            (DraftKey::Children, guests.children().to_string()),
            (DraftKey::Infants, guests.infants().to_string()),
        ],
    )
}

/// Price the draft and record the rounded total.
///
/// `nightly_rate` wins over the draft's `roomPrice` (a freshly fetched room
/// price beats the one captured at room selection). Without either, the
/// rate is 0.
pub fn confirm_price(
    draft: &BookingDraft,
    nightly_rate: Option<Decimal>,
    discount: Decimal,
) -> Result<(BookingDraft, PriceBreakdown)> {
    let range = draft.date_range()?;
    let rate = match nightly_rate {
        Some(rate) => rate,
        None => draft.room_price()?.unwrap_or(Decimal::ZERO),
    };

    let breakdown = pricing::quote(rate, &range, discount)?;
    let total = round_half_up(breakdown.total);
    let next = draft.advance(
        FlowStep::ConfirmPay,
        [(DraftKey::TotalPrice, total.to_string())],
    )?;
    Ok((next, breakdown))
}

/// Turn a fully threaded draft into the payment request.
pub fn submission(draft: &BookingDraft) -> Result<BookingRequest> {
    let room_id = draft.room_id()?.ok_or(Error::MissingRoom)?;
    let total_price = draft.total_price()?.ok_or(Error::MissingTotal)?;
    if total_price < Decimal::ZERO {
        return Err(Error::NegativeTotal(total_price));
    }

    let range = draft.date_range()?;
    let (Some(check_in), Some(check_out)) = (range.check_in(), range.check_out()) else {
        return Err(Error::MissingDates);
    };
    let guests = draft.guests();

    Ok(BookingRequest {
        room_id,
        check_in,
        check_out,
        adults_count: guests.adults(),
        children_count: guests.children(),
        infants_count: guests.infants(),
        total_price,
    })
}
