//! Calendar dates and date ranges.
//!
//! Dates cross the backend boundary in three shapes: a bare `YYYY-MM-DD`
//! string, an ISO timestamp, or a `[year, month, day, ...]` array with a
//! 1-indexed month. All three collapse into [`CalendarDate`] on ingress, so
//! nothing past deserialization ever branches on the wire shape.
//!
//! A timestamp keeps the calendar day it was written with. No timezone
//! conversion is applied, which keeps a `2024-03-10T23:30:00-05:00` check-in
//! on March 10th regardless of where the client runs.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A day on the calendar, with no time-of-day or timezone attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today in the local timezone.
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Weekday index with Sunday = 0.
    pub fn weekday_from_sunday(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// Whole days from `self` to `other` (negative when `other` is earlier).
    pub fn days_until(&self, other: CalendarDate) -> i64 {
        (other.0 - self.0).num_days()
    }

    pub fn add_days(&self, days: i64) -> Option<Self> {
        self.0.checked_add_signed(Duration::days(days)).map(Self)
    }

    /// Same month and day `years` earlier; Feb 29 falls back to Feb 28.
    pub fn years_before(&self, years: i32) -> Option<Self> {
        let year = self.year() - years;
        NaiveDate::from_ymd_opt(year, self.month(), self.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, self.month(), self.day() - 1))
            .map(Self)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Parse a bare date or an ISO timestamp, keeping the date as written.
    pub fn parse_wire(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let date_part = match trimmed.split_once(['T', ' ']) {
            Some((date, _)) => date,
            None => trimmed,
        };

        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| Error::InvalidDate(input.to_string()))
    }

    /// Build from `[year, month, day, ...]`; trailing time components are ignored.
    pub fn from_parts(parts: &[i64]) -> Result<Self> {
        let invalid = || Error::InvalidDate(format!("{:?}", parts));

        let [year, month, day, ..] = parts else {
            return Err(invalid());
        };

        let year = i32::try_from(*year).map_err(|_| invalid())?;
        let month = u32::try_from(*month).map_err(|_| invalid())?;
        let day = u32::try_from(*day).map_err(|_| invalid())?;

        Self::from_ymd(year, month, day).ok_or_else(invalid)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_wire(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(CalendarDateVisitor)
    }
}

struct CalendarDateVisitor;

impl<'de> Visitor<'de> for CalendarDateVisitor {
    type Value = CalendarDate;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YYYY-MM-DD string, an ISO timestamp, or a [year, month, day] array")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<CalendarDate, E> {
        CalendarDate::parse_wire(v).map_err(E::custom)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<CalendarDate, A::Error> {
        let mut parts = Vec::with_capacity(7);
        while let Some(part) = seq.next_element::<i64>()? {
            parts.push(part);
        }
        CalendarDate::from_parts(&parts).map_err(de::Error::custom)
    }
}

/// Serde adapter for display-only date fields: anything unparseable
/// becomes `None` instead of failing the whole payload.
pub mod lenient {
    use super::CalendarDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<CalendarDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<CalendarDate>, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw.and_then(|value| CalendarDate::deserialize(value).ok()))
    }
}

/// Parse a wire timestamp (ISO string or `[y, m, d, h, min, s, nanos]` array).
///
/// Returns `None` for anything else.
pub fn parse_wire_timestamp(value: &serde_json::Value) -> Option<NaiveDateTime> {
    match value {
        serde_json::Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.naive_local());
            }
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
                .ok()
                .or_else(|| {
                    CalendarDate::parse_wire(s)
                        .ok()
                        .and_then(|d| d.as_naive().and_hms_opt(0, 0, 0))
                })
        }
        serde_json::Value::Array(items) => {
            let parts: Vec<i64> = items.iter().filter_map(|v| v.as_i64()).collect();
            if parts.len() != items.len() {
                return None;
            }
            let date = CalendarDate::from_parts(&parts).ok()?;
            let field = |i: usize| parts.get(i).copied().unwrap_or(0);
            let time = |i: usize| u32::try_from(field(i)).ok();
            date.as_naive()
                .and_hms_nano_opt(time(3)?, time(4)?, time(5)?, time(6)?)
        }
        _ => None,
    }
}

/// A check-in / check-out pair.
///
/// When both ends are set, check-out is strictly after check-in. The only
/// ways to build one are [`DateRange::empty`], [`DateRange::starting`] and
/// the validating [`DateRange::new`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDateRange")]
pub struct DateRange {
    check_in: Option<CalendarDate>,
    check_out: Option<CalendarDate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDateRange {
    check_in: Option<CalendarDate>,
    check_out: Option<CalendarDate>,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = Error;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        match (raw.check_in, raw.check_out) {
            (Some(check_in), Some(check_out)) => Self::new(check_in, check_out),
            (Some(check_in), None) => Ok(Self::starting(check_in)),
            (None, None) => Ok(Self::empty()),
            (None, Some(check_out)) => Err(Error::InvalidDate(format!(
                "check-out {} without check-in",
                check_out
            ))),
        }
    }
}

impl DateRange {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fresh selection with only the check-in set.
    pub fn starting(check_in: CalendarDate) -> Self {
        Self {
            check_in: Some(check_in),
            check_out: None,
        }
    }

    pub fn new(check_in: CalendarDate, check_out: CalendarDate) -> Result<Self> {
        if check_out <= check_in {
            return Err(Error::InvalidRange {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in: Some(check_in),
            check_out: Some(check_out),
        })
    }

    /// Parse both ends from their `YYYY-MM-DD` wire form.
    pub fn from_wire(check_in: &str, check_out: &str) -> Result<Self> {
        Self::new(
            CalendarDate::parse_wire(check_in)?,
            CalendarDate::parse_wire(check_out)?,
        )
    }

    pub fn check_in(&self) -> Option<CalendarDate> {
        self.check_in
    }

    pub fn check_out(&self) -> Option<CalendarDate> {
        self.check_out
    }

    pub fn is_complete(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.check_in.is_none() && self.check_out.is_none()
    }

    /// Nights between the two ends, when both are set.
    pub fn nights(&self) -> Option<i64> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => Some(check_in.days_until(check_out)),
            _ => None,
        }
    }

    /// Both ends as `YYYY-MM-DD`, when complete.
    pub fn to_wire(&self) -> Option<(String, String)> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => Some((check_in.to_string(), check_out.to_string())),
            _ => None,
        }
    }
}
