use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Half-open date range `[start, end)` — a booking occupies a space on every
/// day from `start` up to but excluding `end` (the checkout day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start < end, "DateRange start must be before end");
        Self { start, end }
    }

    /// The range covering exactly one day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day.succ_opt().expect("date overflow"),
        }
    }

    /// Number of occupied days (checkout day excluded).
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// The single overlap rule used everywhere: `[a1,a2)` meets `[b1,b2)` iff
    /// `a1 < b2 && b1 < a2`. Availability counting and admission control must
    /// both go through this.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.overlaps(&Self::single_day(day))
    }

    /// Iterate the occupied days `[start, end)`.
    pub fn days(&self) -> Days {
        Days {
            cur: self.start,
            end: self.end,
        }
    }
}

/// Iterator over consecutive calendar days, end exclusive.
pub struct Days {
    cur: NaiveDate,
    end: NaiveDate,
}

impl Days {
    /// Inclusive variant, used by the availability report which displays the
    /// end date as a boundary day.
    pub fn through(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            cur: from,
            end: to.succ_opt().expect("date overflow"),
        }
    }
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.cur >= self.end {
            return None;
        }
        let day = self.cur;
        self.cur = self.cur.succ_opt().expect("date overflow");
        Some(day)
    }
}

/// Booking state. Numeric values match the persisted layout
/// (0 = cancelled, 1 = active). Only active bookings count against capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Cancelled = 0,
    Active = 1,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Ulid,
    /// The user who holds the booking — not necessarily its creator, when an
    /// admin books on a customer's behalf.
    pub owner_id: Ulid,
    pub span: DateRange,
    pub status: BookingStatus,
    /// Minor currency units (e.g. pence), fixed at the moment the row was
    /// last written. Never recomputed on read.
    pub total_price: u32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Customer,
}

/// The acting caller, as resolved by the external auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Ulid,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// One entry of the availability report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub available_spaces: u32,
}

// ── Admission request types ──────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CreateBooking {
    /// Explicit target owner; honored only for admin actors.
    pub owner_id: Option<Ulid>,
    pub span: DateRange,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AmendBooking {
    pub owner_id: Option<Ulid>,
    pub span: DateRange,
    pub status: BookingStatus,
    pub notes: Option<String>,
}
