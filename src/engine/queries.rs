use chrono::NaiveDate;
use ulid::Ulid;

use crate::access;
use crate::limits::MAX_REPORT_DAYS;
use crate::model::{Booking, DateRange, DayAvailability, User};
use crate::pricing::{self, Quote};

use super::admission::validate_range;
use super::availability::availability_report;
use super::{Engine, EngineError};

impl Engine {
    /// Remaining capacity per day over `from..=to` (end date included as a
    /// boundary display day). Takes no admission locks, so the counts may be
    /// stale relative to in-flight admissions — the authoritative check
    /// happens again under lock at admission time.
    pub async fn availability(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DayAvailability>, EngineError> {
        if from > to {
            return Err(EngineError::Validation("to_date must not be before from_date"));
        }
        if (to - from).num_days() + 1 > MAX_REPORT_DAYS {
            return Err(EngineError::LimitExceeded("report window too wide"));
        }
        let table = self.store.read().await;
        Ok(availability_report(&table, from, to, self.config.total_spaces))
    }

    /// Price `[from, to)`. Pure — touches no booking state.
    pub fn price(&self, from: NaiveDate, to: NaiveDate) -> Result<Quote, EngineError> {
        let span = DateRange { start: from, end: to };
        validate_range(&span)?;
        Ok(Quote {
            amount: pricing::to_major(pricing::total_minor(&self.config, &span)),
            currency: self.config.currency.clone(),
        })
    }

    /// Look up one booking. Customers resolve only within their own set and
    /// get `NotFound` for anything else.
    pub async fn get_booking(&self, actor: &User, id: Ulid) -> Result<Booking, EngineError> {
        let table = self.store.read().await;
        let booking = table.get(&id).ok_or(EngineError::NotFound(id))?;
        if !access::can_view(actor, booking) {
            return Err(EngineError::NotFound(id));
        }
        Ok(booking.clone())
    }

    /// All bookings the actor may see: everything for admins, own rows for
    /// customers.
    pub async fn list_bookings(&self, actor: &User) -> Vec<Booking> {
        let table = self.store.read().await;
        table
            .iter()
            .filter(|b| access::can_view(actor, b))
            .cloned()
            .collect()
    }
}
