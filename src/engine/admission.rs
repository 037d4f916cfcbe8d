//! Admission control: the transactional check-then-commit path for creating
//! and amending bookings, plus the cancel and hard-delete paths.
//!
//! Each create/amend runs as an independent unit of work: acquire the day
//! lock stripes for the requested range, count competing active rows under
//! the locks, price the range, write the row, release on drop. A transient
//! store failure restarts the whole sequence from scratch, up to the attempt
//! budget — no intermediate state survives a failed attempt.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, warn};
use ulid::Ulid;

use crate::access;
use crate::limits::{MAX_NOTES_LEN, MAX_RANGE_DAYS};
use crate::model::{AmendBooking, Booking, BookingStatus, CreateBooking, DateRange, User};
use crate::observability;
use crate::pricing;

use super::availability::saturated_days;
use super::{Engine, EngineError};

/// Total attempts per logical admission call.
pub(super) const ADMISSION_ATTEMPTS: u32 = 3;

pub(super) fn validate_range(span: &DateRange) -> Result<(), EngineError> {
    if span.start >= span.end {
        return Err(EngineError::Validation("to_date must be after from_date"));
    }
    if span.num_days() > MAX_RANGE_DAYS {
        return Err(EngineError::LimitExceeded("date range too wide"));
    }
    Ok(())
}

fn validate_notes(notes: Option<&String>) -> Result<(), EngineError> {
    if let Some(notes) = notes
        && notes.len() > MAX_NOTES_LEN
    {
        return Err(EngineError::LimitExceeded("notes too long"));
    }
    Ok(())
}

/// Admin actors may assign the booking to an explicit target owner; everyone
/// else books for themselves. Applies identically to create and amend.
fn resolve_owner(actor: &User, target: Option<Ulid>) -> Ulid {
    match target {
        Some(owner) if actor.is_admin() => owner,
        _ => actor.id,
    }
}

impl Engine {
    pub async fn create_booking(
        &self,
        actor: &User,
        req: CreateBooking,
    ) -> Result<Booking, EngineError> {
        validate_range(&req.span)?;
        validate_notes(req.notes.as_ref())?;

        let started = Instant::now();
        let mut attempt = 1u32;
        let result = loop {
            match self.try_create(actor, &req).await {
                Err(EngineError::Store(e)) if attempt < ADMISSION_ATTEMPTS => {
                    warn!(attempt, error = %e, "transient store error during create, retrying");
                    attempt += 1;
                }
                other => break other,
            }
        };
        observability::record_admission("create", started.elapsed(), attempt, &result);
        result
    }

    async fn try_create(&self, actor: &User, req: &CreateBooking) -> Result<Booking, EngineError> {
        let _day_locks = self.store.lock_days(&req.span).await?;
        let mut table = self.store.write().await;

        let full = saturated_days(&table, &req.span, self.config.total_spaces, None);
        if !full.is_empty() {
            metrics::counter!(observability::CAPACITY_REJECTIONS_TOTAL).increment(1);
            return Err(EngineError::CapacityExceeded { dates: full });
        }

        let now = Utc::now();
        let booking = Booking {
            id: Ulid::new(),
            owner_id: resolve_owner(actor, req.owner_id),
            span: req.span,
            status: BookingStatus::Active,
            total_price: pricing::total_minor(&self.config, &req.span),
            notes: req.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        table.insert(booking.clone());
        metrics::gauge!(observability::BOOKINGS_ACTIVE).increment(1.0);
        debug!(id = %booking.id, owner = %booking.owner_id, "booking admitted");
        Ok(booking)
    }

    pub async fn amend_booking(
        &self,
        actor: &User,
        id: Ulid,
        req: AmendBooking,
    ) -> Result<Booking, EngineError> {
        validate_range(&req.span)?;
        validate_notes(req.notes.as_ref())?;

        // Resolve and authorize before entering the admission transaction.
        // Foreign bookings read as missing, never as forbidden.
        {
            let table = self.store.read().await;
            let existing = table.get(&id).ok_or(EngineError::NotFound(id))?;
            if !access::can_amend(actor, existing) {
                return Err(EngineError::NotFound(id));
            }
        }

        let started = Instant::now();
        let mut attempt = 1u32;
        let result = loop {
            match self.try_amend(actor, id, &req).await {
                Err(EngineError::Store(e)) if attempt < ADMISSION_ATTEMPTS => {
                    warn!(attempt, error = %e, "transient store error during amend, retrying");
                    attempt += 1;
                }
                other => break other,
            }
        };
        observability::record_admission("amend", started.elapsed(), attempt, &result);
        result
    }

    async fn try_amend(
        &self,
        actor: &User,
        id: Ulid,
        req: &AmendBooking,
    ) -> Result<Booking, EngineError> {
        let _day_locks = self.store.lock_days(&req.span).await?;
        let mut table = self.store.write().await;

        // Re-resolve under the lock — the row may have been deleted or
        // reassigned since the pre-check.
        let existing = table.get(&id).ok_or(EngineError::NotFound(id))?;
        if !access::can_amend(actor, existing) {
            return Err(EngineError::NotFound(id));
        }
        let created_at = existing.created_at;
        let old_status = existing.status;

        let full = saturated_days(&table, &req.span, self.config.total_spaces, Some(id));
        if !full.is_empty() {
            metrics::counter!(observability::CAPACITY_REJECTIONS_TOTAL).increment(1);
            return Err(EngineError::CapacityExceeded { dates: full });
        }

        let updated = Booking {
            id,
            owner_id: resolve_owner(actor, req.owner_id),
            span: req.span,
            status: req.status,
            total_price: pricing::total_minor(&self.config, &req.span),
            notes: req.notes.clone(),
            created_at,
            updated_at: Utc::now(),
        };
        // Reinsert to keep the start-date ordering after a date change.
        table.remove(&id);
        table.insert(updated.clone());

        match (old_status, updated.status) {
            (BookingStatus::Active, BookingStatus::Cancelled) => {
                metrics::gauge!(observability::BOOKINGS_ACTIVE).decrement(1.0);
            }
            (BookingStatus::Cancelled, BookingStatus::Active) => {
                metrics::gauge!(observability::BOOKINGS_ACTIVE).increment(1.0);
            }
            _ => {}
        }
        debug!(id = %id, "booking amended");
        Ok(updated)
    }

    /// Flip a booking to Cancelled in place. No capacity check: cancelling
    /// only frees spaces. The row stays queryable.
    pub async fn cancel_booking(&self, actor: &User, id: Ulid) -> Result<Booking, EngineError> {
        let mut table = self.store.write().await;
        let existing = table.get(&id).ok_or(EngineError::NotFound(id))?;
        if !access::can_cancel_or_delete(actor, existing) {
            return Err(EngineError::NotFound(id));
        }

        let was_active = existing.status == BookingStatus::Active;
        let booking = table.get_mut(&id).expect("row checked above");
        booking.status = BookingStatus::Cancelled;
        booking.updated_at = Utc::now();
        let booking = booking.clone();

        if was_active {
            metrics::gauge!(observability::BOOKINGS_ACTIVE).decrement(1.0);
        }
        debug!(id = %id, "booking cancelled");
        Ok(booking)
    }

    /// Destructive removal — distinct from cancelling, which keeps the row.
    pub async fn delete_booking(&self, actor: &User, id: Ulid) -> Result<(), EngineError> {
        let mut table = self.store.write().await;
        let existing = table.get(&id).ok_or(EngineError::NotFound(id))?;
        if !access::can_cancel_or_delete(actor, existing) {
            return Err(EngineError::NotFound(id));
        }

        let removed = table.remove(&id).expect("row checked above");
        if removed.status == BookingStatus::Active {
            metrics::gauge!(observability::BOOKINGS_ACTIVE).decrement(1.0);
        }
        debug!(id = %id, "booking deleted");
        Ok(())
    }
}
