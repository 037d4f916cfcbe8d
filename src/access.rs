//! Booking lifecycle predicates: who may see or touch a booking. Pure checks,
//! no side effects. The engine maps a failed check to `NotFound` so callers
//! cannot probe for the existence of other users' bookings.

use crate::model::{Booking, User};

fn owns_or_admin(actor: &User, booking: &Booking) -> bool {
    actor.is_admin() || actor.id == booking.owner_id
}

pub fn can_view(actor: &User, booking: &Booking) -> bool {
    owns_or_admin(actor, booking)
}

pub fn can_amend(actor: &User, booking: &Booking) -> bool {
    owns_or_admin(actor, booking)
}

pub fn can_cancel_or_delete(actor: &User, booking: &Booking) -> bool {
    owns_or_admin(actor, booking)
}
