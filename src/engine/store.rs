use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use ulid::Ulid;

use crate::model::{Booking, BookingStatus, DateRange};

use super::EngineError;

pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// The booking table. Rows are kept sorted by `span.start` so overlap scans
/// can binary-search past everything starting at or after the query end.
#[derive(Default)]
pub struct BookingTable {
    rows: Vec<Booking>,
}

impl BookingTable {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: &Ulid) -> Option<&Booking> {
        self.rows.iter().find(|b| b.id == *id)
    }

    pub fn get_mut(&mut self, id: &Ulid) -> Option<&mut Booking> {
        self.rows.iter_mut().find(|b| b.id == *id)
    }

    /// Insert maintaining sort order by span.start.
    pub fn insert(&mut self, booking: Booking) {
        let pos = self
            .rows
            .binary_search_by_key(&booking.span.start, |b| b.span.start)
            .unwrap_or_else(|e| e);
        self.rows.insert(pos, booking);
    }

    pub fn remove(&mut self, id: &Ulid) -> Option<Booking> {
        let pos = self.rows.iter().position(|b| b.id == *id)?;
        Some(self.rows.remove(pos))
    }

    /// Rows whose span overlaps the query window, any status. Everything at
    /// index >= the partition point starts at or after `query.end` and cannot
    /// overlap.
    pub fn overlapping(&self, query: &DateRange) -> impl Iterator<Item = &Booking> {
        let right_bound = self.rows.partition_point(|b| b.span.start < query.end);
        self.rows[..right_bound]
            .iter()
            .filter(move |b| b.span.overlaps(query))
    }

    /// Count active bookings occupying `day`, optionally excluding one row
    /// (an amended booking never competes with itself).
    pub fn count_active_on(&self, day: NaiveDate, exclude: Option<Ulid>) -> u32 {
        let probe = DateRange::single_day(day);
        self.overlapping(&probe)
            .filter(|b| b.status == BookingStatus::Active)
            .filter(|b| exclude.is_none_or(|id| b.id != id))
            .count() as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = &Booking> {
        self.rows.iter()
    }
}

/// The one shared mutable resource: the booking table, plus the per-day lock
/// stripes admission control serializes on.
pub struct BookingStore {
    table: RwLock<BookingTable>,
    day_locks: DashMap<NaiveDate, Arc<Mutex<()>>>,
    lock_timeout: Duration,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::with_lock_timeout(DEFAULT_LOCK_TIMEOUT)
    }

    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        Self {
            table: RwLock::new(BookingTable::new()),
            day_locks: DashMap::new(),
            lock_timeout,
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, BookingTable> {
        self.table.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, BookingTable> {
        self.table.write().await
    }

    /// Acquire the lock stripe for every occupied day of `span`. Days iterate
    /// in ascending order, giving all admissions a consistent global lock
    /// order, so overlapping attempts queue instead of deadlocking. A wait
    /// exceeding the store timeout is a transient store error; the guards
    /// release on drop.
    pub async fn lock_days(&self, span: &DateRange) -> Result<Vec<OwnedMutexGuard<()>>, EngineError> {
        let mut guards = Vec::with_capacity(span.num_days() as usize);
        for day in span.days() {
            let stripe = self
                .day_locks
                .entry(day)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone();
            match tokio::time::timeout(self.lock_timeout, stripe.lock_owned()).await {
                Ok(guard) => guards.push(guard),
                Err(_) => {
                    metrics::counter!(crate::observability::LOCK_TIMEOUTS_TOTAL).increment(1);
                    return Err(EngineError::Store(format!("lock wait timed out for {day}")));
                }
            }
        }
        Ok(guards)
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}
