mod admission;
mod availability;
mod error;
mod queries;
mod store;

pub use availability::{availability_report, saturated_days};
pub use error::EngineError;
pub use store::{BookingStore, BookingTable, DEFAULT_LOCK_TIMEOUT};

use std::time::Duration;

use crate::config::CarParkConfig;

/// The capacity-allocation engine. Holds the immutable configuration and the
/// booking store; all admissions, queries and lifecycle operations hang off
/// it. One instance per car park, shared behind an `Arc` by the embedding
/// layer.
pub struct Engine {
    config: CarParkConfig,
    store: BookingStore,
}

impl Engine {
    pub fn new(config: CarParkConfig) -> Self {
        Self {
            config,
            store: BookingStore::new(),
        }
    }

    /// Mostly for tests: a store whose day-lock waits give up quickly.
    pub fn with_lock_timeout(config: CarParkConfig, lock_timeout: Duration) -> Self {
        Self {
            config,
            store: BookingStore::with_lock_timeout(lock_timeout),
        }
    }

    pub fn config(&self) -> &CarParkConfig {
        &self.config
    }
}
