//! Car-park booking engine.
//!
//! A fixed number of parking spaces is allocated over half-open date ranges.
//! The engine guarantees that on any single day the number of active bookings
//! never exceeds the configured capacity, even under concurrent admission
//! attempts. Authentication, HTTP routing and durable persistence live in the
//! embedding layer; this crate is the capacity-allocation core they call into.

pub mod access;
pub mod config;
pub mod engine;
pub mod limits;
pub mod model;
pub mod observability;
pub mod pricing;
