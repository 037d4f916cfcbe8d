//! Process-wide hard limits. Requests beyond these bounds are rejected with
//! `EngineError::LimitExceeded` before any locking happens.

/// Widest bookable (and priceable) range in occupied days.
pub const MAX_RANGE_DAYS: i64 = 365;

/// Widest availability-report window in displayed days (the report includes
/// its end date, so this is one more than `MAX_RANGE_DAYS`).
pub const MAX_REPORT_DAYS: i64 = 366;

/// Longest free-text note attached to a booking, in bytes.
pub const MAX_NOTES_LEN: usize = 1024;
