use chrono::NaiveDate;
use ulid::Ulid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed or out-of-policy input. Never retried.
    Validation(&'static str),
    /// Request exceeds a process-wide hard limit. Never retried.
    LimitExceeded(&'static str),
    /// Missing booking, or one the caller may not see — deliberately
    /// indistinguishable so existence never leaks.
    NotFound(Ulid),
    /// One or more days in the requested range are already full.
    CapacityExceeded { dates: Vec<NaiveDate> },
    /// Transient store failure (lock wait timed out). Retried internally up
    /// to the attempt budget, then surfaced.
    Store(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Validation(msg) => write!(f, "invalid request: {msg}"),
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            EngineError::NotFound(id) => write!(f, "booking not found: {id}"),
            EngineError::CapacityExceeded { dates } => {
                write!(f, "no parking spaces available for ")?;
                for (i, date) in dates.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{date}")?;
                }
                Ok(())
            }
            EngineError::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}
