use thiserror::Error;

/// Maximum hours a single time-log entry may record.
pub const MAX_HOURS_PER_ENTRY: f64 = 1.0;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot log {hours} hours in one entry (max 1.0)")]
    HourCapExceeded { hours: f64 },

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
}
