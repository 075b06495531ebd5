use chrono::{DateTime, NaiveDate, Utc};

/// Source of "now" for projections and record timestamps.
pub trait Clock: Send + Sync {
    /// Calendar day used as D+0.
    fn today(&self) -> NaiveDate;

    fn now(&self) -> DateTime<Utc>;
}
