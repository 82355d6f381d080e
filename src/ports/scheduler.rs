//! Recurring trigger port.

use chrono::{DateTime, Utc};

use crate::domain::AppError;

/// Port for the host's cooperative task scheduler.
///
/// Triggers fire at most once per scheduled time. When one fires, the host
/// dispatches the event name back to the owning client.
pub trait Scheduler {
    /// Register a daily trigger whose first run is `first_run`.
    fn schedule_daily(&self, event: &str, first_run: DateTime<Utc>) -> Result<(), AppError>;

    fn is_scheduled(&self, event: &str) -> Result<bool, AppError>;

    /// Deregister a trigger. Clearing an unknown event is not an error.
    fn clear_schedule(&self, event: &str) -> Result<(), AppError>;

    /// Next time the trigger fires, if registered.
    fn next_run(&self, event: &str) -> Result<Option<DateTime<Utc>>, AppError>;
}

/// Scheduler for hosts without recurring tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopScheduler;

impl Scheduler for NoopScheduler {
    fn schedule_daily(&self, _event: &str, _first_run: DateTime<Utc>) -> Result<(), AppError> {
        Ok(())
    }

    fn is_scheduled(&self, _event: &str) -> Result<bool, AppError> {
        Ok(false)
    }

    fn clear_schedule(&self, _event: &str) -> Result<(), AppError> {
        Ok(())
    }

    fn next_run(&self, _event: &str) -> Result<Option<DateTime<Utc>>, AppError> {
        Ok(None)
    }
}
