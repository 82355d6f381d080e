use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};

use crate::domain::AppError;
use crate::domain::schedule::first_daily_run;
use crate::ports::Scheduler;

/// Daily providers-list refresh trigger for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSchedule {
    event: String,
    hour: u32,
    timezone: Tz,
}

impl RefreshSchedule {
    pub fn new(event: impl Into<String>, hour: u32, timezone: Tz) -> Self {
        Self { event: event.into(), hour, timezone }
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Register the trigger unless it already is. Returns whether a new
    /// registration was made.
    pub fn ensure_scheduled<K: Scheduler>(
        &self,
        scheduler: &K,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        if scheduler.is_scheduled(&self.event)? {
            debug!(event = %self.event, "Refresh trigger already registered");
            return Ok(false);
        }
        let first_run = first_daily_run(now, self.hour, self.timezone);
        scheduler.schedule_daily(&self.event, first_run)?;
        info!(event = %self.event, first_run = %first_run, "Registered daily providers refresh");
        Ok(true)
    }

    pub fn teardown<K: Scheduler>(&self, scheduler: &K) -> Result<(), AppError> {
        scheduler.clear_schedule(&self.event)?;
        info!(event = %self.event, "Cleared daily providers refresh");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::REFERENCE_TIMEZONE;
    use crate::services::{MemoryOptionStore, StoredScheduler};

    #[test]
    fn registers_once() {
        let scheduler = StoredScheduler::new(MemoryOptionStore::new());
        let schedule = RefreshSchedule::new("cptmc_update_providers_demo", 3, REFERENCE_TIMEZONE);
        let now = DateTime::parse_from_rfc3339("2024-05-01T01:00:00Z").unwrap().to_utc();

        assert!(schedule.ensure_scheduled(&scheduler, now).unwrap());
        assert!(!schedule.ensure_scheduled(&scheduler, now).unwrap());
        assert_eq!(
            scheduler.next_run(schedule.event()).unwrap(),
            Some(DateTime::parse_from_rfc3339("2024-05-01T18:00:00Z").unwrap().to_utc())
        );

        schedule.teardown(&scheduler).unwrap();
        assert!(!scheduler.is_scheduled(schedule.event()).unwrap());
    }
}
