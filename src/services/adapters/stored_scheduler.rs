//! Scheduler that keeps its trigger table in an option store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::AppError;
use crate::domain::schedule::following_daily_run;
use crate::ports::{OptionStore, Scheduler};

/// Option key holding the trigger table.
pub const SCHEDULE_KEY: &str = "cptmc_scheduled_events";

/// Daily trigger table persisted under [`SCHEDULE_KEY`].
///
/// A host driving every item polls [`StoredScheduler::take_due`] and dispatches
/// each returned event. A host driving one item, such as `cptmc tick`, uses
/// [`StoredScheduler::take_due_event`] so other items' triggers stay pending. Taking an event
/// advances it to its next daily slot, so it fires at most once per slot.
#[derive(Debug, Clone)]
pub struct StoredScheduler<S: OptionStore> {
    store: S,
}

impl<S: OptionStore> StoredScheduler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Events due at `now`, each advanced past `now`.
    pub fn take_due(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError> {
        let mut table = self.load()?;
        let mut due = Vec::new();
        for (event, next_run) in table.iter_mut() {
            if *next_run <= now {
                due.push(event.clone());
                *next_run = following_daily_run(*next_run, now);
                debug!(event = %event, next_run = %next_run, "Trigger due");
            }
        }
        if !due.is_empty() {
            self.save(&table)?;
        }
        Ok(due)
    }

    /// Take `event` alone if it is due at `now`, leaving every other trigger
    /// in the table untouched.
    pub fn take_due_event(&self, event: &str, now: DateTime<Utc>) -> Result<bool, AppError> {
        let mut table = self.load()?;
        let Some(next_run) = table.get_mut(event) else {
            return Ok(false);
        };
        if *next_run > now {
            return Ok(false);
        }
        *next_run = following_daily_run(*next_run, now);
        debug!(event = %event, next_run = %next_run, "Trigger due");
        self.save(&table)?;
        Ok(true)
    }

    /// All registered triggers and their next run.
    pub fn entries(&self) -> Result<BTreeMap<String, DateTime<Utc>>, AppError> {
        self.load()
    }

    fn load(&self) -> Result<BTreeMap<String, DateTime<Utc>>, AppError> {
        match self.store.get(SCHEDULE_KEY)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(BTreeMap::new()),
        }
    }

    fn save(&self, table: &BTreeMap<String, DateTime<Utc>>) -> Result<(), AppError> {
        if table.is_empty() {
            return self.store.delete(SCHEDULE_KEY);
        }
        self.store.set(SCHEDULE_KEY, serde_json::to_value(table)?)
    }
}

impl<S: OptionStore> Scheduler for StoredScheduler<S> {
    fn schedule_daily(&self, event: &str, first_run: DateTime<Utc>) -> Result<(), AppError> {
        let mut table = self.load()?;
        table.insert(event.to_string(), first_run);
        self.save(&table)
    }

    fn is_scheduled(&self, event: &str) -> Result<bool, AppError> {
        Ok(self.load()?.contains_key(event))
    }

    fn clear_schedule(&self, event: &str) -> Result<(), AppError> {
        let mut table = self.load()?;
        if table.remove(event).is_some() {
            self.save(&table)?;
        }
        Ok(())
    }

    fn next_run(&self, event: &str) -> Result<Option<DateTime<Utc>>, AppError> {
        Ok(self.load()?.get(event).copied())
    }
}
