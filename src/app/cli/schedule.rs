use chrono::Utc;

use crate::app::cli::FileClient;
use crate::domain::{AppError, RefreshOutcome};
use crate::ports::Scheduler;

pub(super) fn run_refresh(client: &FileClient<'_>) -> Result<i32, AppError> {
    Ok(report_refresh(&client.refresh_providers()?))
}

pub(super) fn run_invalidate(client: &FileClient<'_>) -> Result<(), AppError> {
    client.invalidate_providers()?;
    println!("✅ Cleared cached providers list");
    Ok(())
}

/// One scheduler pass for this item: make sure the daily trigger exists, then
/// run it if it is due. Triggers of other items sharing the store are left alone.
pub(super) fn run_tick(client: &FileClient<'_>) -> Result<i32, AppError> {
    let now = Utc::now();
    let scheduler = client.context().scheduler();
    if client.ensure_refresh_scheduled(now)? {
        if let Some(next_run) = scheduler.next_run(client.refresh_event())? {
            println!("✅ Scheduled daily providers refresh (next run {})", next_run);
        }
    }

    if !scheduler.take_due_event(client.refresh_event(), now)? {
        return Ok(0);
    }
    match client.handle_scheduled_event(client.refresh_event())? {
        Some(outcome) => Ok(report_refresh(&outcome)),
        None => Ok(0),
    }
}

pub(super) fn run_teardown(client: &FileClient<'_>) -> Result<(), AppError> {
    client.teardown()?;
    println!("✅ Removed daily providers refresh");
    Ok(())
}

fn report_refresh(outcome: &RefreshOutcome) -> i32 {
    match outcome {
        RefreshOutcome::Updated { providers, skipped } => {
            println!("✅ Updated providers list ({} providers, {} skipped)", providers, skipped);
            0
        }
        RefreshOutcome::Rejected(failure) => {
            eprintln!("Providers list unchanged: {}", failure);
            1
        }
        RefreshOutcome::Static => {
            println!("Static providers list; nothing to refresh");
            0
        }
    }
}
