//! Daily refresh timing.

use chrono::{DateTime, Days, Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::domain::AppError;

/// Local hour at which the providers list is refreshed.
pub const DEFAULT_REFRESH_HOUR: u32 = 3;

/// Zone used when the host does not configure one.
pub const REFERENCE_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;

/// Parse an IANA time zone name.
pub fn parse_timezone(name: &str) -> Result<Tz, AppError> {
    name.trim().parse::<Tz>().map_err(|_| AppError::InvalidTimezone(name.to_string()))
}

/// First run of a daily trigger registered at `now`: tomorrow at `hour:00`
/// local time in `tz`.
///
/// When that local time does not exist (a DST gap) the next existing hour is
/// used.
pub fn first_daily_run(now: DateTime<Utc>, hour: u32, tz: Tz) -> DateTime<Utc> {
    let today = now.with_timezone(&tz).date_naive();
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    let at = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let local = tomorrow.and_time(at);

    tz.from_local_datetime(&local)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(local + Duration::hours(1))).earliest())
        .map(|scheduled| scheduled.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&local))
}

/// Next occurrence of a daily trigger that was due at `scheduled`, strictly
/// after `now`. Missed days are skipped rather than replayed.
pub fn following_daily_run(scheduled: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if scheduled > now {
        return scheduled;
    }
    let elapsed_days = (now - scheduled).num_days() + 1;
    scheduled + Duration::days(elapsed_days)
}
