use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Datelike, TimeZone, Utc};

const SECONDS_PER_DAY: u64 = 86_400;

/// Return the current unix timestamp in seconds.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

/// Number of whole UTC days since the unix epoch.
pub fn unix_day(unix_secs: u64) -> u64 {
    unix_secs / SECONDS_PER_DAY
}

/// Unix timestamp of the first second of the UTC calendar month containing `unix_secs`.
pub fn month_start_unix_secs(unix_secs: u64) -> u64 {
    let Ok(secs) = i64::try_from(unix_secs) else {
        return 0;
    };

    let Some(now) = Utc.timestamp_opt(secs, 0).single() else {
        return 0;
    };

    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .and_then(|start| u64::try_from(start.timestamp()).ok())
        .unwrap_or(0)
}
