//! Date Helpers
//!
//! "Today" is the user's local calendar day, read from the browser clock.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Slack after midnight so the check lands on the new day
const ROLLOVER_SLACK_MS: i64 = 1_000;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Delay until just after the next local midnight
pub fn ms_until_next_day(now: NaiveDateTime) -> u32 {
    let midnight = now
        .date()
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(now);
    let ms = (midnight - now).num_milliseconds() + ROLLOVER_SLACK_MS;
    u32::try_from(ms.max(ROLLOVER_SLACK_MS)).unwrap_or(u32::MAX)
}

pub fn ms_until_tomorrow() -> u32 {
    ms_until_next_day(Local::now().naive_local())
}

/// Short human form, e.g. "Oct 19, 2026"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
