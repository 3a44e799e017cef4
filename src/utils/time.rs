//! 日期和时间的解析与格式化

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::errors::{Result, TrackerError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const CLOCK_FORMAT: &str = "%H:%M";

/// 当前 UTC 日期
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// 解析 `YYYY-MM-DD`
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
        TrackerError::date_parse(format!(
            "Invalid date '{}', expected YYYY-MM-DD",
            input
        ))
    })
}

/// 解析 `HH:MM`
pub fn parse_clock(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), CLOCK_FORMAT).map_err(|_| {
        TrackerError::validation(format!("Invalid time '{}', expected HH:MM", input))
    })
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// 12 小时制显示，如 `09:05 AM`
pub fn format_time_of_day(ts: DateTime<Utc>) -> String {
    ts.format("%I:%M %p").to_string()
}

/// 解析可选的日期区间
///
/// 起始日默认今天，结束日默认等于起始日，两端都包含。
pub fn resolve_range(start: Option<&str>, end: Option<&str>) -> Result<(NaiveDate, NaiveDate)> {
    resolve_range_with(start, end, |start| start)
}

/// 同 [`resolve_range`]，但结束日默认今天（起始日在未来时取起始日）
pub fn resolve_range_until_today(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(NaiveDate, NaiveDate)> {
    resolve_range_with(start, end, |start| start.max(today()))
}

fn resolve_range_with(
    start: Option<&str>,
    end: Option<&str>,
    default_end: impl FnOnce(NaiveDate) -> NaiveDate,
) -> Result<(NaiveDate, NaiveDate)> {
    let start = match start.filter(|s| !s.trim().is_empty()) {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let end = match end.filter(|s| !s.trim().is_empty()) {
        Some(s) => parse_date(s)?,
        None => default_end(start),
    };

    if start > end {
        return Err(TrackerError::date_parse(format!(
            "start_date {} is after end_date {}",
            start, end
        )));
    }

    Ok((start, end))
}

/// 区间 `[start 00:00, end+1 00:00)` 的 UTC 边界
pub fn day_bounds(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let lower = start.and_time(NaiveTime::MIN).and_utc();
    let upper = end
        .checked_add_days(Days::new(1))
        .unwrap_or(end)
        .and_time(NaiveTime::MIN)
        .and_utc();
    (lower, upper)
}
