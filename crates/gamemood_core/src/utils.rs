//! Date helpers shared by the trend, streak and dashboard calculations.

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};

/// Calendar date of a stored timestamp in `tz`.
pub fn local_date<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    ts.with_timezone(tz).date_naive()
}

/// `day` minus `offset` days, `None` if that falls before the calendar range.
pub fn days_before(day: NaiveDate, offset: u64) -> Option<NaiveDate> {
    day.checked_sub_days(Days::new(offset))
}

/// Parse a `today` argument: `YYYY-MM-DD`, or an RFC3339 timestamp whose
/// date part is taken as-is.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    None
}

/// Round to one decimal place.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Population variance (mean of squared deviations).
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let m = mean(values.iter().copied())?;
    mean(values.iter().map(|v| (v - m).powi(2)))
}
