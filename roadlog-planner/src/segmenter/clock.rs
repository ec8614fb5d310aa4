//! Conversion from fractional hours to log-sheet clock times.

use chrono::NaiveTime;

const LAST_MINUTE_OF_DAY: f64 = 1439.0;

/// Minute of the day for `hours` past midnight, rounded half-up.
///
/// Rounding the absolute cursor rather than each segment's length keeps the
/// end of one segment equal to the start of the next.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to the minutes of one day before the cast"
)]
pub(crate) fn minute_of_day(hours: f64) -> u32 {
    let minutes = (hours * 60.0 + 0.5).floor();
    if minutes.is_nan() {
        return 0;
    }
    minutes.clamp(0.0, LAST_MINUTE_OF_DAY) as u32
}

/// Clock time for a minute of the day.
pub(crate) fn clock_time(minute: u32) -> NaiveTime {
    NaiveTime::from_num_seconds_from_midnight_opt(minute.saturating_mul(60), 0).unwrap_or_default()
}
