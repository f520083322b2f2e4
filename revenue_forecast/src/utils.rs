//! Utility functions for the revenue_forecast crate

use crate::config::Frequency;
use crate::error::{ForecastError, Result};
use chrono::{Duration, Months, NaiveDateTime};

/// Timestamp parsing and rendering
pub mod date_parser {
    use crate::error::{ForecastError, Result};
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

    /// Parse a date or datetime string into a naive UTC timestamp.
    ///
    /// Strings carrying an offset are converted to UTC first.
    pub fn parse_date(input: &str) -> Result<NaiveDateTime> {
        let s = input.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.naive_utc());
        }
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(dt);
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return Ok(date.and_time(NaiveTime::default()));
            }
        }

        Err(ForecastError::ParseError(format!(
            "Unrecognized timestamp: '{}'",
            input
        )))
    }

    /// Render a timestamp the way forecast records carry it.
    ///
    /// Whole seconds print as `YYYY-MM-DD HH:MM:SS`; a sub-second part adds
    /// six fractional digits, or nine when it is not a whole microsecond.
    pub fn format_timestamp(ts: &NaiveDateTime) -> String {
        let fmt = match ts.nanosecond() {
            0 => "%Y-%m-%d %H:%M:%S",
            n if n % 1_000 == 0 => "%Y-%m-%d %H:%M:%S%.6f",
            _ => "%Y-%m-%d %H:%M:%S%.9f",
        };
        ts.format(fmt).to_string()
    }
}

/// Distance between consecutive generated timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Fixed(Duration),
    Months(u32),
}

impl Step {
    fn advance(&self, from: NaiveDateTime, times: usize) -> Option<NaiveDateTime> {
        match *self {
            Step::Fixed(step) => {
                let times = i32::try_from(times).ok()?;
                from.checked_add_signed(step * times)
            }
            Step::Months(months) => {
                let total = months.checked_mul(u32::try_from(times).ok()?)?;
                from.checked_add_months(Months::new(total))
            }
        }
    }
}

/// Turn a configured frequency into a concrete step, looking at the
/// history when the frequency is `Infer`
pub fn resolve_step(frequency: Frequency, history: &[NaiveDateTime]) -> Result<Step> {
    let step = match frequency {
        Frequency::Hourly => Step::Fixed(Duration::hours(1)),
        Frequency::Daily => Step::Fixed(Duration::days(1)),
        Frequency::Weekly => Step::Fixed(Duration::weeks(1)),
        Frequency::Monthly => Step::Months(1),
        Frequency::Infer => infer_step(history)?,
    };
    Ok(step)
}

fn infer_step(history: &[NaiveDateTime]) -> Result<Step> {
    let mut gaps: Vec<i64> = history
        .windows(2)
        .map(|w| (w[1] - w[0]).num_seconds())
        .filter(|&s| s > 0)
        .collect();
    if gaps.is_empty() {
        return Err(ForecastError::ValidationError(
            "Cannot infer a frequency from fewer than two distinct timestamps".to_string(),
        ));
    }
    gaps.sort_unstable();
    let median = gaps[gaps.len() / 2];
    let days = median as f64 / 86_400.0;

    // calendar spacings vary in length, so match them by range
    let step = if (28.0..=31.0).contains(&days) {
        Step::Months(1)
    } else if (89.0..=92.0).contains(&days) {
        Step::Months(3)
    } else if (365.0..=366.0).contains(&days) {
        Step::Months(12)
    } else {
        Step::Fixed(Duration::seconds(median))
    };
    Ok(step)
}

/// Create future timestamps for forecasting.
///
/// Returns exactly `horizon` timestamps, all strictly after `last_timestamp`.
pub fn future_timestamps(
    last_timestamp: NaiveDateTime,
    horizon: usize,
    step: Step,
) -> Result<Vec<NaiveDateTime>> {
    (1..=horizon)
        .map(|i| {
            step.advance(last_timestamp, i).ok_or_else(|| {
                ForecastError::ValidationError(format!(
                    "Future timestamp {} steps after {} is out of range",
                    i, last_timestamp
                ))
            })
        })
        .collect()
}
