use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const MINUTE_MILLIS: i64 = 60_000;
const HOUR_MILLIS: i64 = 60 * MINUTE_MILLIS;
const DAY_MILLIS: i64 = 24 * HOUR_MILLIS;

/// Snapping resolution applied to every selected instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionGranularity {
    #[default]
    Day,
    Hour,
    Minute,
}

impl SelectionGranularity {
    /// Step length in milliseconds. Multiples are measured from the Unix epoch,
    /// so `Day` steps land on UTC midnight.
    #[must_use]
    pub fn step_millis(self) -> i64 {
        match self {
            Self::Day => DAY_MILLIS,
            Self::Hour => HOUR_MILLIS,
            Self::Minute => MINUTE_MILLIS,
        }
    }

    #[must_use]
    pub fn step(self) -> Duration {
        Duration::milliseconds(self.step_millis())
    }
}

/// Calendar unit used for tick marks and page-sized keyboard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayUnit {
    Day,
    #[default]
    Month,
    Year,
}

impl DisplayUnit {
    /// Average length of one unit, used when an axis holds fewer than two
    /// boundaries of this unit.
    #[must_use]
    pub fn nominal_millis(self) -> f64 {
        match self {
            Self::Day => DAY_MILLIS as f64,
            Self::Month => 365.2425 / 12.0 * DAY_MILLIS as f64,
            Self::Year => 365.2425 * DAY_MILLIS as f64,
        }
    }

    /// Start of the unit containing `time`.
    #[must_use]
    pub fn floor(self, time: DateTime<Utc>) -> DateTime<Utc> {
        let date = time.date_naive();
        let floored = match self {
            Self::Day => Some(date),
            Self::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1),
            Self::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        };
        floored
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map_or(time, |naive| Utc.from_utc_datetime(&naive))
    }

    /// Start of the first unit at or after `time`.
    #[must_use]
    pub fn ceil(self, time: DateTime<Utc>) -> DateTime<Utc> {
        let floored = self.floor(time);
        if floored == time {
            return time;
        }
        self.add(floored, 1).unwrap_or(time)
    }

    /// Shifts `time` by `count` whole units. Month and year steps clamp the
    /// day-of-month the way chrono's month arithmetic does.
    #[must_use]
    pub fn add(self, time: DateTime<Utc>, count: i32) -> Option<DateTime<Utc>> {
        match self {
            Self::Day => time.checked_add_signed(Duration::days(i64::from(count))),
            Self::Month => add_months(time, i64::from(count)),
            Self::Year => add_months(time, i64::from(count) * 12),
        }
    }

    #[must_use]
    pub fn is_boundary(self, time: DateTime<Utc>) -> bool {
        self.floor(time) == time
    }

    /// Whether `time` also starts the next coarser calendar period.
    #[must_use]
    pub fn is_major_boundary(self, time: DateTime<Utc>) -> bool {
        if !self.is_boundary(time) {
            return false;
        }
        match self {
            Self::Day => time.day() == 1,
            Self::Month => time.month() == 1,
            Self::Year => time.year().rem_euclid(10) == 0,
        }
    }

    /// Whether `time` sits at the midpoint marker of the next coarser period.
    #[must_use]
    pub fn is_mid_boundary(self, time: DateTime<Utc>) -> bool {
        if !self.is_boundary(time) {
            return false;
        }
        match self {
            Self::Day => time.day() == 15,
            Self::Month => time.month() == 7,
            Self::Year => time.year().rem_euclid(10) == 5,
        }
    }

    #[must_use]
    pub fn label(self, time: DateTime<Utc>, major: bool) -> String {
        let pattern = match (self, major) {
            (Self::Day, false) => "%-d",
            (Self::Day, true) => "%b",
            (Self::Month, false) => "%b",
            (Self::Month, true) | (Self::Year, _) => "%Y",
        };
        time.format(pattern).to_string()
    }
}

fn add_months(time: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        time.checked_add_months(magnitude)
    } else {
        time.checked_sub_months(magnitude)
    }
}

pub(crate) fn datetime_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

pub(crate) fn floor_to_step(millis: i64, step: i64) -> i64 {
    millis.div_euclid(step) * step
}

pub(crate) fn ceil_to_step(millis: i64, step: i64) -> i64 {
    -((-millis).div_euclid(step) * step)
}

/// Nearest multiple of `step`; exact halves resolve to the later multiple.
pub(crate) fn round_to_step(millis: i64, step: i64) -> i64 {
    (millis + step / 2).div_euclid(step) * step
}
