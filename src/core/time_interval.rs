use chrono::{DateTime, Datelike, Days, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

/// UTC calendar unit used to place temporal ticks.
///
/// Weeks start on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInterval {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl TimeInterval {
    /// Coarsest first.
    pub const DESCENDING: [Self; 8] = [
        Self::Year,
        Self::Month,
        Self::Week,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
        }
    }

    /// Fixed length for sub-day units, `None` for calendar units.
    const fn fixed_millis(self) -> Option<i64> {
        match self {
            Self::Hour => Some(MILLIS_PER_HOUR),
            Self::Minute => Some(MILLIS_PER_MINUTE),
            Self::Second => Some(MILLIS_PER_SECOND),
            Self::Millisecond => Some(1),
            Self::Year | Self::Month | Self::Week | Self::Day => None,
        }
    }

    /// Latest boundary at or before `time`.
    #[must_use]
    pub fn floor(self, time: DateTime<Utc>) -> DateTime<Utc> {
        if let Some(unit) = self.fixed_millis() {
            let millis = time.timestamp_millis();
            let floored = millis - millis.rem_euclid(unit);
            return DateTime::<Utc>::from_timestamp_millis(floored).unwrap_or(time);
        }

        let date = time.date_naive();
        let floored = match self {
            Self::Year => date.with_month(1).and_then(|d| d.with_day(1)),
            Self::Month => date.with_day(1),
            Self::Week => date.checked_sub_days(Days::new(u64::from(
                date.weekday().num_days_from_sunday(),
            ))),
            _ => Some(date),
        };
        floored
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .unwrap_or(time)
    }

    /// Earliest boundary at or after `time`.
    #[must_use]
    pub fn ceil(self, time: DateTime<Utc>) -> DateTime<Utc> {
        let floored = self.floor(time);
        if floored < time {
            self.offset(floored, 1)
        } else {
            floored
        }
    }

    /// Moves a boundary by `steps` whole units.
    #[must_use]
    pub fn offset(self, boundary: DateTime<Utc>, steps: i64) -> DateTime<Utc> {
        match self {
            Self::Year => shift_months(boundary, steps.saturating_mul(12)),
            Self::Month => shift_months(boundary, steps),
            Self::Week => boundary + Duration::days(steps.saturating_mul(7)),
            Self::Day => boundary + Duration::days(steps),
            Self::Hour | Self::Minute | Self::Second | Self::Millisecond => {
                let unit = self.fixed_millis().unwrap_or(1);
                boundary + Duration::milliseconds(steps.saturating_mul(unit))
            }
        }
    }

    /// Number of boundaries after `start` and at or before `end`.
    #[must_use]
    pub fn count(self, start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
        let start = self.floor(start);
        let end = self.floor(end);
        match self {
            Self::Year => i64::from(end.year() - start.year()),
            Self::Month => {
                i64::from(end.year() - start.year()) * 12 + i64::from(end.month())
                    - i64::from(start.month())
            }
            Self::Week => (end - start).num_days().div_euclid(7),
            Self::Day => (end - start).num_days(),
            Self::Hour | Self::Minute | Self::Second | Self::Millisecond => {
                let unit = self.fixed_millis().unwrap_or(1);
                (end.timestamp_millis() - start.timestamp_millis()).div_euclid(unit)
            }
        }
    }

    /// Boundaries inside `[start, end]` spaced `stride` units apart, counted
    /// back from the last boundary at or before `end`. Ascending.
    #[must_use]
    pub fn stepped_range(
        self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        stride: i64,
    ) -> Vec<DateTime<Utc>> {
        let stride = stride.max(1);
        let first = self.ceil(start);
        let mut boundaries = Vec::new();
        let mut current = self.floor(end);
        while current >= first {
            boundaries.push(current);
            let previous = self.offset(current, -stride);
            if previous >= current {
                break;
            }
            current = previous;
        }
        boundaries.reverse();
        boundaries
    }
}

fn shift_months(boundary: DateTime<Utc>, months: i64) -> DateTime<Utc> {
    let total = i64::from(boundary.year()) * 12 + i64::from(boundary.month0()) + months;
    let Ok(year) = i32::try_from(total.div_euclid(12)) else {
        return boundary;
    };
    let month = total.rem_euclid(12) as u32 + 1;
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .unwrap_or(boundary)
}

#[cfg(test)]
mod tests {
    use super::TimeInterval;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).single().expect("valid time")
    }

    #[test]
    fn week_floor_lands_on_sunday() {
        // 2024-05-15 is a Wednesday.
        let floored = TimeInterval::Week.floor(at(2024, 5, 15, 13, 0, 0));
        assert_eq!(floored, at(2024, 5, 12, 0, 0, 0));
    }

    #[test]
    fn count_uses_floored_bounds() {
        let start = at(2010, 6, 1, 0, 0, 0);
        let end = at(2012, 2, 1, 0, 0, 0);
        assert_eq!(TimeInterval::Year.count(start, end), 2);
        assert_eq!(TimeInterval::Month.count(start, end), 20);
    }

    #[test]
    fn month_offset_rolls_over_years() {
        let shifted = TimeInterval::Month.offset(at(2020, 11, 1, 0, 0, 0), 3);
        assert_eq!(shifted, at(2021, 2, 1, 0, 0, 0));
        let back = TimeInterval::Month.offset(at(2020, 1, 1, 0, 0, 0), -1);
        assert_eq!(back, at(2019, 12, 1, 0, 0, 0));
    }

    #[test]
    fn stepped_range_is_inclusive_of_aligned_end() {
        let start = at(2024, 1, 1, 0, 30, 0);
        let end = at(2024, 1, 1, 3, 0, 0);
        assert_eq!(
            TimeInterval::Hour.stepped_range(start, end, 1),
            vec![
                at(2024, 1, 1, 1, 0, 0),
                at(2024, 1, 1, 2, 0, 0),
                at(2024, 1, 1, 3, 0, 0)
            ]
        );
        assert_eq!(
            TimeInterval::Hour.stepped_range(start, end, 2),
            vec![at(2024, 1, 1, 1, 0, 0), at(2024, 1, 1, 3, 0, 0)]
        );
    }

    #[test]
    fn stepped_range_is_anchored_at_end() {
        let start = at(2010, 3, 1, 0, 0, 0);
        let end = at(2020, 8, 1, 0, 0, 0);
        let years = TimeInterval::Year.stepped_range(start, end, 3);
        assert_eq!(
            years,
            vec![
                at(2011, 1, 1, 0, 0, 0),
                at(2014, 1, 1, 0, 0, 0),
                at(2017, 1, 1, 0, 0, 0),
                at(2020, 1, 1, 0, 0, 0)
            ]
        );
    }

    #[test]
    fn millisecond_floor_handles_pre_epoch_times() {
        let time = DateTime::<Utc>::from_timestamp_millis(-1_500).expect("valid");
        assert_eq!(
            TimeInterval::Second.floor(time).timestamp_millis(),
            -2_000
        );
    }
}
