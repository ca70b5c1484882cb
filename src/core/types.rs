use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Space reserved around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(50.0, 50.0, 50.0, 50.0)
    }
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// One sample of a series.
///
/// For temporal charts `x` holds a UTC instant as Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn from_time(time: DateTime<Utc>, y: f64) -> Self {
        Self {
            x: datetime_to_unix_seconds(time),
            y,
        }
    }
}

/// Inclusive `[min, max]` pair in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn from_times(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(
            datetime_to_unix_seconds(start),
            datetime_to_unix_seconds(end),
        )
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Extent of all x values, `None` when no point is given.
    #[must_use]
    pub fn x_extent<'a>(points: impl IntoIterator<Item = &'a DataPoint>) -> Option<Self> {
        extent(points.into_iter().map(|point| point.x))
    }

    /// Extent of all y values, `None` when no point is given.
    #[must_use]
    pub fn y_extent<'a>(points: impl IntoIterator<Item = &'a DataPoint>) -> Option<Self> {
        extent(points.into_iter().map(|point| point.y))
    }

    pub fn validate(self, axis: &str) -> ChartResult<Self> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "{axis} domain must be finite"
            )));
        }
        Ok(self)
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<Domain> {
    values
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some(Domain::new(value, value)),
            Some(domain) => Some(Domain::new(domain.min.min(value), domain.max.max(value))),
        })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Converts Unix seconds back to a UTC instant, rounded to the millisecond.
#[must_use]
pub fn unix_seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1000.0).round();
    if millis > i64::MAX as f64 || millis < i64::MIN as f64 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
}

/// Unix seconds of January 1st, 00:00 UTC of `year`.
#[must_use]
pub fn year_start_unix_seconds(year: f64) -> Option<f64> {
    if !year.is_finite() || year.fract() != 0.0 {
        return None;
    }
    let year = i32::try_from(year as i64).ok()?;
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .map(datetime_to_unix_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_start_is_january_first_utc() {
        let seconds = year_start_unix_seconds(2010.0).expect("valid year");
        let time = unix_seconds_to_datetime(seconds).expect("valid instant");
        assert_eq!(time.to_rfc3339(), "2010-01-01T00:00:00+00:00");
    }

    #[test]
    fn fractional_year_is_rejected() {
        assert!(year_start_unix_seconds(2010.5).is_none());
    }

    #[test]
    fn extent_skips_non_finite_values() {
        let points = [
            DataPoint::new(3.0, f64::NAN),
            DataPoint::new(1.0, 2.0),
            DataPoint::new(f64::INFINITY, -4.0),
        ];
        assert_eq!(Domain::x_extent(&points), Some(Domain::new(1.0, 3.0)));
        assert_eq!(Domain::y_extent(&points), Some(Domain::new(-4.0, 2.0)));
        assert_eq!(Domain::x_extent(&[]), None);
    }
}
