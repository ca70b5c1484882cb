use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ContinuousScale, Domain, ScaleKind, datetime_to_unix_seconds, year_start_unix_seconds};
use crate::error::{ChartError, ChartResult};

/// Which tick plans must be rebuilt after a scale change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisRefresh {
    pub x: bool,
    pub y: bool,
}

impl AxisRefresh {
    pub const NONE: Self = Self { x: false, y: false };
    pub const X: Self = Self { x: true, y: false };
    pub const Y: Self = Self { x: false, y: true };
    pub const BOTH: Self = Self { x: true, y: true };

    #[must_use]
    pub fn any(self) -> bool {
        self.x || self.y
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            x: self.x || other.x,
            y: self.y || other.y,
        }
    }
}

/// Stroke class of a gridline or baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridEmphasis {
    Regular,
    Emphasized,
}

/// Domain used before any data or explicit domain is set.
///
/// Temporal charts start at January 1st ten years before `now` and end at
/// `now`; linear charts use `[0, 1]`.
#[must_use]
pub fn default_x_domain(kind: ScaleKind, now: DateTime<Utc>) -> Domain {
    match kind {
        ScaleKind::Linear => Domain::new(0.0, 1.0),
        ScaleKind::Temporal => {
            let end = datetime_to_unix_seconds(now);
            let start = year_start_unix_seconds(f64::from(now.year() - 10)).unwrap_or(end);
            Domain::new(start, end)
        }
    }
}

/// Owns the X and Y mappings of one chart.
///
/// X maps onto `[0, chart_width]`. Y maps onto `[chart_height, 0]` and its
/// domain is rounded outward with `nice` before use; the requested domain
/// is kept so baseline rules can compare against it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleManager {
    kind: ScaleKind,
    x: ContinuousScale,
    y: ContinuousScale,
    raw_y_domain: Domain,
    y_nice_count: usize,
}

impl ScaleManager {
    pub fn new(
        kind: ScaleKind,
        x_clamp: bool,
        y_clamp: bool,
        y_nice_count: usize,
        now: DateTime<Utc>,
    ) -> ChartResult<Self> {
        let raw_y_domain = Domain::new(0.0, 1.0);
        let x = ContinuousScale::new(default_x_domain(kind, now), (0.0, 1.0))?.with_clamp(x_clamp);
        let mut y = ContinuousScale::new(raw_y_domain, (1.0, 0.0))?.with_clamp(y_clamp);
        y.nice(y_nice_count);
        Ok(Self {
            kind,
            x,
            y,
            raw_y_domain,
            y_nice_count,
        })
    }

    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    #[must_use]
    pub fn x(&self) -> ContinuousScale {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> ContinuousScale {
        self.y
    }

    #[must_use]
    pub fn x_domain(&self) -> Domain {
        self.x.domain()
    }

    /// Y domain after nice rounding.
    #[must_use]
    pub fn y_domain(&self) -> Domain {
        self.y.domain()
    }

    /// Y domain as requested, before nice rounding.
    #[must_use]
    pub fn raw_y_domain(&self) -> Domain {
        self.raw_y_domain
    }

    pub fn set_x_domain(&mut self, domain: Domain) -> ChartResult<AxisRefresh> {
        let domain = domain.validate("x")?;
        if domain == self.x.domain() {
            return Ok(AxisRefresh::NONE);
        }
        self.x.set_domain(domain)?;
        debug!(min = domain.min, max = domain.max, "x domain updated");
        Ok(AxisRefresh::X)
    }

    pub fn set_y_domain(&mut self, domain: Domain) -> ChartResult<AxisRefresh> {
        let domain = domain.validate("y")?;
        if domain == self.raw_y_domain {
            return Ok(AxisRefresh::NONE);
        }
        self.y.set_domain(domain)?;
        self.y.nice(self.y_nice_count);
        self.raw_y_domain = domain;
        let niced = self.y.domain();
        debug!(
            min = domain.min,
            max = domain.max,
            nice_min = niced.min,
            nice_max = niced.max,
            "y domain updated"
        );
        Ok(AxisRefresh::Y)
    }

    /// Applies a new plot size to both ranges.
    pub fn set_ranges(&mut self, chart_width: f64, chart_height: f64) -> ChartResult<AxisRefresh> {
        if !chart_width.is_finite() || chart_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "chart width must be finite and > 0".to_owned(),
            ));
        }
        if !chart_height.is_finite() || chart_height <= 0.0 {
            return Err(ChartError::InvalidData(
                "chart height must be finite and > 0".to_owned(),
            ));
        }
        self.x.set_range(0.0, chart_width)?;
        self.y.set_range(chart_height, 0.0)?;
        Ok(AxisRefresh::BOTH)
    }

    /// Exact zero is drawn emphasized; every other Y gridline is regular.
    #[must_use]
    pub fn y_gridline_emphasis(value: f64) -> GridEmphasis {
        if value == 0.0 {
            GridEmphasis::Emphasized
        } else {
            GridEmphasis::Regular
        }
    }

    /// Stroke class of the X axis baseline for the given Y ticks.
    ///
    /// The baseline turns regular only when a non-zero Y tick equals the
    /// requested (un-niced) Y minimum. Tick position does not matter.
    #[must_use]
    pub fn x_baseline_emphasis(&self, y_ticks: &[f64]) -> GridEmphasis {
        let hidden = y_ticks
            .iter()
            .any(|tick| *tick != 0.0 && *tick == self.raw_y_domain.min);
        if hidden {
            GridEmphasis::Regular
        } else {
            GridEmphasis::Emphasized
        }
    }
}
