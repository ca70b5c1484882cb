use serde::{Deserialize, Serialize};

use crate::core::nice::{nice, ticks};
use crate::core::Domain;
use crate::error::{ChartError, ChartResult};

/// Value type carried on the X axis of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScaleKind {
    /// UTC instants stored as Unix seconds.
    #[default]
    Temporal,
    Linear,
}

impl ScaleKind {
    #[must_use]
    pub fn is_temporal(self) -> bool {
        matches!(self, Self::Temporal)
    }
}

/// Linear mapping between a data domain and a pixel range.
///
/// The range may be inverted (`start > end`), which is how the Y axis puts
/// larger values higher on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuousScale {
    domain: Domain,
    range: (f64, f64),
    clamp: bool,
}

impl Default for ContinuousScale {
    fn default() -> Self {
        Self {
            domain: Domain::new(0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
        }
    }
}

impl ContinuousScale {
    pub fn new(domain: Domain, range: (f64, f64)) -> ChartResult<Self> {
        let mut scale = Self::default();
        scale.set_domain(domain)?;
        scale.set_range(range.0, range.1)?;
        Ok(scale)
    }

    #[must_use]
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    #[must_use]
    pub fn domain(self) -> Domain {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn is_clamped(self) -> bool {
        self.clamp
    }

    pub fn set_clamp(&mut self, clamp: bool) {
        self.clamp = clamp;
    }

    pub fn set_domain(&mut self, domain: Domain) -> ChartResult<()> {
        self.domain = domain.validate("scale")?;
        Ok(())
    }

    pub fn set_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        self.range = (start, end);
        Ok(())
    }

    /// Rounds the domain outward to tick multiples.
    pub fn nice(&mut self, count: usize) {
        let (min, max) = nice(self.domain.min, self.domain.max, count);
        self.domain = Domain::new(min, max);
    }

    /// Maps a domain value to the range.
    ///
    /// A zero-width domain maps everything to the middle of the range.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain.span();
        let mut t = if span == 0.0 {
            0.5
        } else {
            (value - self.domain.min) / span
        };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Maps a range value back to the domain.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range.1 - self.range.0;
        let mut t = if span == 0.0 {
            0.5
        } else {
            (pixel - self.range.0) / span
        };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        self.domain.min + t * self.domain.span()
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain.min, self.domain.max, count)
    }
}
