use serde::{Deserialize, Serialize};

use crate::core::DataPoint;

/// Moving-average kernel width.
///
/// `0` and `1` mean no smoothing. The kernel looks `floor(window / 2)` samples to
/// each side, so even and odd widths that share a half-width behave the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SmoothingWindow(u32);

impl Default for SmoothingWindow {
    fn default() -> Self {
        Self::NONE
    }
}

impl SmoothingWindow {
    pub const NONE: Self = Self(1);

    #[must_use]
    pub const fn new(window: u32) -> Self {
        Self(window)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn half_width(self) -> usize {
        (self.0 / 2) as usize
    }

    #[must_use]
    pub const fn is_identity(self) -> bool {
        self.half_width() < 1
    }
}

impl From<u32> for SmoothingWindow {
    fn from(window: u32) -> Self {
        Self(window)
    }
}

/// Centered moving average over `y`, keeping every `x`.
///
/// Windows are truncated at both ends of the slice: the first and last
/// `half_width` samples average over fewer neighbours instead of padding.
#[must_use]
pub fn smooth(points: &[DataPoint], window: SmoothingWindow) -> Vec<DataPoint> {
    let half = window.half_width();
    if half < 1 || points.is_empty() {
        return points.to_vec();
    }

    let last = points.len() - 1;
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let low = index.saturating_sub(half);
            let high = (index + half).min(last);
            let window = &points[low..=high];
            let sum: f64 = window.iter().map(|sample| sample.y).sum();
            DataPoint::new(point.x, sum / window.len() as f64)
        })
        .collect()
}
