use serde::{Deserialize, Serialize};

use crate::core::ContinuousScale;

/// Pointer event delivered by the host, in pixels relative to the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Enter,
    Move { x: f64, y: f64 },
    Leave,
}

/// Public hover state exposed to host applications.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerState {
    pub inside: bool,
    /// Last pointer X in plot pixels, kept so a redraw can re-highlight.
    pub last_x: Option<f64>,
    /// Domain X the last highlight was located at.
    pub domain_x: Option<f64>,
}

impl PointerState {
    pub fn enter(&mut self) {
        self.inside = true;
    }

    pub fn leave(&mut self) {
        self.inside = false;
        self.last_x = None;
        self.domain_x = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Pixel width of one sample slot when `visible_points` samples share the plot.
///
/// Returns `0` when fewer than two samples are visible.
#[must_use]
pub fn tick_width(chart_width: f64, visible_points: usize) -> f64 {
    if visible_points < 2 {
        return 0.0;
    }
    (chart_width / (visible_points - 1) as f64).round()
}

/// Domain X targeted by a pointer at plot-local `pointer_x`.
///
/// The pointer is shifted right by half a sample slot. Lookup takes the
/// sample at or before the target, so the highlight switches halfway between
/// two samples.
#[must_use]
pub fn pointer_domain_x(x_scale: ContinuousScale, pointer_x: f64, tick_width: f64) -> f64 {
    x_scale.invert(pointer_x + tick_width / 2.0)
}
