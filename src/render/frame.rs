use serde::{Deserialize, Serialize};

use crate::core::{Margins, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, StrokeStyle, TransitionSpec};

/// Plot rectangle inside the surface, after margins and legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    #[must_use]
    pub fn new(margins: Margins, width: f64, height: f64) -> Self {
        Self {
            left: margins.left,
            top: margins.top,
            width,
            height,
        }
    }
}

/// Rectangle that should deliver pointer events, in plot-local pixels.
///
/// It overhangs the plot by half the mouse padding on each side. Hosts report
/// pointer X relative to the plot, i.e. capture-local X plus `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureArea {
    pub x: f64,
    pub width: f64,
    pub height: f64,
}

impl CaptureArea {
    #[must_use]
    pub fn around(plot: PlotArea, mouse_padding: f64) -> Self {
        Self {
            x: -mouse_padding / 2.0,
            width: plot.width + mouse_padding,
            height: plot.height,
        }
    }
}

/// Side of the plot an axis ruler is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisSide {
    Bottom,
    Left,
}

/// One labelled tick, positioned in plot-local pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub position: f64,
    pub label: String,
    pub gridline: StrokeStyle,
}

/// Axis ruler with its gridlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisFrame {
    pub side: AxisSide,
    pub ticks: Vec<AxisTick>,
    /// Stroke of the axis domain line itself.
    pub baseline: StrokeStyle,
}

impl AxisFrame {
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.ticks.iter().map(|tick| tick.label.as_str()).collect()
    }
}

/// Line path of one series in plot-local pixels.
///
/// Only samples inside the X domain with a finite Y are included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPath {
    pub name: String,
    pub color: Color,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub name: String,
    pub text: String,
    pub color: Color,
    pub x: f64,
    pub y: f64,
}

/// Legend box placed to the right of the plot area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendFrame {
    pub title: String,
    pub x: f64,
    pub width: f64,
    pub outline_height: f64,
    pub outline: StrokeStyle,
    pub clip_x: f64,
    pub clip_width: f64,
    pub clip_height: f64,
    pub entries: Vec<LegendEntry>,
}

/// Keys entering, staying and leaving between two render passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesReconciliation {
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub removed: Vec<String>,
}

impl SeriesReconciliation {
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub surface: Viewport,
    pub plot: PlotArea,
    pub pointer_capture: CaptureArea,
    /// `None` when the pass should apply without animation.
    pub transition: Option<TransitionSpec>,
    pub series: Vec<SeriesPath>,
    pub reconciliation: SeriesReconciliation,
    pub x_axis: AxisFrame,
    pub y_axis: AxisFrame,
    pub legend: LegendFrame,
}

impl RenderFrame {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.surface.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.surface.width,
                height: self.surface.height,
            });
        }

        for path in &self.series {
            path.color.validate()?;
            if path
                .points
                .iter()
                .any(|(x, y)| !x.is_finite() || !y.is_finite())
            {
                return Err(ChartError::InvalidData(format!(
                    "path of series `{}` has non-finite coordinates",
                    path.name
                )));
            }
        }
        for tick in self.x_axis.ticks.iter().chain(&self.y_axis.ticks) {
            if !tick.position.is_finite() {
                return Err(ChartError::InvalidData(
                    "tick position must be finite".to_owned(),
                ));
            }
            tick.gridline.validate()?;
        }
        self.x_axis.baseline.validate()?;
        self.y_axis.baseline.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn series_path(&self, name: &str) -> Option<&SeriesPath> {
        self.series.iter().find(|path| path.name == name)
    }
}

/// Marker sitting on the located sample of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightMarker {
    pub name: String,
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub value: f64,
    pub legend_text: String,
}

/// Pointer-driven overlay update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightFrame {
    pub markers: Vec<HighlightMarker>,
    /// Plot-local X of the shared vertical guide line, spanning the plot height.
    pub reference_x: Option<f64>,
    pub reference_height: f64,
    pub reference_line: StrokeStyle,
}
