use crate::core::nice::round_to;
use crate::core::{TickPlan, Viewport, locate};
use crate::render::{
    AxisFrame, AxisSide, AxisTick, CaptureArea, HighlightFrame, HighlightMarker, LegendEntry,
    LegendFrame, PlotArea, RenderFrame, SeriesPath, SeriesReconciliation, StrokeStyle,
    TransitionSpec, palette_color,
};

use super::ChartConfig;
use super::scale_manager::{GridEmphasis, ScaleManager};
use super::series_store::SeriesStore;

/// Decimals kept in live-value legend labels.
const LIVE_VALUE_DECIMALS: usize = 8;

/// Legend label shown while a sample of `name` is highlighted.
#[must_use]
pub fn live_value_text(name: &str, value: f64) -> String {
    format!("{name}: {}", round_to(value, LIVE_VALUE_DECIMALS))
}

/// Borrowed view of everything a draw pass reads.
pub(super) struct FrameContext<'a> {
    pub config: &'a ChartConfig,
    pub surface: Viewport,
    pub plot: PlotArea,
    pub scales: &'a ScaleManager,
    pub store: &'a SeriesStore,
    pub x_plan: &'a TickPlan,
    pub y_plan: &'a TickPlan,
}

impl FrameContext<'_> {
    pub(super) fn render_frame(
        &self,
        reconciliation: SeriesReconciliation,
        transition: Option<TransitionSpec>,
    ) -> RenderFrame {
        RenderFrame {
            surface: self.surface,
            plot: self.plot,
            pointer_capture: CaptureArea::around(self.plot, self.config.interaction.mouse_padding),
            transition,
            series: self.series_paths(),
            reconciliation,
            x_axis: self.x_axis(),
            y_axis: self.y_axis(),
            legend: self.legend(),
        }
    }

    fn stroke(&self, emphasis: GridEmphasis) -> StrokeStyle {
        match emphasis {
            GridEmphasis::Regular => self.config.grid.regular,
            GridEmphasis::Emphasized => self.config.grid.emphasized,
        }
    }

    fn series_paths(&self) -> Vec<SeriesPath> {
        let x = self.scales.x();
        let y = self.scales.y();
        let domain = x.domain();
        self.store
            .iter()
            .enumerate()
            .map(|(index, series)| SeriesPath {
                name: series.name().to_owned(),
                color: palette_color(index),
                points: series
                    .derived_points()
                    .iter()
                    .filter(|point| domain.contains(point.x) && point.y.is_finite())
                    .map(|point| (x.map(point.x), y.map(point.y)))
                    .collect(),
            })
            .collect()
    }

    fn x_axis(&self) -> AxisFrame {
        let x = self.scales.x();
        let gridline = self.config.grid.regular;
        let labels = self.x_plan.labels();
        AxisFrame {
            side: AxisSide::Bottom,
            ticks: self
                .x_plan
                .ticks
                .iter()
                .zip(labels)
                .map(|(value, label)| AxisTick {
                    value: *value,
                    position: x.map(*value),
                    label,
                    gridline,
                })
                .collect(),
            baseline: self.stroke(self.scales.x_baseline_emphasis(&self.y_plan.ticks)),
        }
    }

    fn y_axis(&self) -> AxisFrame {
        let y = self.scales.y();
        let labels = self.y_plan.labels();
        AxisFrame {
            side: AxisSide::Left,
            ticks: self
                .y_plan
                .ticks
                .iter()
                .zip(labels)
                .map(|(value, label)| AxisTick {
                    value: *value,
                    position: y.map(*value),
                    label,
                    gridline: self.stroke(ScaleManager::y_gridline_emphasis(*value)),
                })
                .collect(),
            baseline: self.config.grid.emphasized,
        }
    }

    fn legend(&self) -> LegendFrame {
        let legend = &self.config.legend;
        let row = legend.item_spacing + legend.item_size;
        let entries: Vec<LegendEntry> = self
            .store
            .iter()
            .enumerate()
            .map(|(index, series)| LegendEntry {
                name: series.name().to_owned(),
                text: series.name().to_owned(),
                color: palette_color(index),
                x: legend.padding_left,
                y: legend.title_height + legend.padding_top + row * index as f64,
            })
            .collect();

        LegendFrame {
            title: legend.title.clone(),
            x: self.plot.width + legend.gap,
            width: legend.width,
            outline_height: legend.title_height + legend.padding_top + row * entries.len() as f64,
            outline: legend.outline,
            clip_x: legend.padding_left,
            clip_width: legend.width - legend.padding_left - legend.padding_right,
            clip_height: self.plot.height,
            entries,
        }
    }

    /// Markers on the sample at or before `domain_x` in every non-empty series.
    ///
    /// The guide line follows the last non-empty series.
    pub(super) fn highlight_frame(&self, domain_x: f64) -> HighlightFrame {
        let x = self.scales.x();
        let y = self.scales.y();
        let markers: Vec<HighlightMarker> = self
            .store
            .iter()
            .filter(|series| !series.derived_points().is_empty())
            .map(|series| {
                let points = series.derived_points();
                let index = locate(points, domain_x);
                let point = points[index];
                HighlightMarker {
                    name: series.name().to_owned(),
                    index,
                    x: x.map(point.x),
                    y: y.map(point.y),
                    radius: self.config.interaction.marker_radius,
                    value: point.y,
                    legend_text: live_value_text(series.name(), point.y),
                }
            })
            .collect();

        HighlightFrame {
            reference_x: markers.last().map(|marker| marker.x),
            reference_height: self.plot.height,
            reference_line: self.config.interaction.guide_line,
            markers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::live_value_text;

    #[test]
    fn live_value_is_rounded_to_eight_decimals() {
        assert_eq!(live_value_text("A", 3.0), "A: 3");
        assert_eq!(live_value_text("B", 1.0 / 3.0), "B: 0.33333333");
        assert_eq!(live_value_text("C", -2.5), "C: -2.5");
    }
}
