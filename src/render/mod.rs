mod frame;
mod null_renderer;
mod primitives;

pub use frame::{
    AxisFrame, AxisSide, AxisTick, CaptureArea, HighlightFrame, HighlightMarker, LegendEntry,
    LegendFrame, PlotArea, RenderFrame, SeriesPath, SeriesReconciliation,
};
pub use null_renderer::NullRenderer;
pub use primitives::{CATEGORY10, Color, StrokeStyle, TransitionSpec, palette_color};

use crate::core::Viewport;
use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive fully materialized frames, so drawing code stays isolated
/// from scale, smoothing and tick logic. Animation is owned by the backend:
/// a frame carrying a [`TransitionSpec`] may interrupt one still in flight.
pub trait Renderer {
    /// Looks up the size of a host element by selector.
    fn resolve_container(&mut self, selector: &str) -> Option<Viewport> {
        let _ = selector;
        None
    }

    fn create_surface(&mut self, size: Viewport) -> ChartResult<()>;

    fn resize_surface(&mut self, size: Viewport) -> ChartResult<()>;

    fn remove_surface(&mut self) -> ChartResult<()>;

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    fn highlight(&mut self, frame: &HighlightFrame) -> ChartResult<()>;

    /// Shows or hides markers, live labels and the guide line together.
    fn set_highlight_visible(&mut self, visible: bool) -> ChartResult<()>;
}
