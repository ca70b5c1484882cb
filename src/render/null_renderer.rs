use std::collections::HashMap;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{HighlightFrame, RenderFrame, Renderer};

/// Headless renderer used by tests and offline usage.
///
/// It validates every frame and keeps the last instruction of each kind so
/// tests can assert on what a real backend would have drawn.
#[derive(Debug, Default)]
pub struct NullRenderer {
    containers: HashMap<String, Viewport>,
    pub surface: Option<Viewport>,
    pub surfaces_created: usize,
    pub render_count: usize,
    pub last_frame: Option<RenderFrame>,
    pub last_highlight: Option<HighlightFrame>,
    pub highlight_visible: bool,
}

impl NullRenderer {
    /// Registers a selector that `resolve_container` can answer.
    #[must_use]
    pub fn with_container(mut self, selector: impl Into<String>, size: Viewport) -> Self {
        self.containers.insert(selector.into(), size);
        self
    }
}

impl Renderer for NullRenderer {
    fn resolve_container(&mut self, selector: &str) -> Option<Viewport> {
        self.containers.get(selector).copied()
    }

    fn create_surface(&mut self, size: Viewport) -> ChartResult<()> {
        self.surface = Some(size);
        self.surfaces_created += 1;
        self.last_frame = None;
        self.last_highlight = None;
        self.highlight_visible = false;
        Ok(())
    }

    fn resize_surface(&mut self, size: Viewport) -> ChartResult<()> {
        if self.surface.is_none() {
            return Err(ChartError::InvalidData(
                "cannot resize a surface that was never created".to_owned(),
            ));
        }
        self.surface = Some(size);
        Ok(())
    }

    fn remove_surface(&mut self) -> ChartResult<()> {
        self.surface = None;
        Ok(())
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn highlight(&mut self, frame: &HighlightFrame) -> ChartResult<()> {
        self.last_highlight = Some(frame.clone());
        Ok(())
    }

    fn set_highlight_visible(&mut self, visible: bool) -> ChartResult<()> {
        self.highlight_visible = visible;
        Ok(())
    }
}
