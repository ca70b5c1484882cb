use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    Domain, LabelAffixes, Margins, ScaleKind, SmoothingWindow, TickPlan, Viewport, plan,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{PointerEvent, PointerState, pointer_domain_x, tick_width};
use crate::render::{PlotArea, RenderFrame, Renderer, SeriesReconciliation};

use super::chart_config::{ChartConfig, TemporalInput};
use super::frame_builder::FrameContext;
use super::scale_manager::{AxisRefresh, ScaleManager, default_x_domain};
use super::series_store::{Series, SeriesInput, SeriesStore, XEncoding};

/// Lifecycle of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartState {
    /// No container bound yet.
    Uninitialized,
    /// Container bound, surface and scales created, no data loaded.
    Initialized,
    /// Data loaded at least once since the last bind.
    Ready,
}

/// Host element a chart draws into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerRef {
    /// Element whose size is already known.
    Element(Viewport),
    /// Identifier resolved through [`Renderer::resolve_container`].
    Selector(String),
}

/// Plot size left after margins and the legend are taken out of `size`.
fn plot_area(config: &ChartConfig, size: Viewport) -> ChartResult<PlotArea> {
    let margins = config.margins;
    let width =
        f64::from(size.width) - margins.left - margins.right - config.legend.width;
    let height = f64::from(size.height) - margins.top - margins.bottom;
    if !size.is_valid() || width <= 0.0 || height <= 0.0 {
        return Err(ChartError::InvalidViewport {
            width: size.width,
            height: size.height,
        });
    }
    Ok(PlotArea::new(margins, width, height))
}

fn x_encoding(config: &ChartConfig) -> XEncoding {
    match (config.x_axis.kind, config.x_axis.temporal_input) {
        (ScaleKind::Temporal, TemporalInput::Year) => XEncoding::YearStart,
        _ => XEncoding::Identity,
    }
}

/// Data-dependent controller state restored when a pass fails midway.
struct DataSnapshot {
    state: ChartState,
    store: SeriesStore,
    scales: ScaleManager,
    x_plan: TickPlan,
    y_plan: TickPlan,
    visible_points: usize,
}

/// Interactive line chart bound to one drawing backend.
///
/// Every operation runs to completion synchronously; animation is left to
/// the renderer.
pub struct ChartController<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    state: ChartState,
    container: Option<ContainerRef>,
    plot: Option<PlotArea>,
    scales: ScaleManager,
    store: SeriesStore,
    x_plan: TickPlan,
    y_plan: TickPlan,
    visible_points: usize,
    pointer: PointerState,
}

impl<R: Renderer> ChartController<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let scales = Self::build_scales(&config)?;
        let x_plan = Self::x_plan_for(&config, &scales)?;
        let y_plan = Self::y_plan_for(&config, &scales)?;
        let store = SeriesStore::new(config.smoothing, x_encoding(&config));

        Ok(Self {
            renderer,
            config,
            state: ChartState::Uninitialized,
            container: None,
            plot: None,
            scales,
            store,
            x_plan,
            y_plan,
            visible_points: 0,
            pointer: PointerState::default(),
        })
    }

    fn build_scales(config: &ChartConfig) -> ChartResult<ScaleManager> {
        let mut scales = ScaleManager::new(
            config.x_axis.kind,
            config.x_axis.clamp,
            config.y_axis.clamp,
            config.y_axis.max_ticks,
            Utc::now(),
        )?;
        if let Some(domain) = config.x_axis.domain {
            scales.set_x_domain(domain)?;
        }
        if let Some(domain) = config.y_axis.domain {
            scales.set_y_domain(domain)?;
        }
        Ok(scales)
    }

    fn x_plan_for(config: &ChartConfig, scales: &ScaleManager) -> ChartResult<TickPlan> {
        plan(
            scales.x_domain(),
            scales.kind().is_temporal(),
            config.x_axis.min_ticks,
            config.x_axis.max_ticks,
            &LabelAffixes::default(),
        )
    }

    fn y_plan_for(config: &ChartConfig, scales: &ScaleManager) -> ChartResult<TickPlan> {
        plan(
            scales.y_domain(),
            false,
            0,
            config.y_axis.max_ticks,
            &config.y_axis.affixes,
        )
    }

    fn require_bound(&self, operation: &'static str) -> ChartResult<PlotArea> {
        match (self.state, self.plot) {
            (ChartState::Uninitialized, _) | (_, None) => {
                Err(ChartError::NotInitialized { operation })
            }
            (_, Some(plot)) => Ok(plot),
        }
    }

    /// Binds the chart to a container, creating the surface and base scales.
    ///
    /// Binding again discards the previous surface and every loaded series.
    pub fn bind(&mut self, container: ContainerRef) -> ChartResult<()> {
        let size = match &container {
            ContainerRef::Element(size) => *size,
            ContainerRef::Selector(selector) => self
                .renderer
                .resolve_container(selector)
                .ok_or_else(|| ChartError::UnresolvedContainer(selector.clone()))?,
        };
        let plot = plot_area(&self.config, size)?;

        if self.state != ChartState::Uninitialized {
            self.renderer.remove_surface()?;
            self.store.clear();
            self.pointer.reset();
            self.visible_points = 0;
            debug!("previous container released");
        }
        self.state = ChartState::Uninitialized;
        self.renderer.create_surface(size)?;

        let mut scales = Self::build_scales(&self.config)?;
        scales.set_ranges(plot.width, plot.height)?;
        self.x_plan = Self::x_plan_for(&self.config, &scales)?;
        self.y_plan = Self::y_plan_for(&self.config, &scales)?;
        self.scales = scales;
        self.config.size = Some(size);
        self.container = Some(container);
        self.plot = Some(plot);
        self.state = ChartState::Initialized;

        debug!(
            width = size.width,
            height = size.height,
            chart_width = plot.width,
            chart_height = plot.height,
            "chart bound to container"
        );
        self.render(SeriesReconciliation::default(), false)
    }

    #[must_use]
    pub fn state(&self) -> ChartState {
        self.state
    }

    #[must_use]
    pub fn container(&self) -> Option<&ContainerRef> {
        self.container.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn margins(&self) -> Margins {
        self.config.margins
    }

    /// Surface size; the container size once bound.
    #[must_use]
    pub fn size(&self) -> Option<Viewport> {
        self.config.size
    }

    #[must_use]
    pub fn width(&self) -> Option<u32> {
        self.config.size.map(|size| size.width)
    }

    #[must_use]
    pub fn height(&self) -> Option<u32> {
        self.config.size.map(|size| size.height)
    }

    #[must_use]
    pub fn chart_width(&self) -> Option<f64> {
        self.plot.map(|plot| plot.width)
    }

    #[must_use]
    pub fn chart_height(&self) -> Option<f64> {
        self.plot.map(|plot| plot.height)
    }

    #[must_use]
    pub fn smoothing_window(&self) -> SmoothingWindow {
        self.store.smoothing_window()
    }

    #[must_use]
    pub fn scales(&self) -> &ScaleManager {
        &self.scales
    }

    #[must_use]
    pub fn x_tick_plan(&self) -> &TickPlan {
        &self.x_plan
    }

    #[must_use]
    pub fn y_tick_plan(&self) -> &TickPlan {
        &self.y_plan
    }

    #[must_use]
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.store.get(name)
    }

    pub fn series_iter(&self) -> impl Iterator<Item = &Series> {
        self.store.iter()
    }

    /// Largest per-series count of samples inside the X domain.
    #[must_use]
    pub fn visible_points(&self) -> usize {
        self.visible_points
    }

    #[must_use]
    pub fn pointer_state(&self) -> PointerState {
        self.pointer
    }

    /// Replaces the margins; a bound chart is laid out again and redrawn.
    pub fn set_margins(&mut self, margins: Margins) -> ChartResult<()> {
        let margins = margins.validate()?;
        let previous = self.config.margins;
        self.config.margins = margins;
        if self.state == ChartState::Uninitialized {
            return Ok(());
        }
        let Some(size) = self.config.size else {
            return Ok(());
        };
        if let Err(err) = self.relayout(size) {
            self.config.margins = previous;
            return Err(err);
        }
        self.render_updated(true)
    }

    pub fn set_width(&mut self, width: u32) -> ChartResult<()> {
        let height = self
            .config
            .size
            .map(|size| size.height)
            .ok_or(ChartError::NotInitialized {
                operation: "set_width",
            })?;
        self.set_size(Viewport::new(width, height))
    }

    pub fn set_height(&mut self, height: u32) -> ChartResult<()> {
        let width = self
            .config
            .size
            .map(|size| size.width)
            .ok_or(ChartError::NotInitialized {
                operation: "set_height",
            })?;
        self.set_size(Viewport::new(width, height))
    }

    /// Resizes the surface; series data is left untouched.
    pub fn set_size(&mut self, size: Viewport) -> ChartResult<()> {
        self.require_bound("set_size")?;
        plot_area(&self.config, size)?;
        self.renderer.resize_surface(size)?;
        self.relayout(size)?;
        debug!(width = size.width, height = size.height, "chart resized");
        self.render_updated(true)
    }

    fn relayout(&mut self, size: Viewport) -> ChartResult<()> {
        let plot = plot_area(&self.config, size)?;
        let refresh = self.scales.set_ranges(plot.width, plot.height)?;
        self.config.size = Some(size);
        self.plot = Some(plot);
        self.rebuild_plans(refresh)
    }

    /// Changes the moving-average window and re-derives every series.
    pub fn set_smoothing_window(&mut self, window: impl Into<SmoothingWindow>) -> ChartResult<()> {
        let window = window.into();
        let snapshot = self.snapshot();
        let result = self.apply_smoothing(window);
        if result.is_err() {
            self.restore(snapshot);
        }
        result
    }

    fn apply_smoothing(&mut self, window: SmoothingWindow) -> ChartResult<()> {
        self.store.set_smoothing_window(window)?;
        self.config.smoothing = window;
        if self.state != ChartState::Ready {
            return Ok(());
        }
        self.follow_data_domains()?;
        self.render_updated(true)
    }

    /// Pins the X domain; it no longer follows loaded data.
    pub fn set_x_domain(&mut self, domain: Domain) -> ChartResult<()> {
        let domain = domain.validate("x")?;
        self.config.x_axis.domain = Some(domain);
        let refresh = self.scales.set_x_domain(domain)?;
        self.after_domain_change(refresh)
    }

    /// Pins the Y domain before nice rounding; it no longer follows loaded data.
    pub fn set_y_domain(&mut self, domain: Domain) -> ChartResult<()> {
        let domain = domain.validate("y")?;
        self.config.y_axis.domain = Some(domain);
        let refresh = self.scales.set_y_domain(domain)?;
        self.after_domain_change(refresh)
    }

    /// Returns the X domain to the data extent, or the default before data.
    pub fn reset_x_domain(&mut self) -> ChartResult<()> {
        self.config.x_axis.domain = None;
        let domain = self
            .store
            .x_extent()
            .unwrap_or_else(|| default_x_domain(self.config.x_axis.kind, Utc::now()));
        let refresh = self.scales.set_x_domain(domain)?;
        self.after_domain_change(refresh)
    }

    /// Returns the Y domain to the data extent, or `[0, 1]` before data.
    pub fn reset_y_domain(&mut self) -> ChartResult<()> {
        self.config.y_axis.domain = None;
        let domain = self.store.y_extent().unwrap_or(Domain::new(0.0, 1.0));
        let refresh = self.scales.set_y_domain(domain)?;
        self.after_domain_change(refresh)
    }

    fn after_domain_change(&mut self, refresh: AxisRefresh) -> ChartResult<()> {
        if !refresh.any() {
            return Ok(());
        }
        self.rebuild_plans(refresh)?;
        if refresh.x {
            self.visible_points = self.store.max_points_inside(self.scales.x_domain());
        }
        if self.state == ChartState::Uninitialized {
            return Ok(());
        }
        self.render_updated(true)
    }

    /// Replaces every series and redraws with enter, update and exit sets.
    ///
    /// If the pass fails the previous series, domains and plans are kept.
    pub fn load_series(&mut self, inputs: Vec<SeriesInput>) -> ChartResult<SeriesReconciliation> {
        self.require_bound("load_series")?;
        let point_count: usize = inputs.iter().map(|input| input.raw_points.len()).sum();
        let snapshot = self.snapshot();
        let result = self.apply_series(inputs);
        if result.is_err() {
            self.restore(snapshot);
            return result;
        }

        debug!(
            series_count = self.store.len(),
            point_count,
            visible_points = self.visible_points,
            "series loaded"
        );
        self.refresh_highlight()?;
        result
    }

    fn apply_series(&mut self, inputs: Vec<SeriesInput>) -> ChartResult<SeriesReconciliation> {
        let reconciliation = self.store.replace_all(inputs)?;
        self.state = ChartState::Ready;
        self.follow_data_domains()?;
        self.render(reconciliation.clone(), true)?;
        Ok(reconciliation)
    }

    fn snapshot(&self) -> DataSnapshot {
        DataSnapshot {
            state: self.state,
            store: self.store.clone(),
            scales: self.scales.clone(),
            x_plan: self.x_plan.clone(),
            y_plan: self.y_plan.clone(),
            visible_points: self.visible_points,
        }
    }

    fn restore(&mut self, snapshot: DataSnapshot) {
        self.state = snapshot.state;
        self.store = snapshot.store;
        self.scales = snapshot.scales;
        self.x_plan = snapshot.x_plan;
        self.y_plan = snapshot.y_plan;
        self.visible_points = snapshot.visible_points;
        self.config.smoothing = self.store.smoothing_window();
    }

    /// Moves unpinned domains to the data extent and refreshes dependents.
    fn follow_data_domains(&mut self) -> ChartResult<()> {
        let mut refresh = AxisRefresh::NONE;
        if self.config.x_axis.domain.is_none() {
            if let Some(extent) = self.store.x_extent() {
                refresh = refresh.union(self.scales.set_x_domain(extent)?);
            }
        }
        if self.config.y_axis.domain.is_none() {
            if let Some(extent) = self.store.y_extent() {
                refresh = refresh.union(self.scales.set_y_domain(extent)?);
            }
        }
        self.rebuild_plans(refresh)?;
        self.visible_points = self.store.max_points_inside(self.scales.x_domain());
        Ok(())
    }

    fn rebuild_plans(&mut self, refresh: AxisRefresh) -> ChartResult<()> {
        if refresh.x {
            self.x_plan = Self::x_plan_for(&self.config, &self.scales)?;
        }
        if refresh.y {
            self.y_plan = Self::y_plan_for(&self.config, &self.scales)?;
        }
        if refresh.any() {
            debug!(
                x_interval = ?self.x_plan.interval,
                x_stride = self.x_plan.stride,
                x_ticks = self.x_plan.len(),
                y_ticks = self.y_plan.len(),
                "tick plans rebuilt"
            );
        }
        Ok(())
    }

    /// Draws the current state again with every series marked as updated.
    pub fn redraw(&mut self) -> ChartResult<()> {
        self.require_bound("redraw")?;
        self.render_updated(true)
    }

    fn render_updated(&mut self, animate: bool) -> ChartResult<()> {
        let reconciliation = SeriesReconciliation {
            updated: self.store.names().map(str::to_owned).collect(),
            ..SeriesReconciliation::default()
        };
        self.render(reconciliation, animate)
    }

    /// Frame for the current state, `None` before binding.
    #[must_use]
    pub fn build_render_frame(
        &self,
        reconciliation: SeriesReconciliation,
        animate: bool,
    ) -> Option<RenderFrame> {
        let plot = self.plot?;
        let surface = self.config.size?;
        let transition = animate.then_some(self.config.transition);
        Some(self.frame_context(plot, surface).render_frame(reconciliation, transition))
    }

    fn frame_context(&self, plot: PlotArea, surface: Viewport) -> FrameContext<'_> {
        FrameContext {
            config: &self.config,
            surface,
            plot,
            scales: &self.scales,
            store: &self.store,
            x_plan: &self.x_plan,
            y_plan: &self.y_plan,
        }
    }

    fn render(&mut self, reconciliation: SeriesReconciliation, animate: bool) -> ChartResult<()> {
        let frame = self
            .build_render_frame(reconciliation, animate)
            .ok_or(ChartError::NotInitialized { operation: "render" })?;
        self.renderer.render(&frame)
    }

    /// Dispatches one pointer event from the host.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> ChartResult<()> {
        self.require_bound("handle_pointer")?;
        match event {
            PointerEvent::Enter => {
                self.pointer.enter();
                self.renderer.set_highlight_visible(true)
            }
            PointerEvent::Leave => {
                self.pointer.leave();
                self.renderer.set_highlight_visible(false)
            }
            PointerEvent::Move { x, .. } => {
                self.pointer.last_x = Some(x);
                self.highlight_at(x)
            }
        }
    }

    fn refresh_highlight(&mut self) -> ChartResult<()> {
        match self.pointer.last_x {
            Some(x) if self.pointer.inside => self.highlight_at(x),
            _ => Ok(()),
        }
    }

    fn highlight_at(&mut self, pointer_x: f64) -> ChartResult<()> {
        let plot = self.require_bound("handle_pointer")?;
        let Some(surface) = self.config.size else {
            return Err(ChartError::NotInitialized {
                operation: "handle_pointer",
            });
        };
        if self.store.iter().all(|series| series.derived_points().is_empty()) {
            return Ok(());
        }

        let slot = tick_width(plot.width, self.visible_points);
        let domain_x = pointer_domain_x(self.scales.x(), pointer_x, slot);
        let frame = self.frame_context(plot, surface).highlight_frame(domain_x);
        self.pointer.domain_x = Some(domain_x);

        trace!(
            pointer_x,
            domain_x,
            tick_width = slot,
            markers = frame.markers.len(),
            "highlight updated"
        );
        self.renderer.highlight(&frame)
    }
}
