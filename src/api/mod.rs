//! Chart orchestration: configuration, scales, series storage and the
//! controller that turns them into render instructions.

mod chart_config;
mod chart_controller;
mod frame_builder;
mod scale_manager;
mod series_store;
#[cfg(feature = "data-submit")]
mod submit;

pub use chart_config::{
    ChartConfig, GridStyle, InteractionConfig, LegendConfig, TemporalInput, XAxisConfig,
    YAxisConfig,
};
pub use chart_controller::{ChartController, ChartState, ContainerRef};
pub use frame_builder::live_value_text;
pub use scale_manager::{AxisRefresh, GridEmphasis, ScaleManager, default_x_domain};
pub use series_store::{Series, SeriesInput, SeriesStore, XEncoding, reconcile};
#[cfg(feature = "data-submit")]
pub use submit::{submit_json, submit_series};
