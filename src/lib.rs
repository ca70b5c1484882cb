//! smoothline-chart: headless interactive line chart engine.
//!
//! The crate owns smoothing, adaptive tick planning, scales, series storage
//! and pointer lookup. Drawing is delegated to a [`render::Renderer`]
//! implementation supplied by the host.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartController};
pub use error::{ChartError, ChartResult};
