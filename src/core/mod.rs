pub mod locate;
pub mod nice;
pub mod scale;
pub mod smoothing;
pub mod tick_plan;
pub mod time_interval;
pub mod types;

pub use locate::locate;
pub use scale::{ContinuousScale, ScaleKind};
pub use smoothing::{SmoothingWindow, smooth};
pub use tick_plan::{LabelAffixes, TickFormat, TickInterval, TickPlan, plan};
pub use time_interval::TimeInterval;
pub use types::{
    DataPoint, Domain, Margins, Viewport, datetime_to_unix_seconds, unix_seconds_to_datetime,
    year_start_unix_seconds,
};
