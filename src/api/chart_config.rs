use serde::{Deserialize, Serialize};

use crate::core::{Domain, LabelAffixes, Margins, ScaleKind, SmoothingWindow, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, StrokeStyle, TransitionSpec};

/// How raw X values of a temporal chart are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemporalInput {
    /// Raw X is a calendar year, mapped to January 1st 00:00 UTC after smoothing.
    #[default]
    Year,
    /// Raw X already holds Unix seconds.
    UnixSeconds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XAxisConfig {
    #[serde(default)]
    pub kind: ScaleKind,
    #[serde(default)]
    pub temporal_input: TemporalInput,
    /// Fewest boundaries a calendar unit must produce to be chosen.
    #[serde(default = "default_x_min_ticks")]
    pub min_ticks: usize,
    /// Tick budget for linear X axes; temporal axes use their unit's budget.
    #[serde(default = "default_x_max_ticks")]
    pub max_ticks: usize,
    #[serde(default = "default_clamp")]
    pub clamp: bool,
    /// Fixed domain; `None` follows the loaded data.
    #[serde(default)]
    pub domain: Option<Domain>,
}

impl Default for XAxisConfig {
    fn default() -> Self {
        Self {
            kind: ScaleKind::Temporal,
            temporal_input: TemporalInput::Year,
            min_ticks: default_x_min_ticks(),
            max_ticks: default_x_max_ticks(),
            clamp: default_clamp(),
            domain: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisConfig {
    #[serde(default = "default_y_max_ticks")]
    pub max_ticks: usize,
    #[serde(default = "default_clamp")]
    pub clamp: bool,
    #[serde(default)]
    pub affixes: LabelAffixes,
    /// Fixed domain before nice rounding; `None` follows the loaded data.
    #[serde(default)]
    pub domain: Option<Domain>,
}

impl Default for YAxisConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_y_max_ticks(),
            clamp: default_clamp(),
            affixes: LabelAffixes::default(),
            domain: None,
        }
    }
}

/// Legend box geometry, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub title: String,
    pub width: f64,
    /// Gap between the plot area and the legend box.
    pub gap: f64,
    pub title_height: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    pub item_spacing: f64,
    pub item_size: f64,
    pub outline: StrokeStyle,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            title: "Legend".to_owned(),
            width: 164.0,
            gap: 24.0,
            title_height: 32.0,
            padding_top: 6.0,
            padding_bottom: 4.0,
            padding_left: 4.0,
            padding_right: 4.0,
            item_spacing: 2.0,
            item_size: 16.0,
            outline: StrokeStyle::new(Color::from_hex(0x808080), 1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Extra width of the pointer capture area, split evenly on both sides.
    pub mouse_padding: f64,
    pub marker_radius: f64,
    pub marker_stroke: StrokeStyle,
    pub guide_line: StrokeStyle,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            mouse_padding: 12.0,
            marker_radius: 4.0,
            marker_stroke: StrokeStyle::new(Color::from_hex(0x808080), 1.0, 1.0),
            guide_line: StrokeStyle::new(Color::from_hex(0xa9a9a9), 1.0, 1.0),
        }
    }
}

/// Gridline strokes; `emphasized` marks the zero line and the X baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridStyle {
    pub regular: StrokeStyle,
    pub emphasized: StrokeStyle,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            regular: StrokeStyle::new(Color::from_hex(0xa9a9a9), 0.7, 0.3),
            emphasized: StrokeStyle::new(Color::BLACK, 1.0, 1.0),
        }
    }
}

/// Public chart configuration.
///
/// Serializable so host applications can persist chart setup without
/// inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Surface size; replaced by the container size on `bind`.
    #[serde(default)]
    pub size: Option<Viewport>,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub smoothing: SmoothingWindow,
    #[serde(default)]
    pub x_axis: XAxisConfig,
    #[serde(default)]
    pub y_axis: YAxisConfig,
    #[serde(default)]
    pub legend: LegendConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub transition: TransitionSpec,
    #[serde(default)]
    pub grid: GridStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            size: None,
            margins: Margins::default(),
            smoothing: SmoothingWindow::NONE,
            x_axis: XAxisConfig::default(),
            y_axis: YAxisConfig::default(),
            legend: LegendConfig::default(),
            interaction: InteractionConfig::default(),
            transition: TransitionSpec::default(),
            grid: GridStyle::default(),
        }
    }
}

impl ChartConfig {
    /// Temporal chart with default settings.
    #[must_use]
    pub fn temporal() -> Self {
        Self::default()
    }

    /// Linear (numeric X) chart with default settings.
    #[must_use]
    pub fn linear() -> Self {
        let mut config = Self::default();
        config.x_axis.kind = ScaleKind::Linear;
        config
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_smoothing(mut self, window: impl Into<SmoothingWindow>) -> Self {
        self.smoothing = window.into();
        self
    }

    #[must_use]
    pub fn with_temporal_input(mut self, input: TemporalInput) -> Self {
        self.x_axis.temporal_input = input;
        self
    }

    #[must_use]
    pub fn with_x_min_ticks(mut self, min_ticks: usize) -> Self {
        self.x_axis.min_ticks = min_ticks;
        self
    }

    #[must_use]
    pub fn with_x_domain(mut self, domain: Domain) -> Self {
        self.x_axis.domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_y_domain(mut self, domain: Domain) -> Self {
        self.y_axis.domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_y_affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.y_axis.affixes = LabelAffixes::new(prefix, suffix);
        self
    }

    #[must_use]
    pub fn with_legend_width(mut self, width: f64) -> Self {
        self.legend.width = width;
        self
    }

    #[must_use]
    pub fn with_transition(mut self, transition: TransitionSpec) -> Self {
        self.transition = transition;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.margins.validate()?;
        self.transition.validate()?;
        if self.x_axis.min_ticks == 0 {
            return Err(ChartError::InvalidData(
                "x axis min ticks must be > 0".to_owned(),
            ));
        }
        if self.x_axis.max_ticks == 0 || self.y_axis.max_ticks == 0 {
            return Err(ChartError::InvalidData(
                "axis max ticks must be > 0".to_owned(),
            ));
        }
        if let Some(domain) = self.x_axis.domain {
            domain.validate("x")?;
        }
        if let Some(domain) = self.y_axis.domain {
            domain.validate("y")?;
        }
        if let Some(size) = self.size {
            if !size.is_valid() {
                return Err(ChartError::InvalidViewport {
                    width: size.width,
                    height: size.height,
                });
            }
        }
        for (field, value) in [
            ("legend width", self.legend.width),
            ("legend gap", self.legend.gap),
            ("mouse padding", self.interaction.mouse_padding),
            ("marker radius", self.interaction.marker_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{field} must be finite and >= 0"
                )));
            }
        }
        self.grid.regular.validate()?;
        self.grid.emphasized.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }
}

fn default_x_min_ticks() -> usize {
    4
}

fn default_x_max_ticks() -> usize {
    10
}

fn default_y_max_ticks() -> usize {
    10
}

fn default_clamp() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::{ChartConfig, TemporalInput};
    use crate::core::{Margins, ScaleKind};

    #[test]
    fn empty_json_yields_defaults() {
        let config = ChartConfig::from_json_str("{}").expect("parse");
        assert_eq!(config, ChartConfig::default());
        assert_eq!(config.margins, Margins::new(50.0, 50.0, 50.0, 50.0));
        assert_eq!(config.smoothing.get(), 1);
        assert_eq!(config.x_axis.kind, ScaleKind::Temporal);
        assert_eq!(config.x_axis.temporal_input, TemporalInput::Year);
    }

    #[test]
    fn json_round_trip_keeps_overrides() {
        let config = ChartConfig::linear()
            .with_smoothing(6_u32)
            .with_y_affixes("$", "");
        let json = config.to_json_pretty().expect("serialize");
        let parsed = ChartConfig::from_json_str(&json).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn negative_margin_is_rejected() {
        let config = ChartConfig::default().with_margins(Margins::new(-1.0, 0.0, 0.0, 0.0));
        assert!(config.validate().is_err());
    }
}
