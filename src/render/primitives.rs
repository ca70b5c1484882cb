use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds an opaque color from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn from_hex(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xff) as f64 / 255.0,
            ((rgb >> 8) & 0xff) as f64 / 255.0,
            (rgb & 0xff) as f64 / 255.0,
        )
    }

    /// `#rrggbb`, alpha is dropped.
    #[must_use]
    pub fn to_hex_string(self) -> String {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.red),
            channel(self.green),
            channel(self.blue)
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Ten-color categorical palette; series take colors by position.
pub const CATEGORY10: [Color; 10] = [
    Color::from_hex(0x1f77b4),
    Color::from_hex(0xff7f0e),
    Color::from_hex(0x2ca02c),
    Color::from_hex(0xd62728),
    Color::from_hex(0x9467bd),
    Color::from_hex(0x8c564b),
    Color::from_hex(0xe377c2),
    Color::from_hex(0x7f7f7f),
    Color::from_hex(0xbcbd22),
    Color::from_hex(0x17becf),
];

/// Palette color for the series at `index`, wrapping after ten.
#[must_use]
pub fn palette_color(index: usize) -> Color {
    CATEGORY10[index % CATEGORY10.len()]
}

/// Stroke attributes for gridlines, baselines and guide lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub opacity: f64,
}

impl StrokeStyle {
    #[must_use]
    pub const fn new(color: Color, width: f64, opacity: f64) -> Self {
        Self {
            color,
            width,
            opacity,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ChartError::InvalidData(
                "stroke opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Timing of an animated attribute change.
///
/// Easing is polynomial in-out with the given exponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub delay_ms: u32,
    pub duration_ms: u32,
    pub ease_exponent: f64,
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            duration_ms: 750,
            ease_exponent: 2.5,
        }
    }
}

impl TransitionSpec {
    /// Eased progress for linear progress `t` in `[0, 1]`.
    #[must_use]
    pub fn ease(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0) * 2.0;
        if t <= 1.0 {
            t.powf(self.ease_exponent) / 2.0
        } else {
            (2.0 - (2.0 - t).powf(self.ease_exponent)) / 2.0
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.ease_exponent.is_finite() || self.ease_exponent <= 0.0 {
            return Err(ChartError::InvalidData(
                "transition ease exponent must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}
