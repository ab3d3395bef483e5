//! Colors, markers, line styles and the explicit styling structure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::internal::matplotlib::to_rgba;
use crate::{Error, Result};

/// An RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// matplotlib's default patch color `C0`.
    pub const DEFAULT_PATCH: Color = Color::rgb(0.12156862745098039, 0.4666666666666667, 0.7058823529411765);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Components as 8-bit channels.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let [r, g, b, _] = self.to_rgba8();
        [r, g, b]
    }

    /// Components and alpha as 8-bit channels, clamped to `[0, 1]` first.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse a matplotlib color spec: single letters (`"r"`, `"k"`), CSS-ish
    /// names, `#rrggbb` / `#rrggbbaa`, `"none"`.
    fn from_str(s: &str) -> Result<Self> {
        to_rgba(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb8();
        write!(f, "rgb({},{},{})", r, g, b)
    }
}

/// Point marker glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// `*`
    #[serde(rename = "*")]
    Star,
    /// `+`
    #[serde(rename = "+")]
    Plus,
    /// `o`
    #[serde(rename = "o")]
    Circle,
    /// `x`
    #[serde(rename = "x")]
    Cross,
    /// `.`
    #[serde(rename = ".")]
    Point,
}

impl FromStr for Marker {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "*" => Ok(Marker::Star),
            "+" => Ok(Marker::Plus),
            "o" => Ok(Marker::Circle),
            "x" => Ok(Marker::Cross),
            "." => Ok(Marker::Point),
            other => Err(Error::InvalidStyle(format!("unknown marker '{}'", other))),
        }
    }
}

/// Line styles; `None` draws markers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    #[serde(rename = "-")]
    Solid,
    #[serde(rename = "--")]
    Dashed,
    #[serde(rename = ":")]
    Dotted,
    #[serde(rename = "-.")]
    DashDot,
    #[serde(rename = "None")]
    None,
}

impl FromStr for LineStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            "-." | "dashdot" => Ok(LineStyle::DashDot),
            "None" | "none" | "" | " " => Ok(LineStyle::None),
            other => Err(Error::InvalidStyle(format!("unknown linestyle '{}'", other))),
        }
    }
}

/// Caller-supplied styling overrides.
///
/// Every field left `None` keeps the default the plotting operation would use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub color: Option<Color>,
    pub alpha: Option<f64>,
    pub marker: Option<Marker>,
    pub linestyle: Option<LineStyle>,
    pub edgecolor: Option<Color>,
    pub facecolor: Option<Color>,
}

impl PlotStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn linestyle(mut self, linestyle: LineStyle) -> Self {
        self.linestyle = Some(linestyle);
        self
    }

    pub fn edgecolor(mut self, edgecolor: Color) -> Self {
        self.edgecolor = Some(edgecolor);
        self
    }

    pub fn facecolor(mut self, facecolor: Color) -> Self {
        self.facecolor = Some(facecolor);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(a) = self.alpha {
            if !(0.0..=1.0).contains(&a) {
                return Err(Error::InvalidStyle(format!("alpha {} outside [0, 1]", a)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_markers_and_linestyles() {
        assert_eq!("*".parse::<Marker>().unwrap(), Marker::Star);
        assert_eq!("+".parse::<Marker>().unwrap(), Marker::Plus);
        assert!("?".parse::<Marker>().is_err());

        assert_eq!("None".parse::<LineStyle>().unwrap(), LineStyle::None);
        assert_eq!("--".parse::<LineStyle>().unwrap(), LineStyle::Dashed);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::RED.to_string(), "rgb(255,0,0)");
        assert_eq!(Color::rgb(0.5, 0.5, 0.5).to_rgb8(), [128, 128, 128]);
        assert_eq!(Color::RED.with_alpha(0.5).to_rgba8(), [255, 0, 0, 128]);
        assert_eq!(Color::rgba(1.5, -0.2, 0.0, 2.0).to_rgba8(), [255, 0, 0, 255]);
    }

    #[test]
    fn test_style_builder_and_validation() {
        let style = PlotStyle::new().alpha(0.4).marker(Marker::Circle);
        assert_eq!(style.alpha, Some(0.4));
        assert!(style.color.is_none());
        assert!(style.validate().is_ok());
        assert!(PlotStyle::new().alpha(1.5).validate().is_err());
    }
}
