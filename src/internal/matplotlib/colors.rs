//! matplotlib.colors port: color spec parsing and `ListedColormap`.

use crate::style::Color;
use crate::{Error, Result};

/// The base single-letter colors plus the few names tracking plots use.
const NAMED: &[(&str, Color)] = &[
    ("b", Color::rgb(0.0, 0.0, 1.0)),
    ("g", Color::rgb(0.0, 0.5, 0.0)),
    ("r", Color::rgb(1.0, 0.0, 0.0)),
    ("c", Color::rgb(0.0, 0.75, 0.75)),
    ("m", Color::rgb(0.75, 0.0, 0.75)),
    ("y", Color::rgb(0.75, 0.75, 0.0)),
    ("k", Color::rgb(0.0, 0.0, 0.0)),
    ("w", Color::rgb(1.0, 1.0, 1.0)),
    ("blue", Color::rgb(0.0, 0.0, 1.0)),
    ("green", Color::rgb(0.0, 0.5019607843137255, 0.0)),
    ("red", Color::rgb(1.0, 0.0, 0.0)),
    ("black", Color::rgb(0.0, 0.0, 0.0)),
    ("white", Color::rgb(1.0, 1.0, 1.0)),
    ("gray", Color::rgb(0.5019607843137255, 0.5019607843137255, 0.5019607843137255)),
    ("grey", Color::rgb(0.5019607843137255, 0.5019607843137255, 0.5019607843137255)),
    ("C0", Color::DEFAULT_PATCH),
];

/// Equivalent of `matplotlib.colors.to_rgba` for the supported spec forms.
pub fn to_rgba(spec: &str) -> Result<Color> {
    let spec = spec.trim();

    if spec.eq_ignore_ascii_case("none") {
        return Ok(Color::rgba(0.0, 0.0, 0.0, 0.0));
    }

    if let Some(hex) = spec.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| Error::InvalidStyle(format!("invalid hex color '{}'", spec)));
    }

    NAMED
        .iter()
        .find(|(name, _)| *name == spec || (name.len() > 1 && name.eq_ignore_ascii_case(spec)))
        .map(|(_, c)| *c)
        .ok_or_else(|| Error::InvalidStyle(format!("unknown color '{}'", spec)))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return None;
    }
    let channel = |i: usize| -> Option<f64> {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .ok()
            .map(|v| v as f64 / 255.0)
    };
    let a = if hex.len() == 8 { channel(6)? } else { 1.0 };
    Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a))
}

/// Colormap built from a fixed list of colors.
///
/// Integer lookups index the list directly; indices past the end take the
/// `over` color, which defaults to the last entry.
#[derive(Debug, Clone)]
pub struct ListedColormap {
    colors: Vec<Color>,
}

impl ListedColormap {
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::InvalidStyle("colormap needs at least one color".to_string()));
        }
        Ok(Self { colors })
    }

    pub fn from_rgb_rows(rows: &[[f64; 3]]) -> Result<Self> {
        Self::new(rows.iter().map(|[r, g, b]| Color::rgb(*r, *g, *b)).collect())
    }

    /// Number of entries (`cmap.N`).
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// `cmap(i)` for an integer `i`.
    pub fn index(&self, i: usize) -> Color {
        self.colors[i.min(self.colors.len() - 1)]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}
