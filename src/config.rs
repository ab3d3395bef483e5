//! Plotting configuration.

use serde::{Deserialize, Serialize};

use crate::style::{Color, Marker};
use crate::{Error, Result};

/// Configuration for the [`crate::Plotter`].
///
/// Defaults reproduce the look of the Python MHT plotting helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Standard deviations spanned by every covariance ellipse.
    pub n_std: f64,

    /// Opacity of the ellipses drawn along a track trace.
    pub trace_ellipse_alpha: f64,

    /// Opacity of the ellipses drawn at current track positions.
    pub hypothesis_ellipse_alpha: f64,

    /// Marker at each historical position of a trace.
    pub trace_marker: Marker,

    /// Marker and color of unassigned detections.
    pub unassigned_marker: Marker,
    pub unassigned_color: Color,

    /// Marker and color of scan reports.
    pub report_marker: Marker,
    pub report_color: Color,

    /// Edge color of current track positions.
    pub scatter_edgecolor: Color,

    /// Skip lines that would have no points instead of adding empty artists.
    pub skip_empty: bool,
}

impl PlotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with a different ellipse confidence width.
    pub fn with_n_std(n_std: f64) -> Self {
        Self {
            n_std,
            ..Self::default()
        }
    }

    /// Check ranges. `Plotter::new` calls this.
    pub fn validate(&self) -> Result<()> {
        if !self.n_std.is_finite() || self.n_std <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "n_std must be finite and positive, got {}",
                self.n_std
            )));
        }

        for (name, alpha) in [
            ("trace_ellipse_alpha", self.trace_ellipse_alpha),
            ("hypothesis_ellipse_alpha", self.hypothesis_ellipse_alpha),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be in [0, 1], got {}",
                    name, alpha
                )));
            }
        }

        Ok(())
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            n_std: 2.0,
            trace_ellipse_alpha: 0.3,
            hypothesis_ellipse_alpha: 0.5,
            trace_marker: Marker::Star,
            unassigned_marker: Marker::Star,
            unassigned_color: Color::RED,
            report_marker: Marker::Plus,
            report_color: Color::RED,
            scatter_edgecolor: Color::BLACK,
            skip_empty: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlotConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.n_std, 2.0);
        assert_eq!(config.report_marker, Marker::Plus);
    }

    #[test]
    fn test_invalid_n_std() {
        assert!(PlotConfig::with_n_std(0.0).validate().is_err());
        assert!(PlotConfig::with_n_std(f64::NAN).validate().is_err());
        assert!(PlotConfig::with_n_std(3.0).validate().is_ok());
    }

    #[test]
    fn test_invalid_alpha() {
        let config = PlotConfig {
            hypothesis_ellipse_alpha: 1.2,
            ..PlotConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("hypothesis_ellipse_alpha"));
    }
}
