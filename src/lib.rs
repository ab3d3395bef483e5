//! # mht-plot-rs - Plotting helpers for Multi-Hypothesis Tracking
//!
//! Draws the output of an MHT tracker: track traces, covariance ellipses,
//! current hypotheses and raw scan reports, in the style of the Python MHT
//! plotting helpers.
//!
//! ## Features
//!
//! - Reads any tracker through small read-only traits (`TrackSource`,
//!   `HypothesisSource`, `ScanSource`)
//! - Reproducible per-track colors from a fixed seeded palette
//! - n-sigma covariance ellipses from 2×2 positional covariances
//! - Recording `Axes` canvas
//! - Optional Rerun output (feature `visualization`)
//! - Optional Python bindings (feature `python`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use mht_plot_rs::{plot, RerunVisualizer};
//!
//! let mut viz = RerunVisualizer::new_to_file("mht", "tracks.rrd")?;
//! plot::plot_hypothesis_trace(&mut viz, &hypothesis, 0, true)?;
//! plot::plot_scan(&mut viz, &scan)?;
//! viz.flush()?;
//! ```

// Internal modules (ports of numpy and matplotlib pieces)
pub(crate) mod internal;

// Public modules
pub mod canvas;
pub mod config;
pub mod ellipse;
pub mod model;
pub mod palette;
pub mod plot;
pub mod style;
pub mod utils;

// Optional modules
#[cfg(feature = "visualization")]
pub mod visualization;

#[cfg(feature = "python")]
pub mod python;

// Re-exports for convenience
pub use canvas::{Axes, Canvas, Ellipse, Line2D, ScatterPoint};
pub use config::PlotConfig;
pub use ellipse::{covariance_ellipse, EllipseGeometry};
pub use internal::matplotlib::ListedColormap;
pub use model::{
    GaussianEstimate, GlobalHypothesis, HypothesisSource, Measurement, Report, Scan, ScanSource,
    StateEstimate, TrackHistory, TrackSource,
};
pub use plot::Plotter;
pub use style::{Color, LineStyle, Marker, PlotStyle};

#[cfg(feature = "visualization")]
pub use visualization::RerunVisualizer;

// Error types
pub use crate::error::{Error, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur in the mht-plot-rs library
    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Invalid covariance: {0}")]
        InvalidCovariance(String),

        #[error("Invalid state: {0}")]
        InvalidState(String),

        #[error("Shape mismatch: expected {expected}, got {got}")]
        ShapeMismatch { expected: String, got: String },

        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Invalid style: {0}")]
        InvalidStyle(String),

        #[error("Recording error: {0}")]
        Recording(String),

        #[error("IO error: {0}")]
        IoError(#[from] std::io::Error),
    }

    /// Result type for mht-plot-rs operations
    pub type Result<T> = std::result::Result<T, Error>;
}
