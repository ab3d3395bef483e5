//! Read-only view of the tracking engine's object model.
//!
//! The plotting operations only need positions and covariances, so they are
//! written against these traits. Any tracker can be plotted by implementing
//! them over its own types; the owned types at the bottom of this module are
//! plain implementations for tests, demos and the Python bindings.

use nalgebra::{DMatrix, DVector};

use crate::{Error, Result};

/// Output of a track's filter: mean `x` and covariance `P`.
pub trait StateEstimate {
    /// State mean; entries 0 and 1 are the planar position.
    fn mean(&self) -> &DVector<f64>;

    /// State covariance; the leading 2×2 block is the positional uncertainty.
    fn covariance(&self) -> &DMatrix<f64>;
}

/// A sensor measurement with vector `z`.
pub trait Measurement {
    fn z(&self) -> &DVector<f64>;
}

/// A target track.
pub trait TrackSource {
    type State: StateEstimate;

    /// Current filter state.
    fn filter(&self) -> &Self::State;

    /// Historical states, oldest first, ending with the current one.
    fn trace(&self) -> Vec<&Self::State>;
}

/// A global hypothesis: its tracks and the detections it left unassigned.
pub trait HypothesisSource {
    type Track: TrackSource;
    type Detection: Measurement;

    fn tracks(&self) -> &[Self::Track];

    fn unassigned(&self) -> &[Self::Detection];
}

/// One sensor sweep.
pub trait ScanSource {
    type Report: Measurement;

    fn reports(&self) -> &[Self::Report];
}

impl<T: StateEstimate + ?Sized> StateEstimate for &T {
    fn mean(&self) -> &DVector<f64> {
        (**self).mean()
    }

    fn covariance(&self) -> &DMatrix<f64> {
        (**self).covariance()
    }
}

impl<T: Measurement + ?Sized> Measurement for &T {
    fn z(&self) -> &DVector<f64> {
        (**self).z()
    }
}

// ============================================================================
// Owned implementations
// ============================================================================

/// Gaussian state estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianEstimate {
    pub x: DVector<f64>,
    pub p: DMatrix<f64>,
}

impl GaussianEstimate {
    pub fn new(x: DVector<f64>, p: DMatrix<f64>) -> Result<Self> {
        if x.len() < 2 {
            return Err(Error::InvalidState(format!(
                "state vector needs at least 2 entries, got {}",
                x.len()
            )));
        }
        if !p.is_square() || p.nrows() != x.len() {
            return Err(Error::InvalidCovariance(format!(
                "expected {}x{} covariance, got {}x{}",
                x.len(),
                x.len(),
                p.nrows(),
                p.ncols()
            )));
        }
        Ok(Self { x, p })
    }

    /// Estimate from a flat mean and a row-major covariance.
    pub fn from_slices(x: &[f64], p: &[f64]) -> Result<Self> {
        let n = x.len();
        if p.len() != n * n {
            return Err(Error::ShapeMismatch {
                expected: format!("{} covariance entries", n * n),
                got: format!("{}", p.len()),
            });
        }
        Self::new(DVector::from_row_slice(x), DMatrix::from_row_slice(n, n, p))
    }

    /// Position-only estimate with an isotropic covariance `var * I`.
    pub fn at(x: f64, y: f64, var: f64) -> Self {
        Self {
            x: DVector::from_vec(vec![x, y]),
            p: DMatrix::identity(2, 2) * var,
        }
    }
}

impl StateEstimate for GaussianEstimate {
    fn mean(&self) -> &DVector<f64> {
        &self.x
    }

    fn covariance(&self) -> &DMatrix<f64> {
        &self.p
    }
}

/// A measurement report or an unassigned detection.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub z: DVector<f64>,
}

impl Report {
    pub fn new(z: DVector<f64>) -> Self {
        Self { z }
    }

    pub fn at(x: f64, y: f64) -> Self {
        Self::new(DVector::from_vec(vec![x, y]))
    }
}

impl Measurement for Report {
    fn z(&self) -> &DVector<f64> {
        &self.z
    }
}

/// A track stored as its full filter history.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackHistory {
    history: Vec<GaussianEstimate>,
}

impl TrackHistory {
    /// Build a track from its states, oldest first. Must be non-empty.
    pub fn new(history: Vec<GaussianEstimate>) -> Result<Self> {
        if history.is_empty() {
            return Err(Error::InvalidState("track history is empty".to_string()));
        }
        Ok(Self { history })
    }

    /// Append the state of the next scan.
    pub fn push(&mut self, state: GaussianEstimate) {
        self.history.push(state);
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn history(&self) -> &[GaussianEstimate] {
        &self.history
    }
}

impl TrackSource for TrackHistory {
    type State = GaussianEstimate;

    fn filter(&self) -> &GaussianEstimate {
        // Non-empty by construction.
        &self.history[self.history.len() - 1]
    }

    fn trace(&self) -> Vec<&GaussianEstimate> {
        self.history.iter().collect()
    }
}

/// A global hypothesis with owned tracks and detections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalHypothesis {
    pub tracks: Vec<TrackHistory>,
    pub unassigned: Vec<Report>,
}

impl GlobalHypothesis {
    pub fn new(tracks: Vec<TrackHistory>, unassigned: Vec<Report>) -> Self {
        Self { tracks, unassigned }
    }
}

impl HypothesisSource for GlobalHypothesis {
    type Track = TrackHistory;
    type Detection = Report;

    fn tracks(&self) -> &[TrackHistory] {
        &self.tracks
    }

    fn unassigned(&self) -> &[Report] {
        &self.unassigned
    }
}

/// A scan with owned reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scan {
    pub reports: Vec<Report>,
}

impl Scan {
    pub fn new(reports: Vec<Report>) -> Self {
        Self { reports }
    }
}

impl ScanSource for Scan {
    type Report = Report;

    fn reports(&self) -> &[Report] {
        &self.reports
    }
}
