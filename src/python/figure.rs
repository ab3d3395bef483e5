//! Python wrapper for an axes and the plotting helpers.

use pyo3::prelude::*;

use crate::visualization::{RerunVisualizer, DEFAULT_APP_ID};
use crate::{Axes, Plotter};

use super::convert::{
    extract_hypothesis, extract_matrix, extract_scan, extract_trace, extract_vector, to_py_err,
};

/// A figure that MHT plotting helpers draw onto.
///
/// Example:
///     >>> from mht_plot_rs import Figure
///     >>>
///     >>> fig = Figure(title="scan 12")
///     >>> fig.plot_hyptrace(gh, cseed=0, covellipse=True)
///     >>> fig.plot_scan(scan)
///     >>> fig.save("tracks.rrd")
#[pyclass(name = "Figure")]
pub struct PyFigure {
    axes: Axes,
    plotter: Plotter,
}

#[pymethods]
impl PyFigure {
    /// Create a new Figure.
    ///
    /// Args:
    ///     title: Optional axes title.
    #[new]
    #[pyo3(signature = (title=None))]
    fn new(title: Option<String>) -> Self {
        let mut axes = Axes::new();
        if let Some(title) = title {
            axes.set_title(title);
        }
        Self {
            axes,
            plotter: Plotter::default(),
        }
    }

    /// Plot a single trace (a list of track states with `.filter.x` / `.filter.P`).
    #[pyo3(signature = (trace, c=0, covellipse=true))]
    fn plot_trace(&mut self, trace: &Bound<'_, PyAny>, c: usize, covellipse: bool) -> PyResult<()> {
        let states = extract_trace(trace)?;
        self.plotter
            .plot_trace(&mut self.axes, &states, c, covellipse)
            .map_err(to_py_err)
    }

    /// Plot the trace of every track of a hypothesis.
    ///
    /// Tracks whose `trace()` is empty draw nothing but still use up a color.
    #[pyo3(signature = (gh, cseed=0, covellipse=true))]
    fn plot_hyptrace(&mut self, gh: &Bound<'_, PyAny>, cseed: usize, covellipse: bool) -> PyResult<()> {
        let traces = gh
            .getattr("tracks")?
            .iter()?
            .map(|track| extract_trace(&track?.call_method0("trace")?))
            .collect::<PyResult<Vec<_>>>()?;
        self.plotter
            .plot_traces(&mut self.axes, traces, cseed, covellipse)
            .map_err(to_py_err)
    }

    /// Add a confidence ellipse of a 2x2 covariance at a position.
    ///
    /// Returns:
    ///     (width, height, angle) of the added ellipse.
    #[pyo3(signature = (cov, pos, nstd=2.0, alpha=None))]
    fn plot_cov_ellipse(
        &mut self,
        cov: &Bound<'_, PyAny>,
        pos: &Bound<'_, PyAny>,
        nstd: f64,
        alpha: Option<f64>,
    ) -> PyResult<(f64, f64, f64)> {
        let cov = extract_matrix(cov)?;
        let pos = extract_vector(pos)?;
        let pos = crate::internal::numpy::leading_position(&pos).map_err(to_py_err)?;

        let ellipse = crate::plot::plot_covariance_ellipse(&mut self.axes, &cov, pos, nstd)
            .map_err(to_py_err)?;
        if let Some(alpha) = alpha {
            ellipse.set_alpha(alpha);
        }
        let g = ellipse.geometry;
        Ok((g.width, g.height, g.angle))
    }

    /// Plot current track positions and, optionally, unassigned detections.
    #[pyo3(signature = (gh, cseed=0, covellipse=true, unassigned=true))]
    fn plot_hypothesis(
        &mut self,
        gh: &Bound<'_, PyAny>,
        cseed: usize,
        covellipse: bool,
        unassigned: bool,
    ) -> PyResult<()> {
        let hypothesis = extract_hypothesis(gh)?;
        self.plotter
            .plot_hypothesis(&mut self.axes, &hypothesis, cseed, covellipse, unassigned)
            .map_err(to_py_err)
    }

    /// Plot the reports of a scan.
    fn plot_scan(&mut self, scan: &Bound<'_, PyAny>) -> PyResult<()> {
        let scan = extract_scan(scan)?;
        self.plotter
            .plot_scan(&mut self.axes, &scan)
            .map_err(to_py_err)
    }

    /// Remove everything drawn so far.
    fn clear(&mut self) {
        self.axes.clear();
    }

    /// Write everything drawn so far to a Rerun `.rrd` recording.
    ///
    /// Returns:
    ///     The number of artists written.
    fn save(&self, path: &str) -> PyResult<usize> {
        let mut viz = RerunVisualizer::new_to_file(DEFAULT_APP_ID, path).map_err(to_py_err)?;
        *viz.gca() = self.axes.clone();
        viz.flush().map_err(to_py_err)
    }

    fn __len__(&self) -> usize {
        self.axes.artists().len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Figure(title={:?}, artists={}, markers={})",
            self.axes.title,
            self.axes.artists().len(),
            self.axes.marker_count()
        )
    }
}
