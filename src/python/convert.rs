//! Reading Python tracker objects into the owned model types.
//!
//! Tracker objects are read by duck typing: `track.filter.x`,
//! `track.filter.P`, `track.trace()`, `gh.tracks`, `gh.unassigned[i].z`,
//! `scan.reports[i].z`. Arrays of any numeric dtype or shape are accepted and
//! converted with `numpy.asarray(.., dtype=float64)`.

use nalgebra::{DMatrix, DVector};
use numpy::{PyReadonlyArray2, PyReadonlyArrayDyn};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::model::{GaussianEstimate, GlobalHypothesis, Report, Scan, TrackHistory};
use crate::Error;

/// Map a library error onto `ValueError`.
pub fn to_py_err(err: Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn as_float_array<'py>(obj: &Bound<'py, PyAny>) -> PyResult<Bound<'py, PyAny>> {
    let py = obj.py();
    let kwargs = PyDict::new_bound(py);
    kwargs.set_item("dtype", "float64")?;
    py.import_bound("numpy")?
        .getattr("asarray")?
        .call((obj,), Some(&kwargs))
}

/// Any array-like flattened to a vector (`x` may be a column matrix).
pub fn extract_vector(obj: &Bound<'_, PyAny>) -> PyResult<DVector<f64>> {
    let arr = as_float_array(obj)?;
    let arr: PyReadonlyArrayDyn<f64> = arr.extract()?;
    let view = arr.as_array();
    Ok(DVector::from_iterator(view.len(), view.iter().cloned()))
}

/// A 2D array-like as a matrix.
pub fn extract_matrix(obj: &Bound<'_, PyAny>) -> PyResult<DMatrix<f64>> {
    let arr = as_float_array(obj)?;
    let arr: PyReadonlyArray2<f64> = arr.extract()?;
    Ok(numpy_to_dmatrix(&arr))
}

/// Helper to convert a numpy array to DMatrix
pub fn numpy_to_dmatrix(arr: &PyReadonlyArray2<f64>) -> DMatrix<f64> {
    let arr = arr.as_array();
    DMatrix::from_fn(arr.nrows(), arr.ncols(), |i, j| arr[[i, j]])
}

/// `obj.filter` as a Gaussian estimate.
pub fn extract_filter(track: &Bound<'_, PyAny>) -> PyResult<GaussianEstimate> {
    let filter = track.getattr("filter")?;
    let x = extract_vector(&filter.getattr("x")?)?;
    let p = extract_matrix(&filter.getattr("P")?)?;
    GaussianEstimate::new(x, p).map_err(to_py_err)
}

/// A list of track-like objects (e.g. `track.trace()`) as a track history.
pub fn extract_trace(trace: &Bound<'_, PyAny>) -> PyResult<Vec<GaussianEstimate>> {
    trace.iter()?.map(|item| extract_filter(&item?)).collect()
}

/// A track reduced to its current filter state.
pub fn extract_current_track(track: &Bound<'_, PyAny>) -> PyResult<TrackHistory> {
    TrackHistory::new(vec![extract_filter(track)?]).map_err(to_py_err)
}

/// Objects with a measurement vector `z`.
pub fn extract_reports(items: &Bound<'_, PyAny>) -> PyResult<Vec<Report>> {
    items
        .iter()?
        .map(|item| Ok(Report::new(extract_vector(&item?.getattr("z")?)?)))
        .collect()
}

/// A global hypothesis: each track's current state and the unassigned detections.
pub fn extract_hypothesis(gh: &Bound<'_, PyAny>) -> PyResult<GlobalHypothesis> {
    let tracks = gh
        .getattr("tracks")?
        .iter()?
        .map(|track| extract_current_track(&track?))
        .collect::<PyResult<Vec<_>>>()?;
    let unassigned = extract_reports(&gh.getattr("unassigned")?)?;

    Ok(GlobalHypothesis::new(tracks, unassigned))
}

/// A scan and its reports.
pub fn extract_scan(scan: &Bound<'_, PyAny>) -> PyResult<Scan> {
    Ok(Scan::new(extract_reports(&scan.getattr("reports")?)?))
}
