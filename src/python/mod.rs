//! Python bindings for mht-plot-rs using PyO3.
//!
//! Lets a Python MHT implementation keep its own objects and hand them to the
//! Rust plotting helpers, which read them by attribute access.

use pyo3::prelude::*;

mod convert;
mod figure;

pub use convert::{extract_hypothesis, extract_scan, extract_trace};
pub use figure::PyFigure;

use convert::{extract_matrix, to_py_err};

/// Geometry of the `nstd`-sigma ellipse of a covariance.
///
/// Returns:
///     (width, height, angle) with angle in degrees.
#[pyfunction]
#[pyo3(signature = (cov, nstd=2.0))]
fn cov_ellipse(cov: &Bound<'_, PyAny>, nstd: f64) -> PyResult<(f64, f64, f64)> {
    let cov = extract_matrix(cov)?;
    let block = crate::internal::numpy::leading_block(&cov).map_err(to_py_err)?;
    let g = crate::covariance_ellipse(&block, [0.0, 0.0], nstd).map_err(to_py_err)?;
    Ok((g.width, g.height, g.angle))
}

/// RGB color of a palette index.
#[pyfunction]
fn palette_color(index: usize) -> (f64, f64, f64) {
    let c = crate::palette::color(index);
    (c.r, c.g, c.b)
}

/// Python module for mht-plot-rs.
///
/// The function is named `_mht_plot_rs` with underscore prefix for mixed Python/Rust projects.
#[pymodule]
fn _mht_plot_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyFigure>()?;

    m.add_function(wrap_pyfunction!(cov_ellipse, m)?)?;
    m.add_function(wrap_pyfunction!(palette_color, m)?)?;

    m.add("PALETTE_SIZE", crate::palette::PALETTE_SIZE)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
