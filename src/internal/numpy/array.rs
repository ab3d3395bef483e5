//! NumPy-like slicing of state vectors and covariance matrices.

use nalgebra::{DMatrix, DVector, Matrix2};
use crate::{Error, Result};

/// `(float(x[0]), float(x[1]))`: the spatial position held in a state vector.
pub fn leading_position(x: &DVector<f64>) -> Result<[f64; 2]> {
    if x.len() < 2 {
        return Err(Error::InvalidState(format!(
            "state vector needs at least 2 entries, got {}",
            x.len()
        )));
    }

    let pos = [x[0], x[1]];
    if !pos.iter().all(|v| v.is_finite()) {
        return Err(Error::InvalidState(format!(
            "non-finite position ({}, {})",
            pos[0], pos[1]
        )));
    }
    Ok(pos)
}

/// `P[0:2, 0:2]`: the positional block of a state covariance.
pub fn leading_block(p: &DMatrix<f64>) -> Result<Matrix2<f64>> {
    let (rows, cols) = p.shape();
    if rows < 2 || cols < 2 {
        return Err(Error::InvalidCovariance(format!(
            "expected at least 2x2, got {}x{}",
            rows, cols
        )));
    }

    let block: Matrix2<f64> = p.fixed_view::<2, 2>(0, 0).into_owned();
    if !block.iter().all(|v| v.is_finite()) {
        return Err(Error::InvalidCovariance(
            "covariance contains non-finite entries".to_string(),
        ));
    }
    Ok(block)
}

/// Column `idx` of a list of measurement vectors, e.g. `[float(u.z[0]) for u in ...]`.
pub fn component<'a, I>(vectors: I, idx: usize) -> Result<Vec<f64>>
where
    I: IntoIterator<Item = &'a DVector<f64>>,
{
    vectors
        .into_iter()
        .map(|z| {
            z.get(idx).copied().ok_or_else(|| {
                Error::InvalidState(format!(
                    "measurement of length {} has no component {}",
                    z.len(),
                    idx
                ))
            })
        })
        .collect()
}
