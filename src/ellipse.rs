//! Confidence ellipses of 2D Gaussians.

use nalgebra::Matrix2;
use tracing::trace;

use crate::internal::numpy::eigh_sorted;
use crate::utils::warn_once;
use crate::{Error, Result};

/// Relative size below which a negative eigenvalue is treated as round-off.
const EIGENVALUE_TOLERANCE: f64 = 1e-9;

/// Geometry of an ellipse in data coordinates.
///
/// `width` and `height` are full axis lengths, not radii. `angle` is the
/// counter-clockwise rotation of the `width` axis from +x, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseGeometry {
    pub center: [f64; 2],
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

impl EllipseGeometry {
    pub fn new(center: [f64; 2], width: f64, height: f64, angle: f64) -> Self {
        Self { center, width, height, angle }
    }

    /// `n` points on the boundary, counter-clockwise from the end of the width axis.
    pub fn boundary(&self, n: usize) -> Vec<[f64; 2]> {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        let (a, b) = (self.width / 2.0, self.height / 2.0);
        (0..n)
            .map(|k| {
                let t = std::f64::consts::TAU * k as f64 / n as f64;
                let (u, v) = (a * t.cos(), b * t.sin());
                [
                    self.center[0] + u * cos - v * sin,
                    self.center[1] + u * sin + v * cos,
                ]
            })
            .collect()
    }
}

/// Ellipse bounding the `n_std`-sigma region of a 2D Gaussian.
///
/// The covariance is eigendecomposed, eigenvalues ordered descending; the
/// dominant eigenvector gives the rotation and each axis spans
/// `2 * n_std * sqrt(eigenvalue)`. Eigenvector sign is arbitrary, so the angle
/// is reported in `(-90, 90]`.
pub fn covariance_ellipse(cov: &Matrix2<f64>, center: [f64; 2], n_std: f64) -> Result<EllipseGeometry> {
    if !n_std.is_finite() || n_std < 0.0 {
        return Err(Error::InvalidConfig(format!("n_std must be finite and >= 0, got {}", n_std)));
    }
    if !cov.iter().all(|v| v.is_finite()) {
        return Err(Error::InvalidCovariance("covariance contains non-finite entries".to_string()));
    }

    let eig = eigh_sorted(cov);
    let scale = eig.values[0].abs().max(eig.values[1].abs()).max(f64::MIN_POSITIVE);
    let mut vals = [eig.values[0], eig.values[1]];
    for v in vals.iter_mut() {
        if *v < 0.0 {
            if *v < -EIGENVALUE_TOLERANCE * scale {
                return Err(Error::InvalidCovariance(format!(
                    "covariance is not positive semi-definite (eigenvalue {})",
                    v
                )));
            }
            warn_once("clamping round-off negative covariance eigenvalue to zero");
            *v = 0.0;
        }
    }

    let dominant = eig.vectors.column(0);
    let angle = normalize_axis_angle(dominant[1].atan2(dominant[0]).to_degrees());
    let width = 2.0 * n_std * vals[0].sqrt();
    let height = 2.0 * n_std * vals[1].sqrt();

    trace!(
        cx = center[0],
        cy = center[1],
        width,
        height,
        angle,
        "covariance ellipse"
    );

    Ok(EllipseGeometry::new(center, width, height, angle))
}

/// Map an axis direction in degrees onto `(-90, 90]`.
fn normalize_axis_angle(deg: f64) -> f64 {
    let mut a = deg % 180.0;
    if a <= -90.0 {
        a += 180.0;
    } else if a > 90.0 {
        a -= 180.0;
    }
    a
}
