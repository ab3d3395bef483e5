//! `numpy.linalg.eigh` for the 2×2 case, with eigenpairs sorted descending.

use nalgebra::{Matrix2, SymmetricEigen, Vector2};

/// Eigenvalues and eigenvectors of a symmetric 2×2 matrix.
///
/// `values[0] >= values[1]`; `vectors.column(i)` pairs with `values[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortedEigen {
    pub values: Vector2<f64>,
    pub vectors: Matrix2<f64>,
}

/// Equivalent of `vals, vecs = eigh(m); order = vals.argsort()[::-1]`.
///
/// Only the lower triangle is read, as LAPACK's `eigh` does by default.
pub fn eigh_sorted(m: &Matrix2<f64>) -> SortedEigen {
    let sym = Matrix2::new(m[(0, 0)], m[(1, 0)], m[(1, 0)], m[(1, 1)]);
    let eig = SymmetricEigen::new(sym);

    let (hi, lo) = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
        (0, 1)
    } else {
        (1, 0)
    };

    SortedEigen {
        values: Vector2::new(eig.eigenvalues[hi], eig.eigenvalues[lo]),
        vectors: Matrix2::from_columns(&[
            eig.eigenvectors.column(hi).into_owned(),
            eig.eigenvectors.column(lo).into_owned(),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_diagonal_sorted_descending() {
        let eig = eigh_sorted(&Matrix2::new(1.0, 0.0, 0.0, 4.0));
        assert_relative_eq!(eig.values[0], 4.0, epsilon = 1e-12);
        assert_relative_eq!(eig.values[1], 1.0, epsilon = 1e-12);
        // Dominant direction is the y axis.
        assert_relative_eq!(eig.vectors[(0, 0)].abs(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(eig.vectors[(1, 0)].abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_eigenpairs_reconstruct_matrix() {
        let m = Matrix2::new(3.0, 1.2, 1.2, 2.0);
        let eig = eigh_sorted(&m);
        for i in 0..2 {
            let v = eig.vectors.column(i);
            let mv = m * v;
            assert_relative_eq!(mv[0], eig.values[i] * v[0], epsilon = 1e-10);
            assert_relative_eq!(mv[1], eig.values[i] * v[1], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_upper_triangle_ignored() {
        let a = eigh_sorted(&Matrix2::new(2.0, 99.0, 1.0, 2.0));
        let b = eigh_sorted(&Matrix2::new(2.0, 1.0, 1.0, 2.0));
        assert_relative_eq!(a.values[0], b.values[0], epsilon = 1e-12);
        assert_relative_eq!(a.values[1], b.values[1], epsilon = 1e-12);
    }
}
