//! Internal modules ported from external libraries.
//!
//! These modules contain code adapted from:
//! - numpy: seeded random sampling, symmetric eigendecomposition, array slicing
//! - matplotlib: color specs, colormaps

pub mod numpy;
pub mod matplotlib;
