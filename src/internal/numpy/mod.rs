//! NumPy functions port.
//!
//! Ported from:
//! - numpy.random.RandomState (legacy MT19937 seeding and sampling)
//! - numpy.linalg.eigh
//!
//! License: BSD 3-Clause (NumPy Developers)

mod array;
mod linalg;
mod random;

pub use array::*;
pub use linalg::*;
pub use random::*;
