//! Matplotlib functions port.
//!
//! Ported from:
//! - matplotlib.colors (`to_rgba`, `ListedColormap`)
//!
//! License: matplotlib license (PSF-based)

mod colors;

pub use colors::*;
