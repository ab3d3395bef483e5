//! The fixed pseudo-random track palette.
//!
//! 256 RGB colors drawn from `RandomState(0)`, identical to the colormap the
//! Python MHT tooling builds with `ListedColormap(RandomState(0).rand(256, 3))`,
//! so a track keeps the same color across runs and across implementations.

use std::sync::OnceLock;

use crate::internal::matplotlib::ListedColormap;
use crate::internal::numpy::RandomState;
use crate::style::Color;

/// Number of palette entries.
pub const PALETTE_SIZE: usize = 256;

/// Seed of the generator the palette is drawn from.
pub const PALETTE_SEED: u32 = 0;

static PALETTE: OnceLock<ListedColormap> = OnceLock::new();

/// Build a colormap of `size` random RGB colors from `seed`.
pub fn seeded_colormap(seed: u32, size: usize) -> ListedColormap {
    let rows = RandomState::new(seed).rand_rows::<3>(size.max(1));
    ListedColormap::from_rgb_rows(&rows).unwrap_or_else(|_| unreachable!("at least one row is always drawn"))
}

/// The shared palette, built on first use.
pub fn palette() -> &'static ListedColormap {
    PALETTE.get_or_init(|| seeded_colormap(PALETTE_SEED, PALETTE_SIZE))
}

/// Palette color for a track index. Indices past the end take the last color.
#[inline]
pub fn color(index: usize) -> Color {
    palette().index(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_palette_size_and_opacity() {
        assert_eq!(palette().len(), PALETTE_SIZE);
        assert!(palette().colors().iter().all(|c| c.a == 1.0));
    }

    #[test]
    fn test_first_color_matches_numpy() {
        let c = color(0);
        assert_relative_eq!(c.r, 0.5488135039273248, epsilon = 1e-15);
        assert_relative_eq!(c.g, 0.7151893663724195, epsilon = 1e-15);
        assert_relative_eq!(c.b, 0.6027633760716439, epsilon = 1e-15);
    }

    #[test]
    fn test_over_index_takes_last_color() {
        assert_eq!(color(PALETTE_SIZE + 7), color(PALETTE_SIZE - 1));
    }

    #[test]
    fn test_palette_is_deterministic() {
        let rebuilt = seeded_colormap(PALETTE_SEED, PALETTE_SIZE);
        assert_eq!(rebuilt.colors(), palette().colors());
        assert_ne!(seeded_colormap(1, 4).index(0), color(0));
    }
}
