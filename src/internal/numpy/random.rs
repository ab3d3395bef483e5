//! Legacy `numpy.random.RandomState` port.
//!
//! Only the pieces needed to reproduce `RandomState(seed).rand(..)` bit for bit:
//! the MT19937 core, numpy's integer seeding and the 53-bit `random_sample`.
//!
//! License: BSD 3-Clause (NumPy Developers), MT19937 by Matsumoto and Nishimura.

const STATE_LEN: usize = 624;
const SHIFT: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// Mersenne Twister seeded the way `numpy.random.RandomState(int)` seeds it.
#[derive(Clone)]
pub struct RandomState {
    key: [u32; STATE_LEN],
    pos: usize,
}

impl RandomState {
    /// Create a generator equivalent to `numpy.random.RandomState(seed)`.
    pub fn new(seed: u32) -> Self {
        let mut key = [0u32; STATE_LEN];
        let mut s = seed;
        for (i, slot) in key.iter_mut().enumerate() {
            *slot = s;
            s = 1_812_433_253u32
                .wrapping_mul(s ^ (s >> 30))
                .wrapping_add(i as u32 + 1);
        }
        Self { key, pos: STATE_LEN }
    }

    fn regenerate(&mut self) {
        let mix = |hi: u32, lo: u32| -> u32 {
            let y = (hi & UPPER_MASK) | (lo & LOWER_MASK);
            let mag = if y & 1 == 1 { MATRIX_A } else { 0 };
            (y >> 1) ^ mag
        };

        for i in 0..STATE_LEN - SHIFT {
            self.key[i] = self.key[i + SHIFT] ^ mix(self.key[i], self.key[i + 1]);
        }
        for i in STATE_LEN - SHIFT..STATE_LEN - 1 {
            self.key[i] = self.key[i + SHIFT - STATE_LEN] ^ mix(self.key[i], self.key[i + 1]);
        }
        self.key[STATE_LEN - 1] =
            self.key[SHIFT - 1] ^ mix(self.key[STATE_LEN - 1], self.key[0]);
        self.pos = 0;
    }

    /// Next tempered 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        if self.pos >= STATE_LEN {
            self.regenerate();
        }
        let mut y = self.key[self.pos];
        self.pos += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    /// Uniform double in `[0, 1)` with 53 bits of randomness (`random_sample`).
    pub fn random_sample(&mut self) -> f64 {
        let a = (self.next_u32() >> 5) as f64;
        let b = (self.next_u32() >> 6) as f64;
        (a * 67_108_864.0 + b) / 9_007_199_254_740_992.0
    }

    /// Equivalent of `rand(rows, cols)`: samples laid out row by row.
    pub fn rand_rows<const C: usize>(&mut self, rows: usize) -> Vec<[f64; C]> {
        (0..rows)
            .map(|_| {
                let mut row = [0.0; C];
                for v in row.iter_mut() {
                    *v = self.random_sample();
                }
                row
            })
            .collect()
    }
}

impl std::fmt::Debug for RandomState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomState").field("pos", &self.pos).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_seed_zero_matches_numpy() {
        // np.random.RandomState(0).rand(4)
        let mut rs = RandomState::new(0);
        assert_relative_eq!(rs.random_sample(), 0.5488135039273248, epsilon = 1e-15);
        assert_relative_eq!(rs.random_sample(), 0.7151893663724195, epsilon = 1e-15);
        assert_relative_eq!(rs.random_sample(), 0.6027633760716439, epsilon = 1e-15);
        assert_relative_eq!(rs.random_sample(), 0.5448831829968969, epsilon = 1e-15);
    }

    #[test]
    fn test_reference_mt19937_output() {
        // First output of the reference implementation for init_genrand(5489).
        let mut rs = RandomState::new(5489);
        assert_eq!(rs.next_u32(), 3_499_211_612);
    }

    #[test]
    fn test_rand_rows_layout() {
        let mut a = RandomState::new(0);
        let rows = a.rand_rows::<3>(2);

        let mut b = RandomState::new(0);
        let flat: Vec<f64> = (0..6).map(|_| b.random_sample()).collect();

        assert_eq!(rows[0], [flat[0], flat[1], flat[2]]);
        assert_eq!(rows[1], [flat[3], flat[4], flat[5]]);
    }

    #[test]
    fn test_samples_in_unit_interval_across_regeneration() {
        let mut rs = RandomState::new(42);
        for _ in 0..2000 {
            let v = rs.random_sample();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
