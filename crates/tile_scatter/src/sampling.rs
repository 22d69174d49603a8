//! Uniform draws used by the placement sampler.
use rand::Rng;

const UNIT_53: f64 = 1.0 / (1u64 << 53) as f64;

/// Generate a random float in the range [0, 1).
///
/// Uses the top 53 bits of one `next_u64` call, so the result is never `1.0` and
/// a density of `1.0` always accepts.
#[inline]
pub fn rand01(rng: &mut dyn Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 * UNIT_53
}

/// Bernoulli trial: draw once and accept iff the draw is below `p`.
#[inline]
pub fn bernoulli(rng: &mut dyn Rng, p: f64) -> bool {
    rand01(rng) < p
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    /// Returns the same word for every call.
    pub(crate) struct FixedRng {
        pub value: u64,
    }

    impl rand::TryRng for FixedRng {
        type Error = core::convert::Infallible;

        fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
            Ok(self.value as u32)
        }

        fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
            Ok(self.value)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Self::Error> {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 8];
            }
            Ok(())
        }
    }

    #[test]
    fn rand01_returns_zero_for_zero_input() {
        let mut rng = FixedRng { value: 0 };
        assert_eq!(rand01(&mut rng), 0.0);
    }

    #[test]
    fn rand01_stays_below_one_at_max() {
        let mut rng = FixedRng { value: u64::MAX };
        let result = rand01(&mut rng);
        assert!(result < 1.0);
        assert!(1.0 - result < 1e-15);
    }

    #[test]
    fn rand01_midpoint() {
        let mut rng = FixedRng { value: 1 << 63 };
        assert_eq!(rand01(&mut rng), 0.5);
    }

    #[test]
    fn bernoulli_saturates_outside_unit_interval() {
        let mut hi = FixedRng { value: u64::MAX };
        assert!(bernoulli(&mut hi, 1.0));
        assert!(bernoulli(&mut hi, 4.0));

        let mut lo = FixedRng { value: 0 };
        assert!(!bernoulli(&mut lo, 0.0));
        assert!(!bernoulli(&mut lo, -1.0));
    }

    #[test]
    fn rand01_values_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1000 {
            let u = rand01(&mut rng);
            assert!((0.0..1.0).contains(&u), "{u} out of range");
        }
    }
}
