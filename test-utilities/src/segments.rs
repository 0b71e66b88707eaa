use std::ops::RangeInclusive;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Deterministic source of free segments, as `(address, length)` pairs.
///
/// Segments produced by one call never overlap and never share an address,
/// which is what a free-segment tree expects from its callers.
pub struct SegmentGenerator {
    rng: StdRng,
}

impl SegmentGenerator {
    pub fn new(seed: u64) -> Self {
        SegmentGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `count` disjoint segments in random order, lengths drawn from `lengths`.
    ///
    /// Neighbouring segments are separated by a gap of 1 to 16 addresses, so
    /// the highest address stays below `count * (lengths.end() + 16)`.
    pub fn disjoint(&mut self, count: usize, lengths: RangeInclusive<i32>) -> Vec<(i32, i32)> {
        debug_assert!(*lengths.start() >= 0);

        let mut segments = Vec::with_capacity(count);
        let mut address = 0;

        for _ in 0..count {
            let length = self.rng.random_range(lengths.clone());
            let gap = self.rng.random_range(1..=16);

            segments.push((address, length));
            address += length + gap;
        }

        segments.shuffle(&mut self.rng);

        segments
    }

    /// Like [`Self::disjoint`], but with addresses that may be negative.
    pub fn disjoint_around_zero(
        &mut self,
        count: usize,
        lengths: RangeInclusive<i32>,
    ) -> Vec<(i32, i32)> {
        let mut segments = self.disjoint(count, lengths);
        let shift = self.rng.random_range(0..=(count as i32) * 8);

        for (address, _) in segments.iter_mut() {
            *address -= shift;
        }

        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_segments() {
        let a = SegmentGenerator::new(7).disjoint(64, 0..=32);
        let b = SegmentGenerator::new(7).disjoint(64, 0..=32);

        assert_eq!(a, b);
    }

    #[test]
    fn test_segments_are_disjoint() {
        let mut segments = SegmentGenerator::new(0xDEADBEEF).disjoint_around_zero(256, 0..=100);

        segments.sort();

        for pair in segments.windows(2) {
            let (address, length) = pair[0];
            let (next, _) = pair[1];

            assert!(address + length < next, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
    }
}
