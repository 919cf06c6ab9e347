//! RNG module - 7-bag random piece generation
//!
//! Each bag contains one of each piece (I, J, L, O, S, T, Z), shuffled with
//! Fisher-Yates. Pieces are drawn from the bag until it is empty, and only
//! then is a new bag generated.
//!
//! Also provides a small seeded LCG so games can be replayed in tests.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate a uniform value in range [0, max)
    ///
    /// Draws from the upper 16 bits (the low bits of an LCG cycle with short
    /// periods) and rejects the tail that would bias the modulo.
    /// `max` must be in `1..=65536`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0 && max <= 1 << 16);
        let zone = (1u32 << 16) - ((1u32 << 16) % max);
        loop {
            let v = self.next_u32() >> 16;
            if v < zone {
                return v % max;
            }
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagRandomizer {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag; 7 means exhausted
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl BagRandomizer {
    /// Create a randomizer with an empty bag; the first draw fills it.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceKind::ALL,
            bag_index: PieceKind::ALL.len(),
            rng: SimpleRng::new(seed),
        }
    }

    /// Generate a new shuffled bag
    pub fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece, refilling only when the bag is exhausted
    pub fn next_piece(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl Default for BagRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..=8 {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_shuffle_is_roughly_uniform() {
        // Position 0 of a shuffled 7-bag should see every kind about 1/7 of the time.
        let mut rng = SimpleRng::new(99);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            let mut bag = PieceKind::ALL;
            rng.shuffle(&mut bag);
            counts[(bag[0].color_index() - 1) as usize] += 1;
        }
        for c in counts {
            assert!((800..1200).contains(&c), "skewed count {c}");
        }
    }

    #[test]
    fn test_new_randomizer_starts_exhausted() {
        let bag = BagRandomizer::new(1);
        assert!(bag.remaining().is_empty());
    }

    #[test]
    fn test_draws_all_seven() {
        let mut bag = BagRandomizer::new(1);

        let mut drawn: Vec<PieceKind> = (0..7).map(|_| bag.next_piece()).collect();
        drawn.sort_by_key(|k| k.color_index());
        assert_eq!(drawn, PieceKind::ALL.to_vec());
        assert!(bag.remaining().is_empty());
    }

    #[test]
    fn test_refill_only_when_exhausted() {
        let mut bag = BagRandomizer::new(3);
        bag.next_piece();
        let rest = bag.remaining().to_vec();
        assert_eq!(rest.len(), 6);

        for expected in rest {
            assert_eq!(bag.next_piece(), expected);
        }

        // Eighth draw opens a fresh bag.
        bag.next_piece();
        assert_eq!(bag.remaining().len(), 6);
    }
}
