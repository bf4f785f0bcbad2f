//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, fast, no-std compatible.

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform index in [0, len). Returns 0 for an empty range.
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // top 24 bits fill an f32 mantissa exactly
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in [lo, hi).
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    /// Uniform float in [-half, half].
    pub fn spread(&mut self, half: f32) -> f32 {
        (self.next_f32() * 2.0 - 1.0) * half
    }

    /// In-place Fisher-Yates shuffle; every permutation is equally likely.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.next_index(1000), rng2.next_index(1000));
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        // Should not panic or loop forever
        let _ = rng.next_index(100);
        assert_eq!(rng.next_index(0), 0);
    }

    #[test]
    fn floats_stay_in_range() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let f = rng.next_f32();
            assert!((0.0..1.0).contains(&f));
            let r = rng.range(2.0, 3.0);
            assert!((2.0..3.0).contains(&r));
            let s = rng.spread(2.5);
            assert!((-2.5..=2.5).contains(&s));
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = Rng::new(99);
        let mut items: Vec<u32> = (0..50).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(items, sorted, "50 items should not survive a shuffle in order");
    }

    #[test]
    fn shuffle_reaches_every_position() {
        // Item 0 should land in each of 4 slots over many shuffles.
        let mut rng = Rng::new(3);
        let mut seen = [0u32; 4];
        for _ in 0..4000 {
            let mut items = [0, 1, 2, 3];
            rng.shuffle(&mut items);
            let pos = items.iter().position(|&v| v == 0).unwrap();
            seen[pos] += 1;
        }
        for count in seen {
            assert!(count > 800, "skewed shuffle: {:?}", seen);
        }
    }
}
