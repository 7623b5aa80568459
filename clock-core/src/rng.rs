//! Xorshift128 PRNG driving every randomized clock and the catalog shuffle.
//!
//! Algorithm (Marsaglia):
//! `t = x ^ (x << 11); x = y; y = z; z = w; w = w ^ (w >> 19) ^ (t ^ (t >> 8));`
//!
//! Seeding runs the integer through two rounds of SplitMix64 so that nearby
//! seeds (0, 1, 2, ...) land on unrelated states. Not suitable for anything
//! security related.

use alloc::string::String;
use alloc::vec::Vec;

/// Fallback state used when seeding would otherwise yield the all-zero vector.
pub const FALLBACK_STATE: [u32; 4] = [123_456_789, 362_436_069, 521_288_629, 88_675_123];

const TWO_POW_32: f64 = 4_294_967_296.0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Xor128 {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
}

impl Xor128 {
    pub fn new(seed: u64) -> Self {
        let mut mix = seed;
        let first = splitmix64(&mut mix);
        let second = splitmix64(&mut mix);
        Self::from_state([
            (first >> 32) as u32,
            first as u32,
            (second >> 32) as u32,
            second as u32,
        ])
    }

    /// Builds a generator from raw words. An all-zero state is replaced by
    /// [`FALLBACK_STATE`], since xorshift never leaves it.
    pub fn from_state(state: [u32; 4]) -> Self {
        let [x, y, z, w] = if state == [0; 4] { FALLBACK_STATE } else { state };
        Self { x, y, z, w }
    }

    pub fn state(&self) -> [u32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Advance the state and return the new `w` word.
    pub fn next_word(&mut self) -> u32 {
        let t = self.x ^ (self.x << 11);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = self.w ^ (self.w >> 19) ^ (t ^ (t >> 8));
        self.w
    }

    /// Uniform float in `[0, 1)`.
    pub fn uniform_float(&mut self) -> f64 {
        self.next_word() as f64 / TWO_POW_32
    }

    /// Uniform float in `[min, max)`.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.uniform_float() * (max - min)
    }

    /// Uniform integer in `[min, max]`, both ends inclusive.
    ///
    /// Equivalent to `floor(range(min, max + 1))`. The offset from `min` is
    /// never negative, so truncation is the floor. Reversed bounds are swapped.
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let (lo, hi) = (lo as i128, hi as i128);
        let span = (hi - lo) as f64 + 1.0;
        let offset = (self.uniform_float() * span) as i128;
        (lo + offset).clamp(lo, hi) as i64
    }

    /// Low bit of the next word.
    pub fn boolean(&mut self) -> bool {
        self.next_word() & 1 == 1
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.int_range(0, items.len() as i64 - 1) as usize;
        items.get(index)
    }

    /// Fisher-Yates shuffle of a copy; `items` is left untouched.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        self.shuffle_in_place(&mut out);
        out
    }

    /// Fisher-Yates shuffle in place. Consumes `len - 1` draws (none for
    /// slices shorter than two).
    pub fn shuffle_in_place<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.int_range(0, i as i64) as usize;
            items.swap(i, j);
        }
    }

    /// Shuffles the characters of `text`, keeping every code point.
    pub fn shuffle_text(&mut self, text: &str) -> String {
        let mut chars: Vec<char> = text.chars().collect();
        self.shuffle_in_place(&mut chars);
        chars.into_iter().collect()
    }

    /// Independent generator seeded from the next two words.
    pub fn fork(&mut self) -> Self {
        let high = self.next_word() as u64;
        let low = self.next_word() as u64;
        Self::new((high << 32) | low)
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_int_range_spanning_full_width() {
        let mut rng = Xor128::new(1);
        for _ in 0..1_000 {
            let value = rng.int_range(-1, i64::MAX);
            assert!(value >= -1);
            let value = rng.int_range(i64::MIN, i64::MAX);
            assert!((i64::MIN..=i64::MAX).contains(&value));
            let value = rng.int_range(i64::MAX, i64::MIN);
            assert!((i64::MIN..=i64::MAX).contains(&value));
        }
        assert_eq!(rng.int_range(i64::MAX, i64::MAX), i64::MAX);
        assert_eq!(rng.int_range(i64::MIN, i64::MIN), i64::MIN);
    }

    #[test]
    fn test_xorshift128_known_sequence() {
        // Reference values for Marsaglia's published default state.
        let mut rng = Xor128::from_state(FALLBACK_STATE);
        assert_eq!(rng.next_word(), 3_701_687_786);
        assert_eq!(rng.next_word(), 458_299_110);
        assert_eq!(rng.next_word(), 2_500_872_618);
        assert_eq!(rng.next_word(), 3_633_119_408);
        assert_eq!(rng.next_word(), 516_391_518);
    }

    #[test]
    fn test_seed_zero_known_sequence() {
        let mut rng = Xor128::new(0);
        assert_eq!(rng.state(), [0xE220_A839, 0x7B1D_CDAF, 0x6E78_9E6A, 0xA1B9_65F4]);
        assert_eq!(rng.next_word(), 1_178_562_714);
        assert_eq!(rng.next_word(), 3_554_327_879);
        assert_eq!(rng.next_word(), 2_046_550_680);
        assert_eq!(rng.next_word(), 319_274_646);
        assert_eq!(rng.next_word(), 2_919_344_076);
    }

    #[test]
    fn test_zero_state_falls_back() {
        let rng = Xor128::from_state([0; 4]);
        assert_eq!(rng.state(), FALLBACK_STATE);
    }

    #[test]
    fn test_determinism() {
        let mut a = Xor128::new(12345);
        let mut b = Xor128::new(12345);
        for _ in 0..10_000 {
            assert_eq!(a.next_word(), b.next_word());
        }
    }

    #[test]
    fn test_uniform_float_bounds() {
        let mut rng = Xor128::new(7);
        for _ in 0..10_000 {
            let value = rng.uniform_float();
            assert!((0.0..1.0).contains(&value), "got {value}");
        }
    }

    #[test]
    fn test_range_half_open() {
        let mut rng = Xor128::new(99);
        for _ in 0..10_000 {
            let value = rng.range(-2.5, 4.0);
            assert!((-2.5..4.0).contains(&value), "got {value}");
        }
    }

    #[test]
    fn test_int_range_inclusive_three_outcomes() {
        let mut rng = Xor128::new(42);
        let mut seen = [0u32; 3];
        for _ in 0..3_000 {
            let value = rng.int_range(-1, 1);
            assert!((-1..=1).contains(&value), "got {value}");
            seen[(value + 1) as usize] += 1;
        }
        assert!(seen.iter().all(|&count| count > 800), "{seen:?}");
    }

    #[test]
    fn test_int_range_reversed_and_degenerate() {
        let mut rng = Xor128::new(5);
        for _ in 0..1_000 {
            let value = rng.int_range(10, 3);
            assert!((3..=10).contains(&value));
        }
        assert_eq!(rng.int_range(4, 4), 4);
    }

    #[test]
    fn test_boolean_is_low_bit() {
        let mut words = Xor128::new(2024);
        let mut bools = words.clone();
        for _ in 0..1_000 {
            assert_eq!(bools.boolean(), words.next_word() & 1 == 1);
        }
    }

    #[test]
    fn test_shuffle_leaves_input_untouched() {
        let mut rng = Xor128::new(1);
        let input = vec![1, 2, 3, 4, 5, 6];
        let shuffled = rng.shuffle(&input);
        assert_eq!(input, vec![1, 2, 3, 4, 5, 6]);
        let mut sorted = shuffled.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, input);
    }

    #[test]
    fn test_short_shuffles_consume_no_draws() {
        let mut rng = Xor128::new(8);
        let before = rng.state();
        let empty: [u8; 0] = [];
        assert!(rng.shuffle(&empty).is_empty());
        assert_eq!(rng.shuffle(&[9]), vec![9]);
        assert_eq!(rng.shuffle_text(""), "");
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn test_shuffle_text_keeps_code_points() {
        let mut rng = Xor128::new(31);
        let text = "2024-06-01 12:34:56.789 ñ時";
        let scrambled = rng.shuffle_text(text);
        assert_eq!(scrambled.chars().count(), text.chars().count());
        let mut a: Vec<char> = text.chars().collect();
        let mut b: Vec<char> = scrambled.chars().collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pick() {
        let mut rng = Xor128::new(3);
        let empty: [u8; 0] = [];
        assert_eq!(rng.pick(&empty), None);
        let items = ['a', 'b', 'c'];
        for _ in 0..100 {
            assert!(items.contains(rng.pick(&items).expect("non-empty")));
        }
    }

    #[test]
    fn test_fork_is_independent_and_deterministic() {
        let mut a = Xor128::new(77);
        let mut b = Xor128::new(77);
        let mut child_a = a.fork();
        let mut child_b = b.fork();
        assert_eq!(child_a, child_b);
        assert_eq!(a, b);
        assert_ne!(child_a.state(), a.state());
        for _ in 0..100 {
            assert_eq!(child_a.next_word(), child_b.next_word());
        }
    }
}
