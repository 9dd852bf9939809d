/// Linear congruential generator for synthetic sensor data.
///
/// Same constants as the C library `rand` reference implementation, returning
/// 15-bit values. Seeded explicitly so synthetic output is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub const MULTIPLIER: u32 = 1_103_515_245;
    pub const INCREMENT: u32 = 12_345;

    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next value in `0..=0x7FFF`
    pub fn next_u15(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        (self.state >> 16) & 0x7FFF
    }

    /// Uniform-ish integer in `-half..span-half`
    pub fn centered(&mut self, span: u32, half: i32) -> i32 {
        (self.next_u15() % span) as i32 - half
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sequence_from_seed_one() {
        let mut rng = Lcg::new(1);
        // 1 * 1103515245 + 12345 = 1103527590 -> >> 16 = 16838
        assert_eq!(rng.next_u15(), 16838);
        assert_eq!(rng.next_u15(), 5758);
        assert_eq!(rng.next_u15(), 10113);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..64 {
            assert_eq!(a.next_u15(), b.next_u15());
        }
    }

    #[test]
    fn test_centered_bounds() {
        let mut rng = Lcg::new(7);
        for _ in 0..1000 {
            let v = rng.centered(200, 100);
            assert!((-100..100).contains(&v));
        }
    }
}
