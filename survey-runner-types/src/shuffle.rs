//! Seeded display-order permutations.
//!
//! Randomized rows, columns and options are a render-time transform only:
//! [`shuffled_order`] returns a new sequence and never touches the canonical
//! order elements store their responses under.

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Advance a SplitMix64 state and return the next output.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(GOLDEN_GAMMA);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Return `canonical` permuted by a Fisher-Yates shuffle driven by `seed`.
///
/// Pure: the same seed always yields the same order.
pub fn shuffled_order<T: Clone>(canonical: &[T], seed: u64) -> Vec<T> {
    let mut order = canonical.to_vec();
    let mut state = seed;
    for i in (1..order.len()).rev() {
        let j = (splitmix64(&mut state) % (i as u64 + 1)) as usize;
        order.swap(i, j);
    }
    order
}

/// Derive an independent seed for a sub-component (an element on a page, the
/// columns of a grid) from a parent seed.
pub fn derive_seed(seed: u64, salt: u64) -> u64 {
    let mut state = seed ^ salt.wrapping_mul(GOLDEN_GAMMA);
    splitmix64(&mut state)
}

/// Source of fresh render seeds, one per render.
#[derive(Debug, Clone)]
pub struct SeedSequence {
    state: u64,
}

impl SeedSequence {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed the sequence from the system clock.
    pub fn from_clock() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(nanos)
    }

    pub fn next_seed(&mut self) -> u64 {
        splitmix64(&mut self.state)
    }
}
