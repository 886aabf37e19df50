//! Deterministic random number generation for maze layouts.
//!
//! Layout generation draws every random value through an [`RngOracle`], so a
//! given base seed always reproduces the same sequence of mazes. Each
//! generation and each purpose (carving, prop placement) gets its own
//! [`RngStream`], keyed by [`compute_seed`], which keeps a layout reproducible
//! even if an earlier generation consumed a different number of draws.

/// Stream context for the carving walk.
pub const CONTEXT_CARVE: u32 = 0;

/// Stream context for key/door placement.
pub const CONTEXT_PLACEMENT: u32 = 1;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR variant, producing 32-bit output from 64-bit state.
/// The oracle itself is stateless: the caller supplies the state as a seed
/// and [`RngStream`] advances it.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute a deterministic seed for a single draw.
///
/// # Arguments
///
/// * `base_seed` - Seed the generator was created with
/// * `generation` - Index of the layout being generated
/// * `draw` - Sequence number of the draw within the stream
/// * `context` - Purpose of the stream ([`CONTEXT_CARVE`], [`CONTEXT_PLACEMENT`])
pub fn compute_seed(base_seed: u64, generation: u64, draw: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = base_seed;

    hash ^= generation.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (draw as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Sequential random draws for one generation and one purpose.
#[derive(Clone, Debug)]
pub struct RngStream<R: RngOracle = PcgRng> {
    oracle: R,
    base_seed: u64,
    generation: u64,
    context: u32,
    draw: u32,
}

impl RngStream<PcgRng> {
    pub fn new(base_seed: u64, generation: u64, context: u32) -> Self {
        Self::with_oracle(PcgRng, base_seed, generation, context)
    }
}

impl<R: RngOracle> RngStream<R> {
    /// Prop placement only terminates for oracles that eventually draw every index.
    pub(crate) fn with_oracle(oracle: R, base_seed: u64, generation: u64, context: u32) -> Self {
        Self {
            oracle,
            base_seed,
            generation,
            context,
            draw: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> u32 {
        self.draw
    }

    pub fn next_u32(&mut self) -> u32 {
        let seed = compute_seed(self.base_seed, self.generation, self.draw, self.context);
        self.draw = self.draw.wrapping_add(1);
        self.oracle.next_u32(seed)
    }

    /// Uniform value in `[lo, hi)`. Returns `lo` for an empty range.
    pub fn range_exclusive(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo + 1 {
            // Still consume a draw so stream positions line up with the
            // number of calls, not with the values requested.
            self.next_u32();
            return lo;
        }
        lo + (self.next_u32() as usize % (hi - lo))
    }

    /// Uniform index in `[0, len)`.
    pub fn next_index(&mut self, len: usize) -> usize {
        self.range_exclusive(0, len)
    }

    /// Uniform permutation: each position `i` swaps with a uniformly chosen
    /// index in `[i, len)`.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let len = items.len();
        for i in 0..len {
            let j = self.range_exclusive(i, len);
            items.swap(i, j);
        }
    }
}
