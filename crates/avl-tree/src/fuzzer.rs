use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Key source for randomized tree workloads.
///
/// Uses the xoshiro256** PRNG so a run can be replayed from its seed.
///
/// # Examples
///
/// ```
/// use avl_tree::fuzzer::Fuzzer;
///
/// let mut a = Fuzzer::from_u64(7);
/// let mut b = Fuzzer::from_u64(7);
/// assert_eq!(a.random_key(1000), b.random_key(1000));
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl Fuzzer {
    /// Create a new fuzzer with an optional seed.
    ///
    /// If no seed is provided, a random seed will be generated using `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });
        Self {
            seed,
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    /// Create a fuzzer whose 32-byte seed is expanded from a `u64`.
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        rand_xoshiro::SplitMix64::seed_from_u64(seed).fill_bytes(&mut bytes);
        Self::new(Some(bytes))
    }

    /// Key drawn uniformly from `[0, range)`.
    pub fn random_key(&mut self, range: i32) -> i32 {
        self.rng.gen_range(0..range)
    }

    /// `len` distinct keys from `[0, range)`, in draw order.
    ///
    /// Panics if `range` cannot supply `len` distinct keys.
    pub fn distinct_keys(&mut self, len: usize, range: i32) -> Vec<i32> {
        assert!(
            usize::try_from(range).is_ok_and(|r| r >= len),
            "range {range} cannot hold {len} distinct keys"
        );
        let mut seen = std::collections::HashSet::with_capacity(len);
        let mut keys = Vec::with_capacity(len);
        while keys.len() < len {
            let key = self.random_key(range);
            if seen.insert(key) {
                keys.push(key);
            }
        }
        keys
    }
}
