use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One step of a positional-list workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListOp {
    /// Insert `value` so that it lands at `index`.
    Insert { index: usize, value: u32 },
    /// Remove the element at `index`.
    Remove { index: usize },
}

/// Seeded random source for reproducible workloads.
///
/// Uses the xoshiro256** PRNG; the same seed always yields the same
/// sequence.
///
/// # Examples
///
/// ```
/// use rank_forest_util::Fuzzer;
///
/// let fuzzer = Fuzzer::from_u64(7);
/// let i = fuzzer.position(10);
/// assert!(i <= 10);
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: Mutex<Xoshiro256StarStar>,
}

impl Fuzzer {
    /// Create a new fuzzer with an optional seed.
    ///
    /// If no seed is provided, a random seed is drawn from `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });
        Self {
            seed,
            rng: Mutex::new(Xoshiro256StarStar::from_seed(seed)),
        }
    }

    /// Seed from a single integer, little-endian in the first eight bytes.
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self::new(Some(bytes))
    }

    fn rng(&self) -> MutexGuard<'_, Xoshiro256StarStar> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&self, len: usize) -> usize {
        self.rng().gen_range(0..len)
    }

    /// Uniform insertion point in `0..=len`.
    pub fn position(&self, len: usize) -> usize {
        self.rng().gen_range(0..=len)
    }

    /// Generate a random boolean with the given probability of being true.
    pub fn random_bool(&self, probability: f64) -> bool {
        self.rng().gen_bool(probability)
    }

    /// Pick a random element from a non-empty slice.
    pub fn pick<'a, T>(&self, elements: &'a [T]) -> &'a T {
        &elements[self.index(elements.len())]
    }

    /// Interleaved inserts and removals over a list that starts empty.
    ///
    /// Inserted values are `0, 1, 2, ...` in insertion order, so they are
    /// unique. Removal indices are always in range for the length the list
    /// has at that step; `insert_probability` is used while the list is
    /// non-empty.
    pub fn list_workload(&self, steps: usize, insert_probability: f64) -> Vec<ListOp> {
        let mut len = 0usize;
        let mut next_value = 0u32;
        let mut ops = Vec::with_capacity(steps);
        for _ in 0..steps {
            if len > 0 && !self.random_bool(insert_probability) {
                ops.push(ListOp::Remove {
                    index: self.index(len),
                });
                len -= 1;
            } else {
                ops.push(ListOp::Insert {
                    index: self.position(len),
                    value: next_value,
                });
                next_value += 1;
                len += 1;
            }
        }
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzer_reproducible() {
        let fuzzer1 = Fuzzer::from_u64(42);
        let fuzzer2 = Fuzzer::from_u64(42);
        for _ in 0..10 {
            assert_eq!(fuzzer1.position(1000), fuzzer2.position(1000));
        }
        assert_eq!(fuzzer1.seed, fuzzer2.seed);
    }

    #[test]
    fn test_fuzzer_ranges() {
        let fuzzer = Fuzzer::new(None);
        for _ in 0..100 {
            assert!(fuzzer.index(5) < 5);
            assert!(fuzzer.position(5) <= 5);
        }
        let choices = [1, 2, 3];
        assert!(choices.contains(fuzzer.pick(&choices)));
    }

    #[test]
    fn test_list_workload_stays_in_range() {
        let fuzzer = Fuzzer::from_u64(3);
        let ops = fuzzer.list_workload(2_000, 0.5);
        assert_eq!(ops.len(), 2_000);

        let mut len = 0usize;
        let mut seen = std::collections::HashSet::new();
        for op in ops {
            match op {
                ListOp::Insert { index, value } => {
                    assert!(index <= len);
                    assert!(seen.insert(value));
                    len += 1;
                }
                ListOp::Remove { index } => {
                    assert!(index < len);
                    len -= 1;
                }
            }
        }
    }
}
