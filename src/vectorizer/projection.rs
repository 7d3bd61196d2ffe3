use std::collections::HashMap;

use rand::{rngs::StdRng, Rng, SeedableRng};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64-bit
#[inline]
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Sparse ternary projection seeded by a hash
/// Each element is +1 with p=1/6, -1 with p=1/6, 0 otherwise.
pub fn project_hash(hash: u64, dimensions: usize) -> Vec<i8> {
    let mut rng = StdRng::seed_from_u64(hash);
    (0..dimensions)
        .map(|_| match rng.gen_range(0..6u8) {
            0 => 1,
            1 => -1,
            _ => 0,
        })
        .collect()
}

/// Projection of a string key, a pure function of `key` and `dimensions`
#[inline]
pub fn project(key: &str, dimensions: usize) -> Vec<i8> {
    project_hash(fnv1a64(key.as_bytes()), dimensions)
}

/// Memoizing projection generator
/// One per document; never shared between workers.
#[derive(Debug)]
pub struct Projector {
    dimensions: usize,
    cache: HashMap<u64, Box<[i8]>>,
}

impl Projector {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            cache: HashMap::new(),
        }
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Get the projection of `key`, generating it on first use
    pub fn project(&mut self, key: &str) -> &[i8] {
        let dimensions = self.dimensions;
        let hash = fnv1a64(key.as_bytes());
        self.cache
            .entry(hash)
            .or_insert_with(|| project_hash(hash, dimensions).into_boxed_slice())
    }

    /// number of distinct projections materialized so far
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a64_known_values() {
        assert_eq!(fnv1a64(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a64(b"a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fnv1a64(b"foobar"), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn projection_is_deterministic() {
        let a = project("thesun", 1024);
        let b = project("thesun", 1024);
        assert_eq!(a.len(), 1024);
        assert_eq!(a, b);
        assert_ne!(a, project("sunthe", 1024));
    }

    /// Pinned prefix, the same key must give the same vector in every process
    #[test]
    fn projection_is_stable_across_runs() {
        let v = project("thesun", 1024);
        assert_eq!(&v[..16], &[0, 0, 0, 0, 1, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn projector_matches_pure_function_regardless_of_order() {
        let mut first = Projector::new(64);
        let mut second = Projector::new(64);
        let keys = ["alpha", "beta", "gamma", "alpha", ""];
        let forward: Vec<Vec<i8>> = keys.iter().map(|k| first.project(k).to_vec()).collect();
        let backward: Vec<Vec<i8>> = keys.iter().rev().map(|k| second.project(k).to_vec()).collect();
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(forward[i], project(key, 64));
            assert_eq!(backward[keys.len() - 1 - i], forward[i]);
        }
        // "alpha" is memoized
        assert_eq!(first.cached(), 4);
    }

    #[test]
    fn only_ternary_values() {
        let v = project("anything", 4096);
        assert!(v.iter().all(|&x| x == -1 || x == 0 || x == 1));
    }

    #[test]
    fn element_distribution_is_sparse_ternary() {
        let (mut pos, mut neg, mut zero) = (0usize, 0usize, 0usize);
        for i in 0..200 {
            for x in project(&format!("key{i}"), 1024) {
                match x {
                    1 => pos += 1,
                    -1 => neg += 1,
                    _ => zero += 1,
                }
            }
        }
        let total = (pos + neg + zero) as f64;
        // 204800 draws, tolerance is many standard deviations wide
        assert!((pos as f64 / total - 1.0 / 6.0).abs() < 0.01, "pos {pos}");
        assert!((neg as f64 / total - 1.0 / 6.0).abs() < 0.01, "neg {neg}");
        assert!((zero as f64 / total - 4.0 / 6.0).abs() < 0.01, "zero {zero}");
    }
}
