//! Hash-and-displace perfect hash table over domain keys.
//!
//! Level 0 picks a bucket from a rolling hash computed right to left, so the
//! hash of every label suffix of a candidate falls out of a single pass; the
//! rolling value is finalized before masking so its weak low bits do not pick
//! the bucket alone.
//! Level 1 stores, per bucket, a displacement seed that places every key of
//! the bucket into its own slot. A lookup is two array reads plus one key
//! comparison.

use smallvec::SmallVec;

use crate::error::{BuildErrorKind, MatcherError, Result};
use crate::types::RuleIndex;

/// Multiplier of the rolling hash (32-bit FNV prime).
const PRIME_RK: u32 = 16_777_619;

/// Seeds tried per bucket before the build is abandoned.
pub(crate) const MAX_SEED_ATTEMPTS: u32 = 1 << 20;

/// Marks an unoccupied level-1 slot. Also bounds the number of keys.
const EMPTY_SLOT: u32 = u32::MAX;

/// Rule indices registered under one key.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeyRules {
    /// Full patterns: only the key itself matches
    pub full: SmallVec<[RuleIndex; 1]>,
    /// Domain patterns: the key and all of its subdomains match
    pub domain: SmallVec<[RuleIndex; 1]>,
}

impl KeyRules {
    pub fn is_empty(&self) -> bool {
        self.full.is_empty() && self.domain.is_empty()
    }
}

/// Fold one more byte (moving leftwards) into a rolling hash.
#[inline]
pub(crate) fn roll(hash: u32, byte: u8) -> u32 {
    hash.wrapping_mul(PRIME_RK).wrapping_add(byte as u32)
}

/// Rolling hash of a whole key. Equals the value reached by calling [`roll`]
/// on the key's bytes from last to first.
#[inline]
pub(crate) fn rolling_hash(key: &str) -> u32 {
    key.bytes().rev().fold(0, roll)
}

/// Level-0 bucket selector: murmur3 finalizer over the rolling hash.
#[inline]
fn bucket_hash(hash: u32) -> u32 {
    let mut h = hash;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Seeded 64-bit FNV-1a with a final avalanche, folded to 32 bits.
#[inline]
fn seeded_hash(key: &str, seed: u32) -> u32 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325 ^ (seed as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
    for b in key.bytes() {
        h ^= b as u64;
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
    }
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    (h ^ (h >> 32)) as u32
}

/// Frozen perfect hash table
#[derive(Debug)]
pub(crate) struct MphTable {
    level0: Vec<u32>,
    level0_mask: usize,
    level1: Vec<u32>,
    level1_mask: usize,
    keys: Vec<Box<str>>,
    rules: Vec<KeyRules>,
}

/// Displacement seeds and slot assignment found for a key set.
pub(crate) struct Displacement {
    level0: Vec<u32>,
    level1: Vec<u32>,
    buckets: usize,
}

impl Displacement {
    /// Search a seed for every level-0 bucket, largest buckets first.
    ///
    /// Keys must be distinct. The result depends only on the key order.
    pub fn search(keys: &[Box<str>]) -> Result<Self> {
        Self::search_with(keys, MAX_SEED_ATTEMPTS)
    }

    /// Like [`Displacement::search`], trying at most `max_attempts` seeds per bucket.
    pub fn search_with(keys: &[Box<str>], max_attempts: u32) -> Result<Self> {
        let key_count = keys.len();
        if key_count >= EMPTY_SLOT as usize {
            return Err(MatcherError::build(
                BuildErrorKind::TooManyKeys,
                format!("too many keys: {}", key_count),
            ));
        }

        // Average bucket holds about four keys; level 1 stays below 80% load.
        let level0_len = (key_count / 4).max(1).next_power_of_two();
        let level1_len = (key_count + key_count / 4).max(1).next_power_of_two();
        let level0_mask = level0_len - 1;
        let level1_mask = level1_len - 1;

        let mut sparse: Vec<Vec<u32>> = vec![Vec::new(); level0_len];
        for (i, key) in keys.iter().enumerate() {
            sparse[bucket_hash(rolling_hash(key)) as usize & level0_mask].push(i as u32);
        }

        let mut buckets: Vec<(usize, Vec<u32>)> = sparse
            .into_iter()
            .enumerate()
            .filter(|(_, members)| !members.is_empty())
            .collect();
        // Stable: equal-sized buckets keep their level-0 order.
        buckets.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

        let mut level0 = vec![0u32; level0_len];
        let mut level1 = vec![EMPTY_SLOT; level1_len];
        let mut placed: Vec<usize> = Vec::new();

        for (bucket, members) in &buckets {
            let mut seed = 0u32;
            loop {
                placed.clear();
                let mut collided = false;
                for &i in members {
                    let slot = seeded_hash(&keys[i as usize], seed) as usize & level1_mask;
                    if level1[slot] != EMPTY_SLOT {
                        collided = true;
                        break;
                    }
                    level1[slot] = i;
                    placed.push(slot);
                }

                if !collided {
                    level0[*bucket] = seed;
                    break;
                }

                for &slot in &placed {
                    level1[slot] = EMPTY_SLOT;
                }
                seed += 1;
                if seed >= max_attempts {
                    return Err(MatcherError::build(
                        BuildErrorKind::SeedExhausted,
                        format!(
                            "no displacement seed for bucket {} ({} keys) after {} attempts",
                            bucket,
                            members.len(),
                            max_attempts
                        ),
                    ));
                }
            }
        }

        Ok(Self {
            level0,
            level1,
            buckets: buckets.len(),
        })
    }

    pub fn buckets(&self) -> usize {
        self.buckets
    }
}

impl MphTable {
    /// Assemble a table from a successful displacement search over `keys`.
    pub fn new(displacement: Displacement, keys: Vec<Box<str>>, rules: Vec<KeyRules>) -> Self {
        debug_assert_eq!(keys.len(), rules.len());
        let Displacement { level0, level1, .. } = displacement;
        Self {
            level0_mask: level0.len() - 1,
            level1_mask: level1.len() - 1,
            level0,
            level1,
            keys,
            rules,
        }
    }

    /// Look up `key` whose rolling hash is `hash`.
    ///
    /// The level-1 hash reads all of `key`, so looking up every label suffix of a
    /// candidate costs O(depth * length) in total.
    #[inline]
    pub fn lookup(&self, hash: u32, key: &str) -> Option<&KeyRules> {
        let seed = self.level0[bucket_hash(hash) as usize & self.level0_mask];
        let slot = self.level1[seeded_hash(key, seed) as usize & self.level1_mask];
        if slot == EMPTY_SLOT {
            return None;
        }
        let i = slot as usize;
        if &*self.keys[i] == key {
            Some(&self.rules[i])
        } else {
            None
        }
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn slot_count(&self) -> usize {
        self.level1.len()
    }
}
