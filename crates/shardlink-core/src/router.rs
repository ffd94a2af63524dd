//! Deterministic key-to-shard routing.
//!
//! A key is owned by exactly one shard: `checksum(key) % pool_size`, where the
//! checksum is the sum of the key's Unicode scalar values. The result depends
//! only on the key and the pool size, so writers and readers agree without any
//! coordination.
//!
//! The checksum is deliberately weak. Anagrams (`"abc"`, `"cba"`) land on the
//! same shard, and keys that differ only slightly in a single position land on
//! neighbouring shards. Balance therefore depends on the identifier generator
//! producing well-spread keys. Replacing the checksum changes the owner of
//! existing keys and must come with a data migration.

use crate::error::ConfigError;
use crate::shortcode::ShortCode;
use std::num::NonZeroUsize;

/// Sum of the Unicode scalar values of `key`.
pub fn checksum(key: &str) -> u64 {
    key.chars()
        .fold(0_u64, |acc, c| acc.wrapping_add(u64::from(u32::from(c))))
}

/// Index of the shard owning `key` in a pool of `shards` backends.
pub fn shard_index(key: &str, shards: usize) -> Result<usize, ConfigError> {
    let shards = NonZeroUsize::new(shards).ok_or(ConfigError::EmptyPool)?;
    Ok(owner(key, shards))
}

fn owner(key: &str, shards: NonZeroUsize) -> usize {
    (checksum(key) % shards.get() as u64) as usize
}

/// Picks the backend owning `key` out of `pool`.
pub fn select<'a, B>(key: &str, pool: &'a [B]) -> Result<&'a B, ConfigError> {
    let index = shard_index(key, pool.len())?;
    Ok(&pool[index])
}

/// A fixed, ordered, non-empty set of shard backends.
///
/// The pool is built once at start-up and never changes afterwards; it is
/// shared read-only between concurrent requests.
#[derive(Debug, Clone)]
pub struct Pool<B> {
    shards: Vec<B>,
    size: NonZeroUsize,
}

/// The shard a key was routed to.
#[derive(Debug)]
pub struct Shard<'a, B> {
    pub index: usize,
    pub backend: &'a B,
}

impl<B> Pool<B> {
    /// Creates a pool from the given backends, in index order.
    pub fn new(shards: Vec<B>) -> Result<Self, ConfigError> {
        let size = NonZeroUsize::new(shards.len()).ok_or(ConfigError::EmptyPool)?;
        Ok(Self { shards, size })
    }

    pub fn len(&self) -> usize {
        self.shards.len()
    }

    /// Whether the pool holds no shards. A constructed pool never does.
    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    pub fn shards(&self) -> &[B] {
        &self.shards
    }

    pub fn get(&self, index: usize) -> Option<&B> {
        self.shards.get(index)
    }

    /// Routes `code` to its owning shard.
    pub fn route(&self, code: &ShortCode) -> Shard<'_, B> {
        let index = owner(code.as_str(), self.size);
        Shard {
            index,
            backend: &self.shards[index],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: usize) -> Pool<usize> {
        Pool::new((0..n).collect()).unwrap()
    }

    #[test]
    fn checksum_is_sum_of_code_points() {
        assert_eq!(checksum(""), 0);
        assert_eq!(checksum("a"), 97);
        assert_eq!(checksum("abc"), 97 + 98 + 99);
        assert_eq!(checksum("é"), 0xE9);
        assert_eq!(checksum("😀"), 0x1F600);
    }

    #[test]
    fn shard_index_is_checksum_mod_pool_size() {
        // 97 + 98 + 99 = 294
        assert_eq!(shard_index("abc", 3).unwrap(), 294 % 3);
        assert_eq!(shard_index("abc", 5).unwrap(), 294 % 5);
        assert_eq!(shard_index("abc", 1).unwrap(), 0);
    }

    #[test]
    fn empty_key_lands_on_first_shard() {
        assert_eq!(shard_index("", 3).unwrap(), 0);
    }

    #[test]
    fn empty_pool_is_a_configuration_error() {
        assert_eq!(shard_index("abc", 0), Err(ConfigError::EmptyPool));

        let empty: Vec<u8> = Vec::new();
        assert_eq!(select("abc", &empty).unwrap_err(), ConfigError::EmptyPool);
        assert_eq!(Pool::<u8>::new(Vec::new()).unwrap_err(), ConfigError::EmptyPool);
    }

    #[test]
    fn routing_is_deterministic() {
        let pool = pool(3);
        for key in ["abc123", "zZ9_-", "x", "a-much-longer-identifier"] {
            let code = ShortCode::new_unchecked(key);
            let first = pool.route(&code).index;
            for _ in 0..10 {
                assert_eq!(pool.route(&code).index, first);
            }
            assert_eq!(first, shard_index(key, 3).unwrap());
        }
    }

    #[test]
    fn select_and_route_agree() {
        for size in 1..=16 {
            let pool = pool(size);
            for key in ["a", "bb", "ccc", "abc123", "Q9x_-z", "zzzzzzzzzzzzzzzz"] {
                let code = ShortCode::new_unchecked(key);
                let routed = pool.route(&code);
                assert_eq!(*routed.backend, routed.index);
                assert_eq!(routed.index, shard_index(key, size).unwrap());
                assert_eq!(select(key, pool.shards()).unwrap(), routed.backend);
            }
        }
    }

    #[test]
    fn anagrams_share_a_shard() {
        let pool = pool(3);
        let a = pool.route(&ShortCode::new_unchecked("abc")).index;
        let b = pool.route(&ShortCode::new_unchecked("cab")).index;
        let c = pool.route(&ShortCode::new_unchecked("bca")).index;
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn sequential_keys_reach_every_shard() {
        let pool = pool(3);
        let mut hits = [0_usize; 3];
        for i in 0..300 {
            let code = ShortCode::new_unchecked(format!("id{:04}", i));
            hits[pool.route(&code).index] += 1;
        }
        assert!(hits.iter().all(|&n| n > 0), "hits: {hits:?}");
    }

    #[test]
    fn pool_accessors() {
        let pool = pool(3);
        assert_eq!(pool.len(), 3);
        assert!(!pool.is_empty());
        assert_eq!(pool.get(2), Some(&2));
        assert_eq!(pool.get(3), None);
        assert_eq!(pool.shards(), &[0, 1, 2]);
    }
}
