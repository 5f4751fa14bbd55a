//! Jump consistent hashing: stateless bucket arithmetic, no continuum.
//!
//! The jump function maps a 64-bit key hash directly to a bucket index in
//! `[0, num_buckets)`, so the only stored state is the bucket table
//! itself. Growing the table from n to n+1 buckets moves ~1/(n+1) of
//! keys, all of them to the new bucket.

use tracing::debug;

use crate::digest::{digest_to_u64, DigestProvider, Md5};
use crate::error::Error;
use crate::server::{Server, ServerId};

const INITIAL_CAPACITY: usize = 16;

/// Multiplier of the 64-bit linear congruential generator embedded in
/// the jump function (Lamping & Veach, "A Fast, Minimal Memory,
/// Consistent Hash Algorithm", <https://arxiv.org/abs/1406.2294>).
const LCG_MULTIPLIER: u64 = 2862933555777941757;

/// Jump-consistent-hash table over a dense, add-only bucket array.
///
/// Buckets are indexed by `shard_id`, assigned sequentially and never
/// reused. There is no per-server removal: the jump function draws from
/// the whole range `[0, len)`, so compacting or tombstoning an index
/// would remap keys the algorithm promises to keep stable. Servers are
/// dropped only when the table itself is dropped.
pub struct JumpHash<D = Md5> {
    digest: D,
    buckets: Vec<Server>,
}

impl JumpHash<Md5> {
    /// Creates an empty table with the default MD5 digest provider.
    pub fn new() -> Result<JumpHash, Error> {
        JumpHash::with_digest(Md5)
    }
}

impl<D: DigestProvider> JumpHash<D> {
    /// Creates an empty table deriving key hashes through `digest`.
    pub fn with_digest(digest: D) -> Result<JumpHash<D>, Error> {
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(INITIAL_CAPACITY)?;
        Ok(JumpHash { digest, buckets })
    }

    /// Adds a server at the next bucket index and returns its handle.
    ///
    /// The handle value equals the server's `shard_id`. Fails with
    /// [`Error::NameTooLong`] if `name` exceeds
    /// [`MAX_NAME_LEN`](crate::MAX_NAME_LEN) bytes, or with
    /// [`Error::Allocation`] if the table could not grow; either way the
    /// table is unchanged.
    pub fn add_server(&mut self, name: &str) -> Result<ServerId, Error> {
        let shard_id = self.buckets.len() as u64;
        let server = Server::with_shard_id(name, shard_id)?;

        if self.buckets.len() == self.buckets.capacity() {
            let grow = self.buckets.capacity().max(INITIAL_CAPACITY);
            self.buckets.try_reserve_exact(grow)?;
        }
        self.buckets.push(server);

        debug!("added server {} at bucket {}", name, shard_id);
        Ok(ServerId(shard_id))
    }

    /// Maps a key to the server at its jump-hash bucket.
    ///
    /// Pure read path. Fails with [`Error::EmptyRing`] if no servers are
    /// present.
    pub fn get_server<K: AsRef<[u8]>>(&self, key: K) -> Result<&Server, Error> {
        if self.buckets.is_empty() {
            return Err(Error::EmptyRing);
        }

        let hash = digest_to_u64(&self.digest.digest(key.as_ref()));
        let bucket = jump_bucket(hash, self.buckets.len() as u32);
        Ok(&self.buckets[bucket as usize])
    }

    /// Looks up a server by handle.
    pub fn server(&self, id: ServerId) -> Option<&Server> {
        self.buckets.get(id.0 as usize)
    }

    /// Number of buckets in the table.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the table holds no servers.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Maps `key` to a bucket index in `[0, num_buckets)`.
///
/// Iterates a pseudo-random jump sequence seeded by the key, keeping the
/// last bucket index below the candidate count; the loop runs O(ln n)
/// iterations in expectation.
fn jump_bucket(mut key: u64, num_buckets: u32) -> u32 {
    debug_assert!(num_buckets > 0);

    let mut b: i64 = -1;
    let mut j: i64 = 0;
    while j < num_buckets as i64 {
        b = j;
        key = key.wrapping_mul(LCG_MULTIPLIER).wrapping_add(1);
        j = ((b + 1) as f64 * ((1u64 << 31) as f64 / ((key >> 33) + 1) as f64)) as i64;
    }
    b as u32
}
