//! Digest provider seam and hash-value reductions.
//!
//! Ring positions are derived by digesting a name or key and reducing the
//! digest to an integer. The reduction byte order is fixed here so that
//! swapping the digest provider never silently changes which bytes
//! contribute to a hash value.

/// A deterministic 16-byte digest function.
///
/// Providers must be pure: the same input always yields the same digest,
/// with no side effects and no failure modes.
pub trait DigestProvider {
    /// Digests `bytes` into a 16-byte value.
    fn digest(&self, bytes: &[u8]) -> [u8; 16];
}

/// The default digest provider, backed by MD5.
///
/// MD5 is used here for its distribution properties, not for security;
/// ring placement is not an adversarial setting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5;

impl DigestProvider for Md5 {
    fn digest(&self, bytes: &[u8]) -> [u8; 16] {
        md5::compute(bytes).0
    }
}

/// Reduces a digest to a 32-bit ring position: low 4 bytes, little-endian.
pub(crate) fn digest_to_u32(digest: &[u8; 16]) -> u32 {
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Reduces a digest to a 64-bit key hash: low 8 bytes, little-endian.
pub(crate) fn digest_to_u64(digest: &[u8; 16]) -> u64 {
    let mut low = [0u8; 8];
    low.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(low)
}
