use blake3::Hasher;

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// Used for seeding and short fingerprints only. Nothing here depends on collision
/// resistance beyond "different dates almost surely get different seeds".
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

/// Seed for the daily pick, derived only from the ISO date string.
///
/// The value is stable across processes, machines and releases, which is what lets
/// any host recompute the same day's word from the history file alone.
#[inline]
pub fn date_seed(date_key: &str) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(b"semantle:daily-word|");
    hasher.update(date_key.as_bytes());

    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

/// Short hex fingerprint for logging values that must not appear verbatim (e.g. client IPs).
#[inline]
pub fn fingerprint(value: &str) -> String {
    let hex = blake3::hash(value.as_bytes()).to_hex();
    hex.as_str()[..8].to_string()
}
