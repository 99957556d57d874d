//! ULID generation.
//!
//! 26 characters of Crockford Base32: the first 10 encode a 48-bit millisecond
//! Unix timestamp, the last 16 carry 80 bits from a per-thread RNG seeded once
//! from the OS. Lexicographic ordering is monotonic within a millisecond only
//! for IDs produced on the same thread; the protocol does not require
//! cross-thread ordering, so no shared counter is used.

use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

const CROCKFORD: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const TIME_CHARS: usize = 10;
const RANDOM_CHARS: usize = 16;

/// Generate one ULID.
pub fn generate() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut out = [0u8; TIME_CHARS + RANDOM_CHARS];
    encode_base32(millis, &mut out[..TIME_CHARS]);

    let mut rng = rand::thread_rng();
    for slot in &mut out[TIME_CHARS..] {
        *slot = CROCKFORD[rng.gen_range(0..32)];
    }

    // All bytes come from the Base32 alphabet.
    String::from_utf8_lossy(&out).into_owned()
}

/// Big-endian Base32 encoding of `value` into `dest`, most significant
/// character first.
fn encode_base32(mut value: u64, dest: &mut [u8]) {
    for slot in dest.iter_mut().rev() {
        *slot = CROCKFORD[(value % 32) as usize];
        value /= 32;
    }
}
