//! Unique random identifier generation.
//!
//! Issuer codes and CUSIPs must be unique within a run. Uniqueness state is
//! an explicit set owned by the caller, not global state, so the generator
//! stays pure and independently testable.

use std::collections::HashSet;

use rand::Rng;

use crate::error::GenerateError;

/// Uppercase letters, used for issuer code suffixes.
pub const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Uppercase letters and digits, used for CUSIPs.
pub const UPPERCASE_ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Upper bound on redraws before giving up on finding a free identifier.
///
/// For realistic sizes (9-char CUSIPs, 4-char issuer suffixes) a collision
/// is rare and a second draw almost always succeeds; the cap only matters
/// when the requested count approaches the alphabet's capacity, where an
/// uncapped loop would hang.
const MAX_ATTEMPTS: usize = 10_000;

/// Draw a random string of `length` characters from `alphabet`.
pub fn random_code(rng: &mut impl Rng, length: usize, alphabet: &[u8]) -> String {
    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// Draw random strings until one is absent from `taken`, then register and
/// return it.
///
/// # Errors
/// Returns [`GenerateError::CapacityExhausted`] when no free identifier is
/// found within the attempt cap.
pub fn next_unique(
    rng: &mut impl Rng,
    length: usize,
    alphabet: &[u8],
    taken: &mut HashSet<String>,
) -> Result<String, GenerateError> {
    for _ in 0..MAX_ATTEMPTS {
        let code = random_code(rng, length, alphabet);
        if !taken.contains(&code) {
            taken.insert(code.clone());
            return Ok(code);
        }
    }
    Err(GenerateError::CapacityExhausted {
        length,
        alphabet_size: alphabet.len(),
        attempts: MAX_ATTEMPTS,
    })
}
