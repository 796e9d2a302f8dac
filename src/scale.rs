//! Compression of 64-bit hash values into a table index range.
//!
//! Indices are derived with MAD ("multiply-add-divide") compression,
//! `(hash * PRIME_A + PRIME_B) mod capacity`, using the two largest primes
//! below 2^64. The multiply and add wrap exactly like 64-bit unsigned
//! arithmetic, so the mapping is stable across platforms for a given
//! capacity. MAD spreads keys across the table without requiring a prime
//! table size.

/// The largest prime below 2^64.
pub const PRIME_A: u64 = 18_446_744_073_709_551_557;

/// The second largest prime below 2^64.
pub const PRIME_B: u64 = 18_446_744_073_709_551_533;

/// Exclusive upper bound on the number of slots a table may have.
///
/// Slot positions must stay representable as a signed offset, and one index
/// (`capacity`) is reserved for the end position of cursors.
pub const MAX_CAPACITY: usize = isize::MAX as usize;

/// Maps `hash` onto `0..capacity`.
///
/// `capacity` must be non-zero and below [`MAX_CAPACITY`].
///
/// # Examples
///
/// ```rust
/// use mad_hash::scale::scale;
///
/// let index = scale(0xDEAD_BEEF, 7);
/// assert!(index < 7);
/// assert_eq!(index, scale(0xDEAD_BEEF, 7));
/// ```
#[inline(always)]
pub fn scale(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "cannot scale a hash into an empty table");
    debug_assert!(capacity < MAX_CAPACITY);

    (hash.wrapping_mul(PRIME_A).wrapping_add(PRIME_B) % capacity as u64) as usize
}
