//! The growable bit-packed Sieve of Eratosthenes.
//!
//! A [`BitSieve`] holds one flag per candidate index `0..capacity`; a set
//! flag means the index is prime. When a query needs an index beyond the
//! current capacity, [`BitSieve::ensure`] doubles the storage until it is
//! large enough and sieves only the newly added region. Flags below the old
//! capacity are never recomputed.

use std::fmt;

use crate::bits::{PackedBits, BITS_PER_BYTE};
use crate::error::SieveError;

/// Packed primality of indices 0 through 7: bits 2, 3, 5 and 7 are set.
pub const SEED_BYTE: u8 = 0b1010_1100;

/// Capacity of the seed sieve.
pub const SEED_CAPACITY: usize = BITS_PER_BYTE;

/// A byte-packed primality table that grows on demand.
///
/// Capacity is always a multiple of 8 and only ever increases. Every flag
/// below the capacity is final: set iff the index is prime.
#[derive(Clone, PartialEq, Eq)]
pub struct BitSieve {
    pub(crate) bits: PackedBits,
}

impl BitSieve {
    /// Creates the minimal sieve covering indices 0 through 7.
    pub fn seed() -> Self {
        Self {
            bits: PackedBits::from_bytes(vec![SEED_BYTE]),
        }
    }

    /// Builds a sieve from packed bytes that are trusted to be correct.
    ///
    /// No sieving pass is run over the input. Flags 0 and 1 are always
    /// cleared, and an empty input yields the [seed](Self::seed).
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            return Self::seed();
        }
        let mut bits = PackedBits::from_bytes(bytes);
        bits.clear(0);
        bits.clear(1);
        Self { bits }
    }

    /// Returns the number of indices covered by the sieve.
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Returns the packed flag bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }

    /// Returns the flag at `index` without growing, or `None` if `index`
    /// lies beyond the current capacity.
    pub fn flag(&self, index: usize) -> Option<bool> {
        (index < self.capacity()).then(|| self.bits.get(index))
    }

    /// Returns the number of primes currently known.
    pub fn prime_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterates over every currently known prime in ascending order.
    ///
    /// This never grows the sieve.
    pub fn known_primes(&self) -> crate::bits::Ones<'_> {
        self.bits.ones()
    }

    /// Grows the sieve until its capacity exceeds `n`.
    ///
    /// The byte storage doubles (possibly several times) until it covers
    /// `n`, the new region is initialized to "prime", and every known prime
    /// `p` with `p * p` below the new capacity clears its multiples inside
    /// the new region. Does nothing if `n` is already covered.
    ///
    /// On error the sieve is left unchanged.
    pub fn ensure(&mut self, n: usize) -> Result<(), SieveError> {
        if n < self.capacity() {
            return Ok(());
        }

        let old_bytes = self.bits.byte_len();
        let needed = n / BITS_PER_BYTE;
        let mut new_bytes = old_bytes.max(1);
        while new_bytes <= needed {
            new_bytes = new_bytes
                .checked_mul(2)
                .ok_or(SieveError::CapacityOverflow { requested: n })?;
        }
        if new_bytes.checked_mul(BITS_PER_BYTE).is_none() {
            return Err(SieveError::CapacityOverflow { requested: n });
        }

        self.bits
            .ensure_capacity(new_bytes, 0xFF)
            .map_err(|source| SieveError::AllocationFailed {
                bytes: new_bytes,
                source,
            })?;

        let old_capacity = old_bytes * BITS_PER_BYTE;
        log::debug!(
            "growing sieve from {old_capacity} to {} indices to cover {n}",
            self.capacity()
        );
        self.sweep(old_capacity);
        Ok(())
    }

    /// Returns whether `n` is prime, growing the sieve if needed.
    pub fn is_prime(&mut self, n: usize) -> Result<bool, SieveError> {
        self.ensure(n)?;
        Ok(self.bits.get(n))
    }

    /// Clears every composite in `[old_capacity, capacity)`.
    ///
    /// Primes are visited in ascending order, so by the time a flag in the
    /// new region is reached all of its smaller prime factors have already
    /// swept and the flag is final. A composite below the new capacity has a
    /// prime factor whose square is also below it, which bounds the loop.
    /// Indices 0 and 1 never sweep.
    fn sweep(&mut self, old_capacity: usize) {
        let new_capacity = self.capacity();
        let mut cursor = 2;
        while let Some(p) = self.bits.next_one(cursor) {
            let square = match p.checked_mul(p) {
                Some(sq) if sq < new_capacity => sq,
                _ => break,
            };
            let first_new = old_capacity.div_ceil(p).saturating_mul(p);
            let start = square.max(first_new);
            for j in (start..new_capacity).step_by(p) {
                self.bits.clear(j);
            }
            cursor = p + 1;
        }
    }
}

impl Default for BitSieve {
    fn default() -> Self {
        Self::seed()
    }
}

impl fmt::Debug for BitSieve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BitSieve(capacity={}, primes={})",
            self.capacity(),
            self.prime_count()
        )
    }
}
