//! Byte-packed flag storage with explicit, fallible growth.

use std::collections::TryReserveError;
use std::fmt;

/// Number of flags packed per byte.
pub const BITS_PER_BYTE: usize = 8;

/// A growable sequence of boolean flags packed eight to a byte.
///
/// Flag `i` is stored in bit `i % 8` of byte `i / 8`, least significant bit
/// first. The length is always a whole number of bytes, so [`len`](Self::len)
/// is a multiple of 8.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct PackedBits {
    data: Vec<u8>,
}

impl PackedBits {
    /// Creates an empty flag sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps raw packed bytes without copying.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Returns the number of flags stored (always a multiple of 8).
    pub fn len(&self) -> usize {
        self.data.len() * BITS_PER_BYTE
    }

    /// Returns true if no bytes are allocated.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of backing bytes.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Returns the packed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the sequence and returns the packed bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Gets the flag at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn get(&self, index: usize) -> bool {
        assert!(
            index < self.len(),
            "index {index} out of bounds for length {}",
            self.len()
        );
        self.data[index / BITS_PER_BYTE] & mask(index) != 0
    }

    /// Sets the flag at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn set(&mut self, index: usize) {
        self.data[index / BITS_PER_BYTE] |= mask(index);
    }

    /// Clears the flag at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn clear(&mut self, index: usize) {
        self.data[index / BITS_PER_BYTE] &= !mask(index);
    }

    /// Grows the storage to at least `bytes` bytes, filling new bytes with `fill`.
    ///
    /// Existing bytes are untouched, and nothing happens if the storage is
    /// already large enough. The reservation is fallible so that allocation
    /// failure surfaces as an error instead of aborting the process; on error
    /// the storage is unchanged.
    pub fn ensure_capacity(&mut self, bytes: usize, fill: u8) -> Result<(), TryReserveError> {
        if bytes <= self.data.len() {
            return Ok(());
        }
        self.data.try_reserve_exact(bytes - self.data.len())?;
        self.data.resize(bytes, fill);
        Ok(())
    }

    /// Shrinks the storage to exactly `bytes` bytes if it is currently larger.
    pub fn truncate_bytes(&mut self, bytes: usize) {
        self.data.truncate(bytes);
        self.data.shrink_to_fit();
    }

    /// Returns the index of the first set flag at or after `from`.
    ///
    /// Whole zero bytes are skipped without testing individual bits.
    pub fn next_one(&self, from: usize) -> Option<usize> {
        let byte_idx = from / BITS_PER_BYTE;
        let first = *self.data.get(byte_idx)? & (0xFFu8 << (from % BITS_PER_BYTE));
        if first != 0 {
            return Some(byte_idx * BITS_PER_BYTE + first.trailing_zeros() as usize);
        }
        let rest = byte_idx + 1;
        self.data[rest..]
            .iter()
            .position(|&b| b != 0)
            .map(|offset| {
                let idx = rest + offset;
                idx * BITS_PER_BYTE + self.data[idx].trailing_zeros() as usize
            })
    }

    /// Counts the set flags.
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Iterates over the indices of set flags in ascending order.
    pub fn ones(&self) -> Ones<'_> {
        Ones {
            bits: self,
            cursor: 0,
        }
    }
}

impl fmt::Debug for PackedBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackedBits(len={}, ones={})", self.len(), self.count_ones())
    }
}

/// Ascending iterator over the set flags of a [`PackedBits`].
#[derive(Debug, Clone)]
pub struct Ones<'a> {
    bits: &'a PackedBits,
    cursor: usize,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let index = self.bits.next_one(self.cursor)?;
        self.cursor = index + 1;
        Some(index)
    }
}

#[inline]
fn mask(index: usize) -> u8 {
    1 << (index % BITS_PER_BYTE)
}
