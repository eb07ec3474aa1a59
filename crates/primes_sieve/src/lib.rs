//! Incrementally growable Sieve of Eratosthenes.
//!
//! This crate provides [`BitSieve`], a byte-packed primality table that grows
//! geometrically on demand, and the query operations layered on top of it:
//! primality tests, factorization, and enumeration of primes by count or by
//! bound. Growth only ever sieves the newly added region, so a sieve loaded
//! from a previous run keeps paying off.

#![warn(missing_docs)]

pub mod bits;
pub mod error;
pub mod query;
pub mod sieve;

pub use bits::PackedBits;
pub use error::SieveError;
pub use query::{FirstPrimes, PrimesUpTo, ENUMERATION_GROWTH_FACTOR};
pub use sieve::{BitSieve, SEED_BYTE, SEED_CAPACITY};
