//! Persistent on-disk cache for the prime sieve.
//!
//! This crate locates the primes file among a list of candidate paths,
//! decodes it into a [`BitSieve`](primes_sieve::BitSieve) (falling back to the
//! seed sieve when nothing usable is found), and writes the grown sieve back
//! after a query. Every cache problem is recoverable: the worst case is a
//! memory-only run.

#![warn(missing_docs)]

pub mod cache;
pub mod codec;
pub mod config;
pub mod error;

pub use cache::{Origin, PrimeCache};
pub use codec::{decode, encode, read_cache, write_cache};
pub use config::CacheConfig;
pub use error::CacheError;
