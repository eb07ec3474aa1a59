//! Error types for sieve growth and queries.

use std::collections::TryReserveError;

/// Errors that can occur while growing or querying a [`BitSieve`](crate::BitSieve).
///
/// Growth failures leave the sieve exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum SieveError {
    /// The capacity needed to cover the requested index does not fit in `usize`.
    #[error("sieve capacity overflow while growing to cover index {requested}")]
    CapacityOverflow {
        /// The index that triggered the growth.
        requested: usize,
    },

    /// The allocator refused to extend the sieve storage.
    #[error("failed to allocate {bytes} bytes of sieve storage: {source}")]
    AllocationFailed {
        /// The total storage size that was requested.
        bytes: usize,
        /// The underlying reservation error.
        source: TryReserveError,
    },

    /// A query was called with an argument outside its domain.
    #[error("invalid argument {value} for {operation}: {reason}")]
    InvalidArgument {
        /// The query that rejected the argument.
        operation: &'static str,
        /// The rejected value.
        value: usize,
        /// Why the value was rejected.
        reason: &'static str,
    },
}
