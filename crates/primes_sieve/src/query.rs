//! Query operations layered on [`BitSieve`]: factorization and enumeration.
//!
//! Every query grows the sieve as needed. Enumerations are lazy and borrow
//! the sieve mutably for their whole lifetime; when a scan reaches the end
//! of the current capacity the sieve grows by [`ENUMERATION_GROWTH_FACTOR`].

use crate::error::SieveError;
use crate::sieve::BitSieve;

/// Multiplier applied to the capacity each time an enumeration runs out of
/// known primes.
pub const ENUMERATION_GROWTH_FACTOR: usize = 16;

impl BitSieve {
    /// Returns the prime factors of `n` in ascending order, with multiplicity.
    ///
    /// A prime `n` yields `[n]` and `1` yields an empty list. The sieve is
    /// grown to cover `n`, after which every candidate divisor is read from
    /// it instead of being tested for primality separately.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::InvalidArgument`] for `n == 0`.
    pub fn factorize(&mut self, n: usize) -> Result<Vec<usize>, SieveError> {
        if n == 0 {
            return Err(SieveError::InvalidArgument {
                operation: "factorize",
                value: n,
                reason: "zero has no prime factorization",
            });
        }
        if self.is_prime(n)? {
            return Ok(vec![n]);
        }

        let mut factors = Vec::new();
        let mut quotient = n;
        let mut cursor = 2;
        while quotient > 1 {
            let Some(m) = self.bits.next_one(cursor) else {
                break;
            };
            if m.checked_mul(m).map_or(true, |sq| sq > quotient) {
                // No prime up to the square root divides it.
                factors.push(quotient);
                break;
            }
            if quotient % m == 0 {
                factors.push(m);
                quotient /= m;
                // Smaller primes were already divided out; retry m.
                cursor = m;
            } else {
                cursor = m + 1;
            }
        }
        Ok(factors)
    }

    /// Lazily yields the first `k` primes in ascending order.
    ///
    /// Restartable only by calling this again. `k == 0` yields nothing.
    pub fn enumerate_at_least(&mut self, k: usize) -> FirstPrimes<'_> {
        FirstPrimes {
            sieve: self,
            cursor: 0,
            remaining: k,
        }
    }

    /// Lazily yields every prime `<= n` in ascending order.
    pub fn enumerate_up_to(&mut self, n: usize) -> PrimesUpTo<'_> {
        PrimesUpTo {
            sieve: self,
            cursor: 0,
            limit: n,
            done: false,
        }
    }

    /// Grows the sieve by [`ENUMERATION_GROWTH_FACTOR`].
    fn grow_for_enumeration(&mut self) -> Result<(), SieveError> {
        let target = self
            .capacity()
            .checked_mul(ENUMERATION_GROWTH_FACTOR)
            .ok_or(SieveError::CapacityOverflow {
                requested: self.capacity(),
            })?;
        self.ensure(target - 1)
    }
}

/// Iterator over the first `k` primes, returned by
/// [`BitSieve::enumerate_at_least`].
///
/// Yields `Err` at most once, if growth fails, and is fused afterwards.
#[derive(Debug)]
pub struct FirstPrimes<'a> {
    sieve: &'a mut BitSieve,
    cursor: usize,
    remaining: usize,
}

impl Iterator for FirstPrimes<'_> {
    type Item = Result<usize, SieveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            if let Some(p) = self.sieve.bits.next_one(self.cursor) {
                self.cursor = p + 1;
                self.remaining -= 1;
                return Some(Ok(p));
            }
            self.cursor = self.sieve.capacity();
            if let Err(e) = self.sieve.grow_for_enumeration() {
                self.remaining = 0;
                return Some(Err(e));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

/// Iterator over all primes up to an inclusive bound, returned by
/// [`BitSieve::enumerate_up_to`].
///
/// Yields `Err` at most once, if growth fails, and is fused afterwards.
#[derive(Debug)]
pub struct PrimesUpTo<'a> {
    sieve: &'a mut BitSieve,
    cursor: usize,
    limit: usize,
    done: bool,
}

impl Iterator for PrimesUpTo<'_> {
    type Item = Result<usize, SieveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.sieve.bits.next_one(self.cursor) {
                Some(p) if p > self.limit => {
                    self.done = true;
                    return None;
                }
                Some(p) => {
                    self.cursor = p + 1;
                    return Some(Ok(p));
                }
                None if self.sieve.capacity() > self.limit => {
                    self.done = true;
                    return None;
                }
                None => {
                    self.cursor = self.sieve.capacity();
                    if let Err(e) = self.sieve.grow_for_enumeration() {
                        self.done = true;
                        return Some(Err(e));
                    }
                }
            }
        }
    }
}
