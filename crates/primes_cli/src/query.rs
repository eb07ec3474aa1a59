//! Query dispatch: runs exactly one query against the sieve.

use std::error::Error;
use std::io::Write;

use primes_sieve::BitSieve;

use crate::output::{OutputFormat, PrimeWriter};

/// A query selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Query {
    /// Print the number if prime, otherwise its prime factors.
    Factor(usize),
    /// Print the first K primes.
    Count(usize),
    /// Print every prime up to and including N.
    UpTo(usize),
}

impl Query {
    /// Short name used in JSON reports.
    pub fn name(self) -> &'static str {
        match self {
            Query::Factor(_) => "factor",
            Query::Count(_) => "count",
            Query::UpTo(_) => "up_to",
        }
    }

    /// The numeric argument of the query.
    pub fn argument(self) -> usize {
        match self {
            Query::Factor(n) | Query::Count(n) | Query::UpTo(n) => n,
        }
    }
}

/// Runs `query` against `sieve`, writing results to `out` as they are found.
///
/// Text output already written stays written if the query fails partway.
pub fn execute<W: Write>(
    query: Query,
    sieve: &mut BitSieve,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    log::debug!("running {query:?} against {sieve:?}");
    let mut writer = PrimeWriter::new(format, out);

    match query {
        Query::Factor(n) => {
            for p in sieve.factorize(n)? {
                writer.push(p)?;
            }
        }
        Query::Count(k) => {
            for p in sieve.enumerate_at_least(k) {
                writer.push(p?)?;
            }
        }
        Query::UpTo(n) => {
            for p in sieve.enumerate_up_to(n) {
                writer.push(p?)?;
            }
        }
    }

    writer.finish(query.name(), Some(query.argument()))?;
    Ok(())
}
