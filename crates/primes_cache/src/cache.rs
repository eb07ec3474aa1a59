//! High-level cache orchestrator.
//!
//! [`PrimeCache`] ties the configuration and the codec together: it picks a
//! source and a destination for the primes file, loads the sieve (or the seed
//! when nothing is found), hands it out for querying, and writes it back when
//! it has grown.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use primes_sieve::BitSieve;

use crate::codec::{read_cache, write_cache};
use crate::config::CacheConfig;
use crate::error::CacheError;

/// Where the in-memory sieve came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Decoded from the primes file at this path.
    Loaded(PathBuf),
    /// Started from the seed sieve.
    Seeded,
}

/// A sieve together with the file it will be saved to.
///
/// Loading is fail-safe: unreadable or missing files fall back to the seed
/// sieve, and a missing destination only disables saving.
#[derive(Debug)]
pub struct PrimeCache {
    sieve: BitSieve,
    origin: Origin,
    destination: Option<PathBuf>,
    candidates: Vec<PathBuf>,
    loaded_capacity: usize,
}

impl PrimeCache {
    /// Locates and loads the primes file.
    ///
    /// With an explicit path, that path is read if possible and is always
    /// the destination. Otherwise the first readable candidate is used for
    /// both. Failing that the sieve starts from the seed and the destination
    /// is left open until [`save`](Self::save). Nothing is created on disk.
    pub fn locate(config: CacheConfig) -> Self {
        let CacheConfig {
            explicit,
            candidates,
        } = config;

        if let Some(path) = explicit {
            let (sieve, origin) = match load(&path) {
                Some(sieve) => (sieve, Origin::Loaded(path.clone())),
                None => (BitSieve::seed(), Origin::Seeded),
            };
            log::info!("using primes file {}", path.display());
            return Self::new(sieve, origin, Some(path), vec![]);
        }

        let found = candidates
            .iter()
            .find_map(|path| load(path).map(|sieve| (path.clone(), sieve)));
        if let Some((path, sieve)) = found {
            log::info!("using primes file {}", path.display());
            let origin = Origin::Loaded(path.clone());
            return Self::new(sieve, origin, Some(path), candidates);
        }

        log::debug!("no primes file found; starting from the seed");
        Self::new(BitSieve::seed(), Origin::Seeded, None, candidates)
    }

    fn new(
        sieve: BitSieve,
        origin: Origin,
        destination: Option<PathBuf>,
        candidates: Vec<PathBuf>,
    ) -> Self {
        let loaded_capacity = sieve.capacity();
        Self {
            sieve,
            origin,
            destination,
            candidates,
            loaded_capacity,
        }
    }

    /// Returns the sieve.
    pub fn sieve(&self) -> &BitSieve {
        &self.sieve
    }

    /// Returns the sieve for querying (queries may grow it).
    pub fn sieve_mut(&mut self) -> &mut BitSieve {
        &mut self.sieve
    }

    /// Returns where the sieve was loaded from.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Returns the path the sieve will be saved to, if one has been chosen.
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Returns true if the sieve has grown since it was loaded.
    pub fn is_dirty(&self) -> bool {
        self.sieve.capacity() != self.loaded_capacity
    }

    /// Writes the sieve to the destination if it has grown.
    ///
    /// Without a destination, the first candidate that can be created or
    /// opened for writing becomes one. Returns whether anything was written.
    pub fn save(&mut self) -> Result<bool, CacheError> {
        if !self.is_dirty() {
            log::debug!("sieve unchanged; not saving");
            return Ok(false);
        }
        if self.destination.is_none() {
            self.destination = self.candidates.iter().find(|p| is_writable(p)).cloned();
        }
        let Some(path) = &self.destination else {
            log::warn!(
                "could not find a suitable path for the primes file; \
                 try passing a path via environment variable {}",
                crate::config::PRIMES_FILE_VAR
            );
            return Err(CacheError::NoDestination {
                candidates: self.candidates.clone(),
            });
        };
        write_cache(path, &self.sieve)?;
        log::debug!(
            "saved {} primes below {} to {}",
            self.sieve.prime_count(),
            self.sieve.capacity(),
            path.display()
        );
        self.loaded_capacity = self.sieve.capacity();
        Ok(true)
    }
}

/// Reads a primes file, logging and swallowing read errors.
fn load(path: &Path) -> Option<BitSieve> {
    match read_cache(path) {
        Ok(sieve) => sieve,
        Err(e) => {
            log::warn!("ignoring unreadable primes file: {e}");
            None
        }
    }
}

/// Checks whether `path` can be opened for writing, creating it if needed
/// but never truncating it.
fn is_writable(path: &Path) -> bool {
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .is_ok()
}
