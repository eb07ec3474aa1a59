//! Resolution of where the primes file may live.
//!
//! The configuration is read from the process environment once, at startup,
//! and then passed by value to [`PrimeCache::locate`](crate::PrimeCache::locate).

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming an explicit primes file.
pub const PRIMES_FILE_VAR: &str = "PRIMES_FILE";

/// Candidate locations relative to `$HOME`, in search order.
const HOME_CANDIDATES: [&str; 3] = [
    ".local/var/list-of-primes",
    ".config/list-of-primes",
    ".list-of-primes",
];

/// System-wide candidate locations, searched after the home ones.
const SYSTEM_CANDIDATES: [&str; 3] = [
    "/usr/local/var/list-of-primes",
    "/usr/var/list-of-primes",
    "/var/list-of-primes",
];

/// Where to look for the primes file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// A path chosen by the user. When set, it is the only path used.
    pub explicit: Option<PathBuf>,

    /// Paths searched in order when no explicit path is given.
    pub candidates: Vec<PathBuf>,
}

impl CacheConfig {
    /// Builds the configuration from `PRIMES_FILE` and `HOME`.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var_os(PRIMES_FILE_VAR),
            std::env::var_os("HOME"),
        )
    }

    /// Builds the configuration from the given variable values.
    ///
    /// Empty values are treated as unset. Without a home directory only the
    /// system-wide candidates remain.
    pub fn from_vars(primes_file: Option<OsString>, home: Option<OsString>) -> Self {
        let explicit = primes_file.filter(|v| !v.is_empty()).map(PathBuf::from);

        let mut candidates = Vec::with_capacity(HOME_CANDIDATES.len() + SYSTEM_CANDIDATES.len());
        if let Some(home) = home.filter(|v| !v.is_empty()) {
            let home = PathBuf::from(home);
            candidates.extend(HOME_CANDIDATES.iter().map(|rel| home.join(rel)));
        }
        candidates.extend(SYSTEM_CANDIDATES.iter().map(PathBuf::from));

        Self {
            explicit,
            candidates,
        }
    }

    /// Builds a configuration from explicit values without touching the environment.
    pub fn with_paths(explicit: Option<PathBuf>, candidates: Vec<PathBuf>) -> Self {
        Self {
            explicit,
            candidates,
        }
    }

    /// Replaces the explicit path, if `path` is `Some`.
    pub fn override_explicit(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.explicit = path;
        }
        self
    }
}
