//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur while reading or writing the primes file.
///
/// None of these are fatal to a query: callers log them and carry on with
/// whatever sieve they have in memory.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while reading or writing the primes file.
    #[error("primes file I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// No writable location was found, so the sieve cannot be saved.
    #[error("no writable primes file among {} candidate path(s)", candidates.len())]
    NoDestination {
        /// The paths that were tried.
        candidates: Vec<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = CacheError::Io {
            path: PathBuf::from("/home/user/.list-of-primes"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("primes file I/O error"));
        assert!(msg.contains(".list-of-primes"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn no_destination_display() {
        let err = CacheError::NoDestination {
            candidates: vec![PathBuf::from("/a"), PathBuf::from("/b")],
        };
        assert_eq!(
            err.to_string(),
            "no writable primes file among 2 candidate path(s)"
        );
    }
}
