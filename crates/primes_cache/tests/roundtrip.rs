//! End-to-end persistence: grow a sieve, save it, reload it, keep growing.

use primes_cache::{read_cache, write_cache, CacheConfig, Origin, PrimeCache};
use primes_sieve::BitSieve;

#[test]
fn saved_file_lists_primes_ascending() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list-of-primes");

    let mut sieve = BitSieve::seed();
    sieve.ensure(40).unwrap();
    write_cache(&path, &sieve).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let listed: Vec<usize> = text
        .lines()
        .map(|l| l.trim_end_matches(';').parse().unwrap())
        .collect();
    assert_eq!(listed, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61]);
}

#[test]
fn reloaded_sieve_keeps_growing_correctly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list-of-primes");

    let mut first = BitSieve::seed();
    first.ensure(1_000).unwrap();
    write_cache(&path, &first).unwrap();

    let mut reloaded = read_cache(&path).unwrap().unwrap();
    reloaded.ensure(50_000).unwrap();

    let mut fresh = BitSieve::seed();
    fresh.ensure(50_000).unwrap();

    let limit = reloaded.capacity().min(fresh.capacity());
    for i in 0..limit {
        assert_eq!(reloaded.flag(i), fresh.flag(i), "index {i}");
    }
}

#[test]
fn hand_written_file_in_any_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list-of-primes");
    std::fs::write(&path, "23\n19\n2\n17\n3\n13\n5\n11\n7\n").unwrap();

    let mut sieve = read_cache(&path).unwrap().unwrap();
    assert_eq!(sieve.capacity(), 24);
    let primes: Vec<usize> = sieve.enumerate_up_to(30).map(Result::unwrap).collect();
    assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
}

#[test]
fn cache_survives_several_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = CacheConfig::with_paths(None, vec![dir.path().join("list-of-primes")]);

    for (run, bound) in [100usize, 10, 5_000].into_iter().enumerate() {
        let mut cache = PrimeCache::locate(config.clone());
        if run > 0 {
            assert!(matches!(cache.origin(), Origin::Loaded(_)));
        }
        let count = cache.sieve_mut().enumerate_up_to(bound).count();
        assert!(count > 0);
        cache.save().unwrap();
    }

    let cache = PrimeCache::locate(config);
    assert!(cache.sieve().capacity() > 5_000);
    assert_eq!(cache.sieve().known_primes().take_while(|&p| p <= 5_000).count(), 669);
}
