//! `primes` — query a persistent, growable prime sieve.
//!
//! Each invocation loads the sieve from the primes file, runs at most one
//! query against it (growing it as needed), prints the result, and saves the
//! grown sieve back so later runs start further ahead.

#![warn(missing_docs)]

mod manual;
mod output;
mod query;

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser, ValueEnum};
use log::LevelFilter;
use primes_cache::{CacheConfig, Origin, PrimeCache};

use crate::output::OutputFormat;
use crate::query::Query;

/// Prime numbers, remembered between runs.
///
/// Without a query, prints every prime currently stored in the primes file.
/// The file is looked up in `$PRIMES_FILE`, then `~/.local/var`, `~/.config`,
/// `~`, `/usr/local/var`, `/usr/var` and `/var` (as `list-of-primes`).
#[derive(Parser, Debug)]
#[command(name = "primes", version, about = "Prime numbers, remembered between runs")]
#[command(group(ArgGroup::new("query").args(["factor", "count", "up_to"])))]
pub struct Cli {
    /// Print N if it is prime, otherwise its prime factors.
    #[arg(short = 'f', long = "factor", value_name = "N")]
    pub factor: Option<usize>,

    /// Print the first K primes.
    #[arg(short = 'n', long = "count", value_name = "K")]
    pub count: Option<usize>,

    /// Print every prime up to and including N.
    #[arg(short = 'u', long = "up-to", value_name = "N")]
    pub up_to: Option<usize>,

    /// Do not update the primes file.
    #[arg(short, long)]
    pub dry_run: bool,

    /// Path to the primes file (overrides `PRIMES_FILE`).
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// Output format for results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the installed manual and exit.
    #[arg(long)]
    pub manual: bool,

    /// Suppress all diagnostics except errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose (debug-level) diagnostics.
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored diagnostics.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

impl Cli {
    /// Returns the selected query, if any.
    pub fn query(&self) -> Option<Query> {
        self.factor
            .map(Query::Factor)
            .or(self.count.map(Query::Count))
            .or(self.up_to.map(Query::UpTo))
    }
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if cli.manual {
        let paths: Vec<PathBuf> = manual::MANUAL_PATHS.iter().map(PathBuf::from).collect();
        if let Err(e) = manual::show(&paths, &mut io::stdout().lock(), &mut io::stderr().lock()) {
            eprintln!("error: {e}");
        }
        process::exit(0);
    }

    let config = CacheConfig::from_env().override_explicit(cli.cache.clone());
    let result = run(&cli, config, &mut io::stdout().lock());

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Loads the sieve, runs the selected query and saves the result.
///
/// Failing to save is logged but does not affect the exit code.
pub fn run(cli: &Cli, config: CacheConfig, out: &mut impl Write) -> Result<i32, Box<dyn Error>> {
    let mut cache = PrimeCache::locate(config);
    match cache.origin() {
        Origin::Loaded(path) => log::info!(
            "loaded {} primes below {} from {}",
            cache.sieve().prime_count(),
            cache.sieve().capacity(),
            path.display()
        ),
        Origin::Seeded => log::info!("no primes file loaded; starting from the seed"),
    }

    let Some(query) = cli.query() else {
        output::print_known(cache.sieve(), cli.format, out)?;
        return Ok(0);
    };

    let result = query::execute(query, cache.sieve_mut(), cli.format, out);

    if cli.dry_run {
        log::debug!("dry run; primes file left untouched");
    } else {
        match cache.save() {
            Ok(true) => log::info!("primes file updated"),
            Ok(false) => {}
            Err(e) => log::error!("could not update the primes file: {e}"),
        }
    }

    result?;
    Ok(0)
}

/// Installs the stderr logger. `RUST_LOG` overrides the flag-derived level.
fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let style = match cli.color {
        ColorChoice::Auto => env_logger::WriteStyle::Auto,
        ColorChoice::Always => env_logger::WriteStyle::Always,
        ColorChoice::Never => env_logger::WriteStyle::Never,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .write_style(style)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use primes_sieve::BitSieve;

    fn run_with(args: &[&str], cache_path: &std::path::Path) -> (i32, String) {
        let cli = Cli::parse_from(args);
        let config = CacheConfig::with_paths(Some(cache_path.to_path_buf()), vec![]);
        let mut out = Vec::new();
        let code = run(&cli, config, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parse_no_query() {
        let cli = Cli::parse_from(["primes"]);
        assert!(cli.query().is_none());
        assert!(!cli.dry_run);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.color, ColorChoice::Auto);
    }

    #[test]
    fn parse_short_flags() {
        let cli = Cli::parse_from(["primes", "-d", "-f", "360"]);
        assert_eq!(cli.query(), Some(Query::Factor(360)));
        assert!(cli.dry_run);

        let cli = Cli::parse_from(["primes", "-n", "5"]);
        assert_eq!(cli.query(), Some(Query::Count(5)));

        let cli = Cli::parse_from(["primes", "-u", "30"]);
        assert_eq!(cli.query(), Some(Query::UpTo(30)));
    }

    #[test]
    fn parse_long_flags() {
        let cli = Cli::parse_from([
            "primes",
            "--up-to",
            "100",
            "--cache",
            "/tmp/p",
            "--format",
            "json",
            "--verbose",
        ]);
        assert_eq!(cli.query(), Some(Query::UpTo(100)));
        assert_eq!(cli.cache, Some(PathBuf::from("/tmp/p")));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn queries_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["primes", "-f", "10", "-n", "3"]).is_err());
        assert!(Cli::try_parse_from(["primes", "-u", "10", "-n", "3"]).is_err());
    }

    #[test]
    fn negative_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["primes", "-f", "-4"]).is_err());
        assert!(Cli::try_parse_from(["primes", "-n", "abc"]).is_err());
    }

    #[test]
    fn up_to_prints_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list-of-primes");

        let (code, out) = run_with(&["primes", "-u", "30"], &path);
        assert_eq!(code, 0);
        assert_eq!(out, "2\n3\n5\n7\n11\n13\n17\n19\n23\n29\n");

        let saved = primes_cache::read_cache(&path).unwrap().unwrap();
        assert!(saved.capacity() > 30);
    }

    #[test]
    fn dry_run_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list-of-primes");

        let (_, out) = run_with(&["primes", "-d", "-n", "5"], &path);
        assert_eq!(out, "2\n3\n5\n7\n11\n");
        assert!(!path.exists());
    }

    #[test]
    fn dry_run_leaves_candidates_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list-of-primes");
        let cli = Cli::parse_from(["primes", "-d", "-u", "100"]);
        let config = CacheConfig::with_paths(None, vec![path.clone()]);

        let mut out = Vec::new();
        assert_eq!(run(&cli, config, &mut out).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 25);
        assert!(!path.exists());
    }

    #[test]
    fn candidate_is_created_when_saving() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list-of-primes");
        let cli = Cli::parse_from(["primes", "-u", "100"]);
        let config = CacheConfig::with_paths(None, vec![path.clone()]);

        assert_eq!(run(&cli, config, &mut Vec::new()).unwrap(), 0);
        let saved = primes_cache::read_cache(&path).unwrap().unwrap();
        assert!(saved.capacity() > 100);
    }

    #[test]
    fn unwritable_cache_still_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/list-of-primes");

        let (code, out) = run_with(&["primes", "-u", "100"], &path);
        assert_eq!(code, 0);
        assert_eq!(out.lines().count(), 25);
        assert!(out.ends_with("89\n97\n"));
        assert!(!path.exists());
    }

    #[test]
    fn no_writable_candidate_still_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(["primes", "-n", "30"]);
        let config = CacheConfig::with_paths(None, vec![dir.path().join("no/a")]);

        let mut out = Vec::new();
        assert_eq!(run(&cli, config, &mut out).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap().lines().last(), Some("113"));
    }

    #[test]
    fn no_query_prints_known_primes_without_saving() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list-of-primes");
        std::fs::write(&path, "2;3;5;7;11;13;").unwrap();

        let (_, out) = run_with(&["primes"], &path);
        assert_eq!(out, "2\n3\n5\n7\n11\n13\n");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "2;3;5;7;11;13;");
    }

    #[test]
    fn second_run_reuses_saved_sieve() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list-of-primes");

        run_with(&["primes", "-f", "997"], &path);
        let (_, out) = run_with(&["primes"], &path);
        let listed: Vec<usize> = out.lines().map(|l| l.parse().unwrap()).collect();
        assert!(listed.contains(&997));
        assert_eq!(listed.len(), 172);
    }

    #[test]
    fn factorize_zero_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(["primes", "-f", "0"]);
        let config = CacheConfig::with_paths(Some(dir.path().join("p")), vec![]);
        let err = run(&cli, config, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("factorize"));
    }

    #[test]
    fn seed_is_printed_when_no_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let (_, out) = run_with(&["primes"], &dir.path().join("missing"));
        let expected: String = BitSieve::seed()
            .known_primes()
            .map(|p| format!("{p}\n"))
            .collect();
        assert_eq!(out, expected);
    }
}
