//! Text encoding of a sieve: one known prime per line.
//!
//! The format is a sequence of decimal numbers, each terminated by any
//! non-digit byte. [`encode`] writes `"<n>;\n"` for every set flag in
//! ascending order. [`decode`] accepts any separators and any order, and
//! trusts the content: numbers are flagged as prime without verification.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use primes_sieve::bits::BITS_PER_BYTE;
use primes_sieve::{BitSieve, PackedBits};

use crate::error::CacheError;

/// Initial storage size used while decoding, in bytes.
const INITIAL_DECODE_BYTES: usize = 256;

/// Accumulates one run of ASCII digits.
#[derive(Default)]
struct Token {
    value: usize,
    digits: bool,
    overflowed: bool,
}

impl Token {
    fn push_digit(&mut self, digit: u8) {
        self.digits = true;
        match self
            .value
            .checked_mul(10)
            .and_then(|v| v.checked_add(usize::from(digit - b'0')))
        {
            Some(v) => self.value = v,
            None => self.overflowed = true,
        }
    }

    /// Ends the current run, returning its value if it names a usable index.
    fn finish(&mut self) -> Option<usize> {
        let token = std::mem::take(self);
        (token.digits && !token.overflowed && token.value != 0).then_some(token.value)
    }
}

/// Decodes a sieve from a stream of decimal indices.
///
/// Every number read sets its flag; storage grows geometrically as larger
/// numbers appear and is trimmed to the byte holding the largest one. No
/// sieving pass is run. A number running into end of input still counts.
/// Zero and numbers that do not fit in `usize` are skipped. If no number of
/// 8 or more is present the seed sieve is returned instead.
///
/// Only I/O errors from the underlying reader are reported; malformed content
/// never is.
pub fn decode<R: Read>(reader: R) -> io::Result<BitSieve> {
    let mut reader = BufReader::new(reader);
    let mut bits = PackedBits::new();
    let mut token = Token::default();
    let mut largest: Option<usize> = None;

    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        for &c in buf {
            if c.is_ascii_digit() {
                token.push_digit(c);
            } else if let Some(n) = token.finish() {
                store(&mut bits, n)?;
                largest = largest.max(Some(n));
            }
        }
        let consumed = buf.len();
        reader.consume(consumed);
    }
    if let Some(n) = token.finish() {
        store(&mut bits, n)?;
        largest = largest.max(Some(n));
    }

    match largest {
        Some(n) if n >= BITS_PER_BYTE => {
            bits.truncate_bytes(n / BITS_PER_BYTE + 1);
            Ok(BitSieve::from_bytes(bits.into_bytes()))
        }
        _ => Ok(BitSieve::seed()),
    }
}

/// Sets flag `n`, doubling the storage until it fits.
fn store(bits: &mut PackedBits, n: usize) -> io::Result<()> {
    let byte_idx = n / BITS_PER_BYTE;
    if byte_idx >= bits.byte_len() {
        let mut new_bytes = bits.byte_len().max(INITIAL_DECODE_BYTES);
        while new_bytes <= byte_idx {
            new_bytes = new_bytes.saturating_mul(2);
        }
        bits.ensure_capacity(new_bytes, 0)
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
    }
    bits.set(n);
    Ok(())
}

/// Encodes every known prime of `sieve` as `"<n>;\n"`, in ascending order.
pub fn encode<W: Write>(sieve: &BitSieve, writer: W) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    for p in sieve.known_primes() {
        writeln!(writer, "{p};")?;
    }
    writer.flush()
}

/// Reads and decodes the primes file at `path`.
///
/// Returns `Ok(None)` if the file cannot be opened, and an error only if it
/// opened but could not be read to the end.
pub fn read_cache(path: &Path) -> Result<Option<BitSieve>, CacheError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            log::debug!("cannot open primes file {}: {e}", path.display());
            return Ok(None);
        }
    };
    decode(file).map(Some).map_err(|source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Encodes `sieve` into the primes file at `path`.
///
/// The data is first written to a sibling temporary file and renamed into
/// place, so an interrupted save leaves the previous file intact. If the
/// directory does not allow creating the temporary file, the primes file is
/// overwritten directly.
pub fn write_cache(path: &Path, sieve: &BitSieve) -> Result<(), CacheError> {
    let tmp = temp_sibling(path);
    match File::create(&tmp) {
        Ok(file) => {
            if let Err(e) = encode(sieve, file) {
                let _ = std::fs::remove_file(&tmp);
                return Err(io_err(&tmp)(e));
            }
            std::fs::rename(&tmp, path).map_err(io_err(path))
        }
        Err(e) => {
            log::debug!(
                "cannot create {} ({e}); overwriting {} in place",
                tmp.display(),
                path.display()
            );
            let file = File::create(path).map_err(io_err(path))?;
            encode(sieve, file).map_err(io_err(path))
        }
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> CacheError {
    let path = path.to_path_buf();
    move |source| CacheError::Io { path, source }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
