//! `primes --manual` — prints the installed README.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// Locations the manual is installed to, in search order.
pub const MANUAL_PATHS: [&str; 2] = [
    "/usr/local/share/doc/primes/README",
    "/usr/share/doc/primes/README",
];

/// Copies the first readable manual in `paths` to `out`.
///
/// If none can be opened, lists the searched paths on `err` and returns
/// `Ok(false)`.
pub fn show<W: Write, E: Write>(paths: &[PathBuf], out: &mut W, err: &mut E) -> io::Result<bool> {
    for path in paths {
        if let Ok(mut file) = File::open(path) {
            io::copy(&mut file, out)?;
            out.flush()?;
            return Ok(true);
        }
    }

    writeln!(err, "Could not find the documentation.")?;
    writeln!(err, "It should have been installed at one of the following paths:")?;
    for path in paths {
        writeln!(err, "{}", path.display())?;
    }
    Ok(false)
}
