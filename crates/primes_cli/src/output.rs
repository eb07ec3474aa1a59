//! Rendering of query results as plain text or JSON.
//!
//! Text output is streamed one number per line as results are produced.
//! JSON output is buffered and written as a single object once the query
//! completes.

use std::io::{self, Write};

use clap::ValueEnum;
use primes_sieve::BitSieve;
use serde::Serialize;

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One number per line.
    Text,
    /// A single JSON object.
    Json,
}

/// The JSON document emitted for one run.
#[derive(Debug, Serialize)]
pub struct Report {
    /// Which query produced the numbers.
    pub query: &'static str,
    /// The query argument, absent when listing known primes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<usize>,
    /// The numbers produced, in output order.
    pub primes: Vec<usize>,
}

/// Accepts numbers one at a time and writes them in the chosen format.
pub struct PrimeWriter<'a, W: Write> {
    format: OutputFormat,
    out: &'a mut W,
    collected: Vec<usize>,
}

impl<'a, W: Write> PrimeWriter<'a, W> {
    /// Creates a writer targeting `out`.
    pub fn new(format: OutputFormat, out: &'a mut W) -> Self {
        Self {
            format,
            out,
            collected: Vec::new(),
        }
    }

    /// Emits one number.
    pub fn push(&mut self, n: usize) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{n}"),
            OutputFormat::Json => {
                self.collected.push(n);
                Ok(())
            }
        }
    }

    /// Completes the output, writing the JSON report if one is pending.
    pub fn finish(self, query: &'static str, argument: Option<usize>) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            let report = Report {
                query,
                argument,
                primes: self.collected,
            };
            serde_json::to_writer(&mut *self.out, &report)?;
            writeln!(self.out)?;
        }
        self.out.flush()
    }
}

/// Prints every prime currently stored in `sieve`, without growing it.
pub fn print_known<W: Write>(sieve: &BitSieve, format: OutputFormat, out: &mut W) -> io::Result<()> {
    let mut writer = PrimeWriter::new(format, out);
    for p in sieve.known_primes() {
        writer.push(p)?;
    }
    writer.finish("known", None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_one_per_line() {
        let mut out = Vec::new();
        let mut writer = PrimeWriter::new(OutputFormat::Text, &mut out);
        writer.push(2).unwrap();
        writer.push(3).unwrap();
        writer.finish("count", Some(2)).unwrap();
        assert_eq!(out, b"2\n3\n");
    }

    #[test]
    fn json_report_shape() {
        let mut out = Vec::new();
        let mut writer = PrimeWriter::new(OutputFormat::Json, &mut out);
        for p in [2, 2, 3] {
            writer.push(p).unwrap();
        }
        writer.finish("factor", Some(12)).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["query"], "factor");
        assert_eq!(value["argument"], 12);
        assert_eq!(value["primes"], serde_json::json!([2, 2, 3]));
    }

    #[test]
    fn known_primes_omit_argument() {
        let mut out = Vec::new();
        print_known(&BitSieve::seed(), OutputFormat::Json, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"query\":\"known\",\"primes\":[2,3,5,7]}\n"
        );
    }

    #[test]
    fn known_primes_as_text() {
        let mut out = Vec::new();
        print_known(&BitSieve::seed(), OutputFormat::Text, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2\n3\n5\n7\n");
    }
}
