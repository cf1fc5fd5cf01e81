#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF (Conjunctive Normal Form) file format.
//!
//! The format typically includes:
//! - Comment lines starting with 'c'.
//! - A problem line 'p cnf <`num_variables`> <`num_clauses`>'. Its shape is
//!   checked, but the counts are not enforced; the formula is derived from the
//!   clauses actually found.
//! - Clause data: whitespace-separated integers, each clause terminated by
//!   `0`. A clause may span several lines.
//! - An optional '%' line marking end-of-data (used by the SATLIB benchmarks).
//!
//! Everything that is not well-formed is reported as
//! [`Error::MalformedInput`] with the offending line number, before any
//! solving starts.

use crate::sat::cnf::Cnf;
use crate::sat::error::{Error, Result};
use std::io::{self, BufRead};
use std::path::Path;

fn malformed(line: usize, message: impl Into<String>) -> Error {
    Error::MalformedInput {
        line,
        message: message.into(),
    }
}

fn check_header(line: usize, parts: &[&str]) -> Result<()> {
    match parts {
        ["p", "cnf", vars, clauses] => {
            vars.parse::<usize>()
                .map_err(|e| malformed(line, format!("invalid variable count '{vars}': {e}")))?;
            clauses
                .parse::<usize>()
                .map_err(|e| malformed(line, format!("invalid clause count '{clauses}': {e}")))?;
            Ok(())
        }
        _ => Err(malformed(
            line,
            format!("expected 'p cnf <variables> <clauses>', found '{}'", parts.join(" ")),
        )),
    }
}

/// Parses DIMACS formatted data from a `BufRead` source into a `Cnf`.
///
/// A trailing clause without its terminating `0` is accepted.
///
/// # Errors
///
/// - [`Error::Io`] if reading fails.
/// - [`Error::MalformedInput`] for a bad problem line, a token that is not an
///   integer, or a literal outside the representable range.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf> {
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut current: Vec<i32> = Vec::new();
    let mut header_seen = false;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.first() {
            None => {}
            Some(&"%") => break,
            Some(first) if first.starts_with('c') => {}
            Some(first) if first.starts_with('p') => {
                if header_seen {
                    return Err(malformed(number, "duplicate problem line"));
                }
                check_header(number, &parts)?;
                header_seen = true;
            }
            Some(_) => {
                for token in parts {
                    let literal = token.parse::<i32>().map_err(|e| {
                        malformed(number, format!("failed to parse literal '{token}': {e}"))
                    })?;
                    if literal == i32::MIN {
                        return Err(malformed(number, format!("literal '{token}' out of range")));
                    }
                    if literal == 0 {
                        clauses.push(std::mem::take(&mut current));
                    } else {
                        current.push(literal);
                    }
                }
            }
        }
    }

    if !current.is_empty() {
        clauses.push(current);
    }

    Cnf::new(clauses)
}

/// Parses DIMACS text held in memory.
///
/// # Errors
///
/// See [`parse_dimacs`].
pub fn parse_str(input: &str) -> Result<Cnf> {
    parse_dimacs(io::Cursor::new(input))
}

/// Parses a DIMACS CNF file.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be opened or read, otherwise see
/// [`parse_dimacs`].
pub fn parse_file<P: AsRef<Path>>(file_path: P) -> Result<Cnf> {
    let file = std::fs::File::open(file_path)?;
    parse_dimacs(io::BufReader::new(file))
}
