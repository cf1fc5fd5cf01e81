#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Error types shared by the formula model, the DIMACS reader and the engines.

use thiserror::Error;

/// Errors surfaced by this crate.
///
/// A proven unsatisfiable formula is not an error; it is reported through
/// [`Verdict::Unsat`](crate::sat::solver::Verdict::Unsat).
#[derive(Debug, Error)]
pub enum Error {
    /// The input text is not valid DIMACS CNF.
    #[error("malformed input on line {line}: {message}")]
    MalformedInput { line: usize, message: String },

    /// A literal with value `0` was placed inside a clause.
    #[error("literal 0 is a clause terminator and cannot appear inside a clause")]
    ZeroLiteral,

    /// A literal whose negation is not representable.
    #[error("literal {value} is out of range")]
    LiteralOutOfRange { value: i32 },

    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Variable elimination ran out of variables while clauses remained.
    #[error("internal error: variable elimination finished with {remaining} clauses left")]
    Exhausted { remaining: usize },
}

/// Convenient result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Detection that the current partial formula cannot be satisfied.
///
/// Raised by unit propagation and by branching when a clause becomes empty or
/// a forced literal contradicts an existing assignment. Always recovered
/// inside the engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Conflict;

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("conflict")
    }
}
