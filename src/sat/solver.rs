#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The surface shared by both engines: verdicts, statistics, options and the
//! [`Solver`] trait.

use crate::sat::cnf::Cnf;
use crate::sat::error::Result;
use crate::sat::variable_selection::VariableSelectionType;
use clap::ValueEnum;
use core::fmt;

pub use crate::sat::assignment::Solutions;

/// Outcome of a solving run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Verdict {
    Sat,
    Unsat,
    /// The run was aborted by a caller budget before reaching a verdict.
    #[default]
    Unknown,
}

impl Verdict {
    #[must_use]
    pub const fn is_sat(self) -> bool {
        matches!(self, Self::Sat)
    }

    #[must_use]
    pub const fn is_unsat(self) -> bool {
        matches!(self, Self::Unsat)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sat => write!(f, "SATISFIABLE"),
            Self::Unsat => write!(f, "UNSATISFIABLE"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Counters gathered while solving. Fields an engine does not track stay 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SolutionStats {
    /// Branching decisions (DPLL).
    pub decisions: usize,
    /// Failed search nodes (DPLL).
    pub conflicts: usize,
    /// Variables bound by unit propagation and pure-literal elimination.
    pub propagations: usize,
    /// Variables eliminated by resolution (DP).
    pub eliminations: usize,
}

/// How often pure-literal elimination is applied at each point it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum PureLiteralMode {
    /// A single pass over the current clause set.
    #[default]
    Once,
    /// Repeat until no pure literal remains.
    FixedPoint,
}

impl fmt::Display for PureLiteralMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Once => write!(f, "once"),
            Self::FixedPoint => write!(f, "fixed-point"),
        }
    }
}

/// Which engine decides the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum SolverType {
    /// Davis-Putnam variable elimination by resolution.
    Dp,
    /// Davis-Putnam-Logemann-Loveland backtracking search.
    #[default]
    Dpll,
}

impl fmt::Display for SolverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dp => write!(f, "dp"),
            Self::Dpll => write!(f, "dpll"),
        }
    }
}

/// Tunables for a solving run.
///
/// The defaults reproduce the reference behaviour: no budgets, pure literals
/// applied once, branching on the first variable met in clause order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SolverOptions {
    pub pure_literals: PureLiteralMode,
    pub selection: VariableSelectionType,
    /// Seed for [`VariableSelectionType::Random`].
    pub seed: u64,
    /// Abort DPLL with [`Verdict::Unknown`] once this many decisions were made.
    pub decision_limit: Option<usize>,
    /// Abort DP with [`Verdict::Unknown`] once the clause set grows past this.
    pub clause_limit: Option<usize>,
}

impl SolverOptions {
    #[must_use]
    pub const fn with_pure_literals(mut self, mode: PureLiteralMode) -> Self {
        self.pure_literals = mode;
        self
    }

    #[must_use]
    pub const fn with_selection(mut self, selection: VariableSelectionType) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub const fn with_decision_limit(mut self, limit: Option<usize>) -> Self {
        self.decision_limit = limit;
        self
    }

    #[must_use]
    pub const fn with_clause_limit(mut self, limit: Option<usize>) -> Self {
        self.clause_limit = limit;
        self
    }
}

/// A satisfiability engine over a single formula.
pub trait Solver {
    fn new(cnf: Cnf, options: SolverOptions) -> Self;

    /// Decides the formula.
    ///
    /// # Errors
    ///
    /// Internal invariant violations only. An unsatisfiable formula is
    /// `Ok(Verdict::Unsat)`.
    fn solve(&mut self) -> Result<Verdict>;

    /// The model found by the last [`Solver::solve`], if the engine builds one.
    fn solutions(&self) -> Option<Solutions>;

    fn stats(&self) -> SolutionStats;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Sat.to_string(), "SATISFIABLE");
        assert_eq!(Verdict::Unsat.to_string(), "UNSATISFIABLE");
        assert_eq!(Verdict::Unknown.to_string(), "UNKNOWN");
        assert!(Verdict::Sat.is_sat());
        assert!(!Verdict::Unknown.is_unsat());
    }

    #[test]
    fn test_options_builder() {
        let options = SolverOptions::default()
            .with_pure_literals(PureLiteralMode::FixedPoint)
            .with_selection(VariableSelectionType::Random)
            .with_seed(7)
            .with_decision_limit(Some(10))
            .with_clause_limit(None);

        assert_eq!(options.pure_literals, PureLiteralMode::FixedPoint);
        assert_eq!(options.selection, VariableSelectionType::Random);
        assert_eq!(options.seed, 7);
        assert_eq!(options.decision_limit, Some(10));
        assert_eq!(options.clause_limit, None);
    }

    #[test]
    fn test_value_enum_names() {
        assert_eq!(
            PureLiteralMode::from_str("fixed-point", true),
            Ok(PureLiteralMode::FixedPoint)
        );
        assert_eq!(SolverType::from_str("dp", true), Ok(SolverType::Dp));
        assert_eq!(SolverType::default(), SolverType::Dpll);
    }
}
