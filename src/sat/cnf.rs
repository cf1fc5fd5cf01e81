#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Formulas in conjunctive normal form.
//!
//! A [`Cnf`] is a finite set of distinct clauses. Construction normalises the
//! input: clauses are put in canonical form, tautologies are dropped and
//! duplicate clauses are removed, none of which changes satisfiability. The
//! first occurrence of each clause keeps its position, so the clause order
//! seen by the engines follows the input order.
//!
//! Engines treat a `Cnf` as immutable input and derive new clause sets from
//! it.

use crate::sat::assignment::Solutions;
use crate::sat::clause::Clause;
use crate::sat::error::Result;
use crate::sat::literal::{Literal, Variable};
use core::fmt;
use itertools::Itertools;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
    /// Largest variable id occurring in the input.
    pub num_vars: usize,
    /// Every variable of the input, ascending, including those that only
    /// occurred in dropped tautologies.
    vars: Vec<Variable>,
}

impl Cnf {
    /// Builds a formula from DIMACS-style integer clauses.
    ///
    /// # Errors
    ///
    /// - [`Error::ZeroLiteral`](crate::sat::error::Error::ZeroLiteral) if any clause contains `0`.
    /// - [`Error::LiteralOutOfRange`](crate::sat::error::Error::LiteralOutOfRange) if any clause contains `i32::MIN`.
    pub fn new<I, J>(clauses: I) -> Result<Self>
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = i32>,
    {
        let clauses = clauses
            .into_iter()
            .map(|clause| {
                clause
                    .into_iter()
                    .map(Literal::try_from)
                    .collect::<Result<Clause>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_clauses(clauses))
    }

    /// Builds a formula from clauses, dropping tautologies and duplicates.
    ///
    /// The variable set is taken before tautologies are dropped, so models
    /// still cover every variable of the input.
    #[must_use]
    pub fn from_clauses<I: IntoIterator<Item = Clause>>(clauses: I) -> Self {
        let clauses = clauses.into_iter().collect_vec();
        let vars = clauses
            .iter()
            .flat_map(Clause::variables)
            .sorted_unstable()
            .dedup()
            .collect_vec();
        let num_vars = vars.last().map_or(0, |&var| var as usize);

        let mut seen = FxHashSet::default();
        let clauses = clauses
            .into_iter()
            .filter(|clause| !clause.is_tautology())
            .filter(|clause| seen.insert(clause.clone()))
            .collect();

        Self {
            clauses,
            num_vars,
            vars,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// An empty formula is trivially satisfiable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Total number of literal occurrences.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// The variables of the input formula, ascending.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.vars
    }

    #[must_use]
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    #[must_use]
    pub fn has_unit_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_unit)
    }

    /// Checks that every clause has a literal made true by `solutions`.
    #[must_use]
    pub fn verify(&self, solutions: &Solutions) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.iter().any(|&lit| solutions.check(lit)))
    }
}

impl From<Vec<Clause>> for Cnf {
    fn from(clauses: Vec<Clause>) -> Self {
        Self::from_clauses(clauses)
    }
}

impl FromIterator<Clause> for Cnf {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self::from_clauses(iter)
    }
}

/// Writes the formula in DIMACS CNF.
impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::error::Error;

    #[test]
    fn test_new_normalises() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![2, 1], vec![3, -3], vec![-4]]).unwrap();
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.clauses[0].to_i32s(), vec![1, 2]);
        assert_eq!(cnf.clauses[1].to_i32s(), vec![-4]);
        assert_eq!(cnf.num_vars, 4);
        assert_eq!(cnf.variables(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_tautology_only_variable_is_kept() {
        let cnf = Cnf::new(vec![vec![1, -1], vec![2]]).unwrap();
        assert_eq!(cnf.len(), 1);
        assert_eq!(cnf.variables(), vec![1, 2]);
        assert_eq!(cnf.num_vars, 2);
    }

    #[test]
    fn test_new_rejects_zero() {
        let err = Cnf::new(vec![vec![1, 0, 2]]).unwrap_err();
        assert!(matches!(err, Error::ZeroLiteral));
    }

    #[test]
    fn test_new_rejects_unrepresentable_literal() {
        let err = Cnf::new(vec![vec![i32::MIN, 1], vec![-1, 2]]).unwrap_err();
        assert!(matches!(err, Error::LiteralOutOfRange { value: i32::MIN }));

        let cnf = Cnf::new(vec![vec![-i32::MAX, 1]]).unwrap();
        assert_eq!(cnf.num_vars, i32::MAX.unsigned_abs() as usize);
    }

    #[test]
    fn test_empty_formula() {
        let cnf = Cnf::new(Vec::<Vec<i32>>::new()).unwrap();
        assert!(cnf.is_empty());
        assert_eq!(cnf.num_vars, 0);
        assert!(cnf.variables().is_empty());
        assert!(cnf.verify(&Solutions::default()));
    }

    #[test]
    fn test_empty_clause_kept() {
        let cnf = Cnf::new(vec![vec![], vec![1]]).unwrap();
        assert!(cnf.has_empty_clause());
        assert!(cnf.has_unit_clause());
    }

    #[test]
    fn test_verify() {
        let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 2]]).unwrap();
        let good: Solutions = [-1, 2].into_iter().filter_map(Literal::from_i32).collect();
        let bad: Solutions = [1, -2].into_iter().filter_map(Literal::from_i32).collect();
        assert!(cnf.verify(&good));
        assert!(!cnf.verify(&bad));
    }

    #[test]
    fn test_display_dimacs() {
        let cnf = Cnf::new(vec![vec![1, -2], vec![2]]).unwrap();
        assert_eq!(cnf.to_string(), "p cnf 2 2\n1 -2 0\n2 0\n");
    }
}
